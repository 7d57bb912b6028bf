//! Serial-port capability used by the INT-RS bridge.

/// A serial port known to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialPortIdentifier {
    pub name: String,
    /// Human-readable description (USB product, driver, …) when available.
    pub description: Option<String>,
}

/// Access to the host's serial ports.
///
/// Injected into the factory at construction and shared with every INT-RS
/// bridge handler it creates.
pub trait SerialPortManager: Send + Sync {
    /// Look up a port by name, e.g. `/dev/ttyUSB0` or `COM3`.
    fn port_identifier(&self, name: &str) -> Option<SerialPortIdentifier>;

    /// Names of every port currently present.
    fn port_names(&self) -> Vec<String>;
}
