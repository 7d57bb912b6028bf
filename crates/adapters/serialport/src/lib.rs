//! # satel-adapter-serialport
//!
//! [`SerialPortManager`] backed by the `serialport` crate's port enumeration.
//!
//! Ports are enumerated on every lookup so USB adapters plugged in after
//! start-up are picked up. A name that is not enumerated but exists as a
//! device node (symlinks such as `/dev/serial/by-id/...`, ser2net ptys) is
//! still accepted.

use std::path::Path;

use satel_app::ports::{SerialPortIdentifier, SerialPortManager};
use serialport::{SerialPortInfo, SerialPortType};

/// Serial ports of the machine the binding runs on.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSerialPorts;

impl SystemSerialPorts {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn enumerate() -> Vec<SerialPortInfo> {
        match serialport::available_ports() {
            Ok(ports) => ports,
            Err(err) => {
                tracing::warn!(error = %err, "could not enumerate serial ports");
                Vec::new()
            }
        }
    }
}

fn identify(info: &SerialPortInfo) -> SerialPortIdentifier {
    let description = match &info.port_type {
        SerialPortType::UsbPort(usb) => Some(
            usb.product
                .clone()
                .unwrap_or_else(|| format!("USB {:04x}:{:04x}", usb.vid, usb.pid)),
        ),
        SerialPortType::PciPort => Some("PCI".to_string()),
        SerialPortType::BluetoothPort => Some("Bluetooth".to_string()),
        SerialPortType::Unknown => None,
    };
    SerialPortIdentifier {
        name: info.port_name.clone(),
        description,
    }
}

impl SerialPortManager for SystemSerialPorts {
    fn port_identifier(&self, name: &str) -> Option<SerialPortIdentifier> {
        if let Some(info) = Self::enumerate().iter().find(|info| info.port_name == name) {
            return Some(identify(info));
        }
        Path::new(name).exists().then(|| SerialPortIdentifier {
            name: name.to_string(),
            description: None,
        })
    }

    fn port_names(&self) -> Vec<String> {
        Self::enumerate()
            .into_iter()
            .map(|info| info.port_name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_describe_pci_port() {
        let info = SerialPortInfo {
            port_name: "/dev/ttyS0".to_string(),
            port_type: SerialPortType::PciPort,
        };
        let id = identify(&info);
        assert_eq!(id.name, "/dev/ttyS0");
        assert_eq!(id.description.as_deref(), Some("PCI"));
    }

    #[test]
    fn should_leave_unknown_port_undescribed() {
        let info = SerialPortInfo {
            port_name: "COM3".to_string(),
            port_type: SerialPortType::Unknown,
        };
        assert_eq!(identify(&info).description, None);
    }

    #[test]
    fn should_not_find_nonexistent_port() {
        let ports = SystemSerialPorts::new();
        assert!(ports.port_identifier("/nonexistent/satel-tty").is_none());
    }
}
