//! Interface address lookup.

use std::net::Ipv4Addr;

use super::{Action, ActionError};

/// First IPv4 address bound to `interface`
#[cfg(unix)]
pub fn interface_ipv4(interface: &str) -> Result<Ipv4Addr, ActionError> {
    let addresses = nix::ifaddrs::getifaddrs().map_err(|errno| ActionError::InterfaceLookup {
        interface: interface.to_owned(),
        source: errno.into(),
    })?;

    addresses
        .filter(|entry| entry.interface_name == interface)
        .find_map(|entry| {
            entry
                .address
                .as_ref()
                .and_then(|address| address.as_sockaddr_in())
                .map(|sin| Ipv4Addr::from(sin.ip()))
        })
        .ok_or_else(|| ActionError::NoIpv4Address {
            interface: interface.to_owned(),
        })
}

/// First IPv4 address bound to `interface`
#[cfg(not(unix))]
pub fn interface_ipv4(interface: &str) -> Result<Ipv4Addr, ActionError> {
    Err(ActionError::InterfaceLookup {
        interface: interface.to_owned(),
        source: std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "interface enumeration requires a unix target",
        ),
    })
}

/// Prints the IPv4 address of one network interface
#[derive(Debug, Clone)]
pub struct Ipv4AddressAction {
    interface: String,
}

impl Ipv4AddressAction {
    /// Look up addresses on `interface`
    #[must_use]
    pub const fn new(interface: String) -> Self {
        Self { interface }
    }

    /// Configured interface name
    #[must_use]
    pub fn interface(&self) -> &str {
        &self.interface
    }
}

impl Action for Ipv4AddressAction {
    fn name(&self) -> &str {
        "ipv4-address"
    }

    fn execute(&mut self) -> Result<String, ActionError> {
        interface_ipv4(&self.interface).map(|address| format!("IP address: {address}"))
    }
}
