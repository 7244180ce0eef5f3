//! External actions run by workers once they claim a command.
//!
//! An action is a fallible, possibly blocking call that produces one line of
//! human-readable output. It never sees the queue.

mod network;
mod rtc;

pub use network::{interface_ipv4, Ipv4AddressAction};
pub use rtc::{read_rtc, RtcDateAction, RtcTime, RtcTimeAction};

use std::path::PathBuf;

use thiserror::Error;

use crate::Command;
use crate::DispatchConfig;

/// Action failures, reported by the worker that ran the action
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ActionError {
    /// Clock device could not be opened
    #[error("Cannot open {}: {source}", .path.display())]
    DeviceUnavailable {
        /// Device path
        path: PathBuf,
        /// OS error
        #[source]
        source: std::io::Error,
    },

    /// Clock device opened but the read failed
    #[error("RTC read on {} failed: {source}", .path.display())]
    DeviceRead {
        /// Device path
        path: PathBuf,
        /// OS error
        #[source]
        source: std::io::Error,
    },

    /// Interface addresses could not be enumerated
    #[error("Interface lookup for {interface} failed: {source}")]
    InterfaceLookup {
        /// Interface name
        interface: String,
        /// OS error
        #[source]
        source: std::io::Error,
    },

    /// Interface exists without an IPv4 address, or does not exist
    #[error("No IPv4 address on interface {interface}")]
    NoIpv4Address {
        /// Interface name
        interface: String,
    },
}

/// A side-effecting operation bound to one command
pub trait Action: Send {
    /// Short name used in logs and reports
    fn name(&self) -> &str;

    /// Perform the action once
    fn execute(&mut self) -> Result<String, ActionError>;
}

impl<A: Action + ?Sized> Action for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn execute(&mut self) -> Result<String, ActionError> {
        (**self).execute()
    }
}

/// Build the action that serves `command` from configuration
#[must_use]
pub fn action_for(command: Command, config: &DispatchConfig) -> Box<dyn Action> {
    match command {
        Command::RtcTime => Box::new(RtcTimeAction::new(config.rtc_device.clone())),
        Command::RtcDate => Box::new(RtcDateAction::new(config.rtc_device.clone())),
        Command::Ipv4Address => Box::new(Ipv4AddressAction::new(config.interface.clone())),
    }
}
