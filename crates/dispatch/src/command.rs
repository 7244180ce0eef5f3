//! Commands carried through the shared queue.

use core::fmt;

use crate::DispatchError;

/// A tagged request for one external action
///
/// The numeric tag matches the option number shown in the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Command {
    /// Read time of day from the hardware clock
    RtcTime = 1,
    /// Read the calendar date from the hardware clock
    RtcDate = 2,
    /// Read the IPv4 address of the configured interface
    Ipv4Address = 3,
}

impl Command {
    /// Every command, in menu order
    pub const ALL: [Self; 3] = [Self::RtcTime, Self::RtcDate, Self::Ipv4Address];

    /// Numeric tag for this command
    #[must_use]
    #[inline]
    pub const fn tag(self) -> u32 {
        self as u32
    }

    /// Menu label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RtcTime => "RTC time",
            Self::RtcDate => "RTC date",
            Self::Ipv4Address => "IP address of this machine",
        }
    }
}

impl TryFrom<u32> for Command {
    type Error = DispatchError;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|command| command.tag() == tag)
            .ok_or(DispatchError::UnknownTag { tag })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.tag(), self.label())
    }
}
