//! Hardware clock reads through the Linux RTC character device.

use std::path::{Path, PathBuf};

use super::{Action, ActionError};

/// Broken-down time as filled in by `RTC_RD_TIME`
///
/// Field layout matches the kernel's `struct rtc_time`.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RtcTime {
    /// Seconds, 0-59
    pub tm_sec: i32,
    /// Minutes, 0-59
    pub tm_min: i32,
    /// Hours, 0-23
    pub tm_hour: i32,
    /// Day of month, 1-31
    pub tm_mday: i32,
    /// Month, 0-11
    pub tm_mon: i32,
    /// Years since 1900
    pub tm_year: i32,
    /// Unused by the RTC driver
    pub tm_wday: i32,
    /// Unused by the RTC driver
    pub tm_yday: i32,
    /// Unused by the RTC driver
    pub tm_isdst: i32,
}

impl RtcTime {
    /// `Time: HH:MM:SS`
    #[must_use]
    pub fn format_time(&self) -> String {
        format!(
            "Time: {:02}:{:02}:{:02}",
            self.tm_hour, self.tm_min, self.tm_sec
        )
    }

    /// `Date: DD/MM/YYYY`
    #[must_use]
    pub fn format_date(&self) -> String {
        format!(
            "Date: {:02}/{:02}/{}",
            self.tm_mday,
            self.tm_mon + 1,
            self.tm_year + 1900
        )
    }
}

#[cfg(target_os = "linux")]
mod ioctl {
    // RTC_RD_TIME = _IOR('p', 0x09, struct rtc_time)
    nix::ioctl_read!(rtc_rd_time, b'p', 0x09, super::RtcTime);
}

/// Read the current time from the RTC device at `path`
#[cfg(target_os = "linux")]
pub fn read_rtc(path: &Path) -> Result<RtcTime, ActionError> {
    use std::fs::File;
    use std::os::fd::AsRawFd;

    let file = File::open(path).map_err(|source| ActionError::DeviceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut time = RtcTime::default();
    // SAFETY: `file` keeps the descriptor open for the call and `time` has the
    // layout of `struct rtc_time`, which is what RTC_RD_TIME writes.
    unsafe { ioctl::rtc_rd_time(file.as_raw_fd(), &mut time) }.map_err(|errno| {
        ActionError::DeviceRead {
            path: path.to_path_buf(),
            source: errno.into(),
        }
    })?;

    Ok(time)
}

/// Read the current time from the RTC device at `path`
#[cfg(not(target_os = "linux"))]
pub fn read_rtc(path: &Path) -> Result<RtcTime, ActionError> {
    Err(ActionError::DeviceUnavailable {
        path: path.to_path_buf(),
        source: std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "RTC ioctl is only available on Linux",
        ),
    })
}

/// Prints the hardware clock's time of day
#[derive(Debug, Clone)]
pub struct RtcTimeAction {
    device: PathBuf,
}

impl RtcTimeAction {
    /// Read from the RTC device at `device`
    #[must_use]
    pub const fn new(device: PathBuf) -> Self {
        Self { device }
    }
}

impl Action for RtcTimeAction {
    fn name(&self) -> &str {
        "rtc-time"
    }

    fn execute(&mut self) -> Result<String, ActionError> {
        read_rtc(&self.device).map(|time| time.format_time())
    }
}

/// Prints the hardware clock's calendar date
#[derive(Debug, Clone)]
pub struct RtcDateAction {
    device: PathBuf,
}

impl RtcDateAction {
    /// Read from the RTC device at `device`
    #[must_use]
    pub const fn new(device: PathBuf) -> Self {
        Self { device }
    }
}

impl Action for RtcDateAction {
    fn name(&self) -> &str {
        "rtc-date"
    }

    fn execute(&mut self) -> Result<String, ActionError> {
        read_rtc(&self.device).map(|time| time.format_date())
    }
}
