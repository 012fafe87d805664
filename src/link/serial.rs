use std::fs::{File, OpenOptions};
use std::process::Command;

use crate::config::LinkSettings;
use crate::error::LinkError;

/// Open the serial device read/write, putting the tty in raw mode at the
/// configured baud rate first.
pub fn open_serial(settings: &LinkSettings) -> Result<File, LinkError> {
    if settings.configure_tty {
        configure_tty(&settings.device, settings.baud_rate)?;
    }

    OpenOptions::new()
        .read(true)
        .write(true)
        .open(&settings.device)
        .map_err(|source| LinkError::Open {
            device: settings.device.clone(),
            source,
        })
}

fn configure_tty(device: &str, baud_rate: u32) -> Result<(), LinkError> {
    let output = Command::new("stty")
        .args(["-F", device, &baud_rate.to_string(), "raw", "-echo"])
        .output()
        .map_err(|e| LinkError::Configure {
            device: device.to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(LinkError::Configure {
            device: device.to_string(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}
