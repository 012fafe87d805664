//! Optical drive access through the usual command-line tools.

use std::process::{Command, Output};

use crate::config::DiscSettings;
use crate::error::DiscError;

/// Pregap frames added to every cdparanoia sector offset.
const PREGAP_FRAMES: i64 = 150;

/// The drive operations the player needs.
pub trait DiscDrive {
    /// Size of the medium in bytes; `0` or an error when the tray is empty.
    fn size(&self) -> Result<i64, DiscError>;
    /// TOC descriptor of the inserted disc (`first last lead_out starts..`).
    fn read_toc(&self) -> Result<String, DiscError>;
    fn eject(&self) -> Result<(), DiscError>;
}

/// A drive exposed as a block device (`/dev/sr0`).
#[derive(Debug, Clone)]
pub struct BlockDeviceDrive {
    device: String,
    eject_device: String,
}

impl BlockDeviceDrive {
    pub fn new(settings: &DiscSettings) -> Self {
        Self {
            device: settings.device.clone(),
            eject_device: settings.eject_device.clone(),
        }
    }
}

fn run(program: &str, args: &[&str]) -> Result<Output, DiscError> {
    let command = format!("{} {}", program, args.join(" "));
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| DiscError::Command {
            command: command.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(DiscError::CommandFailed {
            command,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output)
}

impl DiscDrive for BlockDeviceDrive {
    fn size(&self) -> Result<i64, DiscError> {
        let output = run("blockdev", &["--getsize64", &self.device])?;
        let text = String::from_utf8_lossy(&output.stdout);
        text.trim()
            .parse::<i64>()
            .map_err(|_| DiscError::Unreadable {
                command: "blockdev".to_string(),
                output: text.trim().to_string(),
            })
    }

    fn read_toc(&self) -> Result<String, DiscError> {
        let output = run("cdparanoia", &["-Q", "-d", &self.device])?;
        // cdparanoia prints its table on stderr.
        let mut text = String::from_utf8_lossy(&output.stderr).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stdout));
        toc_from_cdparanoia(&text).ok_or_else(|| DiscError::Unreadable {
            command: "cdparanoia".to_string(),
            output: text,
        })
    }

    fn eject(&self) -> Result<(), DiscError> {
        run("eject", &[&self.eject_device]).map(|_| ())
    }
}

/// Build a TOC descriptor from a `cdparanoia -Q` table.
///
/// Rows look like `  3.    19375 [04:18.25]    16503 [03:40.03]    no   no  2`:
/// track number, length in sectors, then the begin sector.
pub fn toc_from_cdparanoia(output: &str) -> Option<String> {
    let mut rows: Vec<(u32, i64, i64)> = Vec::new();

    for line in output.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some(number) = fields
            .first()
            .and_then(|f| f.strip_suffix('.'))
            .and_then(|n| n.parse::<u32>().ok())
        else {
            continue;
        };
        let (Some(length), Some(begin)) = (
            fields.get(1).and_then(|f| f.parse::<i64>().ok()),
            fields.get(3).and_then(|f| f.parse::<i64>().ok()),
        ) else {
            continue;
        };
        rows.push((number, length, begin));
    }

    let (first, _, _) = *rows.first()?;
    let (last, last_length, last_begin) = *rows.last()?;

    let mut parts = vec![
        first.to_string(),
        last.to_string(),
        (last_begin + last_length + PREGAP_FRAMES).to_string(),
    ];
    parts.extend(
        rows.iter()
            .map(|(_, _, begin)| (begin + PREGAP_FRAMES).to_string()),
    );
    Some(parts.join(" "))
}
