//! Hands the resolved flags to the frontend.
//!
//! The mount point `-` means stdout; anything else is a file path the
//! frontend reads its flags from.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use cyoa_core::{Flags, Initializer, MountPoint};
use tracing::debug;

/// Mount point that writes to stdout
pub const STDOUT_MOUNT: &str = "-";

#[derive(Debug, Default)]
pub struct FlagsWriter {
    written: Option<Flags>,
}

impl FlagsWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags handed over, if the frontend was started
    pub fn written(&self) -> Option<&Flags> {
        self.written.as_ref()
    }

    fn write_to(mount: &MountPoint, contents: &str) -> Result<()> {
        if mount.as_str() == STDOUT_MOUNT {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", contents)?;
            stdout.flush()?;
            return Ok(());
        }

        let path = Path::new(mount.as_str());
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write flags to {}", path.display()))?;
        debug!(path = %path.display(), "Flags written");
        Ok(())
    }
}

impl Initializer for FlagsWriter {
    fn init(&mut self, mount: &MountPoint, flags: Flags) -> Result<()> {
        let contents = serde_json::to_string_pretty(&flags)?;
        Self::write_to(mount, &contents)?;
        self.written = Some(flags);
        Ok(())
    }
}
