use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Output directory written through a staging directory next to it.
///
/// Tiles go into a fresh hidden directory; `commit` swaps it into place.
/// Dropping without committing removes the staging directory and leaves any
/// previous output untouched.
pub struct StagedDir {
    staging: TempDir,
    target: PathBuf,
}

impl StagedDir {
    pub fn create(target: &Path) -> Result<Self> {
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| Error::sink_write(&parent, e))?;

        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        let staging = tempfile::Builder::new()
            .prefix(&format!(".{name}-staging-"))
            .tempdir_in(&parent)
            .map_err(|e| Error::sink_write(&parent, e))?;
        debug!("Staging {:?} in {:?}", target, staging.path());

        Ok(Self {
            staging,
            target: target.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        self.staging.path()
    }

    /// Replace the target with the staged contents.
    pub fn commit(self) -> Result<PathBuf> {
        let staged = self.staging.path().to_path_buf();
        let backup = self.target.with_file_name(format!(
            ".{}-previous",
            self.target
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        ));

        if backup.exists() {
            fs::remove_dir_all(&backup).map_err(|e| Error::sink_write(&backup, e))?;
        }
        let had_previous = self.target.exists();
        if had_previous {
            fs::rename(&self.target, &backup).map_err(|e| Error::sink_write(&self.target, e))?;
        }
        if let Err(e) = fs::rename(&staged, &self.target) {
            let reason = if had_previous {
                restore_previous(&backup, &self.target, &e)
            } else {
                e.to_string()
            };
            return Err(Error::sink_write(&self.target, reason));
        }
        if had_previous {
            fs::remove_dir_all(&backup).map_err(|e| Error::sink_write(&backup, e))?;
        }

        // The staging path no longer exists; dropping the handle is a no-op.
        drop(self.staging);
        info!("Committed output directory {:?}", self.target);
        Ok(self.target)
    }
}

/// Move `backup` back to `target` after a failed swap; returns the error reason.
fn restore_previous(backup: &Path, target: &Path, swap_error: &std::io::Error) -> String {
    match fs::rename(backup, target) {
        Ok(()) => swap_error.to_string(),
        Err(e) => {
            warn!("Could not restore {:?} from {:?}: {}", target, backup, e);
            format!(
                "{swap_error}; restoring the previous output also failed ({e}), it remains at {backup:?}"
            )
        }
    }
}
