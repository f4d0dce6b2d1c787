use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::PipelineError;

/// Owns the persisted list file, its backup, and the scratch area, and
/// gives the run replace-with-rollback semantics.
///
/// Per-run lifecycle: `begin` (scratch + backup) → `commit` (write new
/// list, rolling back on write failure) → on any stage failure the
/// terminal handler calls `restore_backup` once more (idempotent).
pub struct CommitManager {
    list_path: PathBuf,
    backup_path: PathBuf,
    scratch_dir: PathBuf,
}

impl CommitManager {
    pub fn new(cfg: &Config) -> Self {
        CommitManager {
            list_path: cfg.list_path(),
            backup_path: cfg.backup_path(),
            scratch_dir: cfg.scratch_dir(),
        }
    }

    /// Open the transaction: recreate the scratch area and move the live
    /// list aside into the backup slot.
    ///
    /// After a successful `begin`, the backup reflects the last successful
    /// commit and the live path is vacant for the new list.
    pub fn begin(&self) -> Result<(), PipelineError> {
        if self.scratch_dir.exists() {
            fs::remove_dir_all(&self.scratch_dir).map_err(PipelineError::ScratchCreate)?;
        }
        fs::create_dir_all(&self.scratch_dir).map_err(PipelineError::ScratchCreate)?;

        if self.list_path.exists() {
            fs::copy(&self.list_path, &self.backup_path).map_err(PipelineError::Backup)?;
            fs::remove_file(&self.list_path).map_err(PipelineError::Backup)?;
            info!("backed up existing list to {}", self.backup_path.display());
        }
        Ok(())
    }

    /// Write the new list to the live path as one whole-buffer write.
    /// On failure the previous list is restored from backup before the
    /// error is reported.
    pub fn commit(&self, names: &[String]) -> Result<(), PipelineError> {
        let mut buf = String::new();
        for name in names {
            buf.push_str(name);
            buf.push('\n');
        }
        if let Err(e) = fs::write(&self.list_path, buf) {
            self.restore_backup();
            return Err(PipelineError::ListWrite(e));
        }
        info!(
            "committed {} names to {}",
            names.len(),
            self.list_path.display()
        );
        Ok(())
    }

    /// Put the backed-up list back on the live path. Idempotent; a missing
    /// backup (first run) makes this a no-op. Restore trouble is logged
    /// but never masks the failure that triggered it.
    pub fn restore_backup(&self) {
        if !self.backup_path.exists() {
            return;
        }
        match fs::copy(&self.backup_path, &self.list_path) {
            Ok(_) => info!("restored list from {}", self.backup_path.display()),
            Err(e) => warn!("backup restore failed: {}", e),
        }
    }

    pub fn scratch_dir(&self) -> &std::path::Path {
        &self.scratch_dir
    }
}

// ── Tests ──
