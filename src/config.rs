use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://aur.archlinux.org";
pub const DEFAULT_PAGE_SIZE: u64 = 250;
pub const DEFAULT_DATA_DIR: &str = "data";

const LIST_FILE: &str = "packages.txt";
const BACKUP_FILE: &str = "packages.bak";
const SCRATCH_DIR: &str = "tmp";
const LOG_FILE: &str = "run.log";

/// Immutable per-run configuration, built once from CLI arguments and
/// passed into the pipeline. No process-wide mutable state.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub query: String,
    pub page_size: u64,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn new(base_url: String, query: String, page_size: u64, data_dir: PathBuf) -> Self {
        Config {
            base_url,
            query,
            page_size,
            data_dir,
        }
    }

    /// Search URL for one result page at the given item offset.
    pub fn search_url(&self, offset: u64) -> String {
        format!(
            "{}/packages/?K={}&SeB=n&PP={}&O={}",
            self.base_url.trim_end_matches('/'),
            self.query,
            self.page_size,
            offset
        )
    }

    pub fn list_path(&self) -> PathBuf {
        self.data_dir.join(LIST_FILE)
    }

    pub fn backup_path(&self) -> PathBuf {
        self.data_dir.join(BACKUP_FILE)
    }

    pub fn scratch_dir(&self) -> PathBuf {
        self.data_dir.join(SCRATCH_DIR)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(
            DEFAULT_BASE_URL.to_string(),
            String::new(),
            DEFAULT_PAGE_SIZE,
            Path::new(DEFAULT_DATA_DIR).to_path_buf(),
        )
    }
}

// ── Tests ──
