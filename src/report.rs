use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use chrono::Local;
use tracing::debug;

/// Human-readable message for each terminal status code.
pub fn status_message(code: i32) -> &'static str {
    match code {
        0 => "package list updated",
        1 => "could not create scratch area",
        2 => "backup of existing list failed",
        3 => "new list could not be written, previous list restored",
        4 => "fetching the result count failed",
        5 => "fetching a result page failed",
        99 => "run log could not be initialized",
        _ => "unknown status",
    }
}

/// Append-only run log. Every run ends with exactly one recorded status;
/// on failure codes the whole log is dumped to the operator.
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    /// Open (and touch) the log target. Failure here is the pre-flight
    /// error: the run itself is never attempted.
    pub fn open(path: PathBuf) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(RunLog { path })
    }

    /// Append one timestamped status line.
    pub fn record(&self, code: i32, message: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(
            file,
            "{} [code {}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            code,
            message
        )
    }

    /// Surface the full log to stderr, for failure codes.
    pub fn dump_to_stderr(&self) {
        match fs::read_to_string(&self.path) {
            Ok(text) => eprint!("{}", text),
            Err(e) => eprintln!("(run log unreadable: {})", e),
        }
    }
}

/// Best-effort desktop notification via notify-send. A missing binary or
/// a failed invocation is ignored; notification never fails the run.
pub fn notify(code: i32, message: &str) {
    let urgency = if code == 0 { "normal" } else { "critical" };
    let result = Command::new("notify-send")
        .arg("--urgency")
        .arg(urgency)
        .arg("aurlist")
        .arg(format!("[{}] {}", code, message))
        .status();
    if let Err(e) = result {
        debug!("desktop notification unavailable: {}", e);
    }
}

// ── Tests ──
