use std::fs;

use tracing::{info, warn};

use crate::commit::CommitManager;
use crate::config::Config;
use crate::error::PipelineError;
use crate::extract;
use crate::fetch::Fetch;
use crate::filter;
use crate::paginate;

/// One full fetch → filter → extract → commit run.
///
/// Returns the number of committed names. Any error aborts the remaining
/// stages; the caller (the single terminal handler) is responsible for the
/// final backup restore, logging and notification.
pub fn run<F: Fetch>(cfg: &Config, fetcher: &F) -> Result<usize, PipelineError> {
    let mgr = CommitManager::new(cfg);
    mgr.begin()?;

    let corpus = paginate::fetch_corpus(fetcher, cfg)?;
    dump_corpus(&mgr, &corpus);

    let filtered = filter::remove_orphan_blocks(&corpus);
    let names = extract::extract_names(&filtered);
    mgr.commit(&names)?;

    info!("run complete: {} packages listed", names.len());
    Ok(names.len())
}

/// Keep the raw corpus in the scratch area for inspection. Best effort;
/// a failed dump never fails the run.
fn dump_corpus(mgr: &CommitManager, corpus: &str) {
    let path = mgr.scratch_dir().join("raw.html");
    if let Err(e) = fs::write(&path, corpus) {
        warn!("could not dump raw corpus to {}: {}", path.display(), e);
    }
}

// ── Tests ──
