use thiserror::Error;

/// Opaque transport failure from a single fetch attempt.
///
/// Carries no structured detail; callers classify failures only by which
/// pipeline stage issued the fetch (count probe vs result page).
#[derive(Debug, Error)]
#[error("transport failed: {0}")]
pub struct FetchError(pub String);

/// Everything that can end a run short of success. Each variant maps 1:1
/// to a process exit code.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Scratch/temp area could not be created.
    #[error("could not create scratch area: {0}")]
    ScratchCreate(#[source] std::io::Error),

    /// Backup of the existing list failed.
    #[error("could not back up existing list: {0}")]
    Backup(#[source] std::io::Error),

    /// New list file could not be written (backup auto-restored).
    #[error("could not write new list: {0}")]
    ListWrite(#[source] std::io::Error),

    /// Transport failure while fetching the count page.
    #[error("count page fetch failed: {0}")]
    CountFetch(#[source] FetchError),

    /// Transport failure while fetching a result page.
    #[error("result page fetch failed: {0}")]
    PageFetch(#[source] FetchError),
}

impl PipelineError {
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::ScratchCreate(_) => 1,
            PipelineError::Backup(_) => 2,
            PipelineError::ListWrite(_) => 3,
            PipelineError::CountFetch(_) => 4,
            PipelineError::PageFetch(_) => 5,
        }
    }
}

// ── Tests ──
