use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("no writable activity log target could be opened")]
    NoWritableTarget,

    #[error("attempted to write to the activity journal before opening it")]
    JournalNotOpen,

    #[error("journal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
