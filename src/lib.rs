//! Protracker - a personal productivity tracker for the command line.
//!
//! State lives in one JSON document per user (see [`store`]); everything
//! else - due badges, streaks, analytics, the calendar grid - is derived
//! from it on demand (see [`stats`] and [`calendar`]).

pub mod calendar;
pub mod cli;
pub mod commands;
pub mod models;
pub mod stats;
pub mod store;
pub mod timer;

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::store::Store;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// A disposable data directory for store tests.
    pub struct TestEnv {
        data_dir: TempDir,
    }

    impl TestEnv {
        pub fn new() -> Self {
            Self {
                data_dir: TempDir::new().unwrap(),
            }
        }

        pub fn data_path(&self) -> PathBuf {
            self.data_dir.path().to_path_buf()
        }

        pub fn open_store(&self) -> Store {
            Store::open(self.data_dir.path()).unwrap()
        }
    }
}

/// Errors that can occur in protracker operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("{0}")]
    Other(String),
}

/// Result type for protracker operations.
pub type Result<T> = std::result::Result<T, Error>;
