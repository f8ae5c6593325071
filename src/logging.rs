//! Log output for the terminal UI
//!
//! stdout belongs to the UI, so log lines go to a file instead. Verbosity
//! follows `RUST_LOG` and defaults to `info`.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Installs a subscriber writing to `path`.
///
/// Returns `false` (and logs nothing) if the file cannot be opened or a
/// subscriber is already installed.
pub fn init_tracing(path: &Path) -> bool {
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }

    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unwritable_path_disables_logging() {
        let temp_dir = TempDir::new().unwrap();
        // A directory cannot be opened for appending
        assert!(!init_tracing(temp_dir.path()));
    }
}
