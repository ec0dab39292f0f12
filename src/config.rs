use crate::journal::Target;
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;

/// Overrides the journal destination when set to a non-empty path.
pub const ACTIVITY_PATH_ENV: &str = "TRACKER_ACTIVITY_PATH";

/// Journal filename used by every non-override candidate.
pub const ACTIVITY_FILE: &str = "activity.jsonl";

/// Ordered journal targets, highest priority first:
///
/// 1. the `TRACKER_ACTIVITY_PATH` override, when set and non-empty;
/// 2. the shared `data-backend` log directory as seen from the source and
///    build working directories;
/// 3. the per-user data directory;
/// 4. a bare filename in the current directory, as last resort.
pub fn default_targets() -> Vec<Target> {
    let mut targets = Vec::new();

    if let Some(path) = env::var_os(ACTIVITY_PATH_ENV).filter(|v| !v.is_empty()) {
        targets.push(Target::Path(PathBuf::from(path)));
    }

    let mut fallbacks = vec![
        PathBuf::from("../../data-backend").join(ACTIVITY_FILE),
        PathBuf::from("../data-backend").join(ACTIVITY_FILE),
    ];
    if let Some(dir) = user_data_dir() {
        fallbacks.push(dir.join(ACTIVITY_FILE));
    }
    fallbacks.push(PathBuf::from(ACTIVITY_FILE));
    targets.push(Target::PathList(fallbacks));

    targets
}

fn user_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "vigil", "Vigil").map(|dirs| dirs.data_dir().to_path_buf())
}
