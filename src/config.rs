use std::path::PathBuf;

/// Run settings resolved in `main` and passed down explicitly; core logic
/// never reads ambient global state.
pub struct Config {
    /// Persisted descriptor-to-video match cache.
    pub cache_file: PathBuf,
    /// Append-only log of tracks that could not be matched.
    pub failure_log: PathBuf,
}
