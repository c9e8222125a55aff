//! Stable error codes shared by every layer that reports errors outward.

/// Maps a typed error onto a stable machine-readable code.
pub trait ErrorCode {
    /// Short `E_*` code suitable for clients and log filters.
    fn error_code(&self) -> &'static str;

    /// Whether repeating the same operation later could succeed.
    fn retryable(&self) -> bool {
        false
    }
}
