//! ``src/fs/path_resolver.rs``
//!
//! Path arithmetic for the remote tree. Paths are plain `/`-separated
//! strings owned by the backend, so this never touches the local filesystem.

pub const SEPARATOR: char = '/';
pub const ROOT: &str = "/";

/// Returns the parent of `path`, with the root as a fixed point.
///
/// The last segment is dropped and the rest rejoined. When fewer than two
/// segments remain the result is [`ROOT`], so `parent_of("/")` and
/// `parent_of("/home")` are both `"/"`.
#[must_use]
pub fn parent_of(path: &str) -> String {
    let mut segments: Vec<&str> = path.split(SEPARATOR).collect();
    segments.pop();

    if segments.len() > 1 {
        segments.join("/")
    } else {
        ROOT.to_string()
    }
}

#[inline]
#[must_use]
pub fn is_root(path: &str) -> bool {
    path == ROOT
}
