//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Replica keys, service ids and on-disk locations all go through this type so
/// that the same definition file has the same identity on every machine.
/// `.` components are dropped, `..` components are resolved lexically and
/// never escape the start of a relative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str.replace('\\', "/")),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.is_empty() {
            segment_normalized
        } else if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self {
            inner: clean(&joined),
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Strip a trailing `.<extension>` from the final component, if present.
    pub fn without_extension(&self) -> Self {
        match self.extension() {
            Some(ext) => Self {
                inner: self.inner[..self.inner.len() - ext.len() - 1].to_string(),
            },
            None => self.clone(),
        }
    }

    /// Express this path relative to `base`, if it lies underneath it.
    pub fn strip_prefix(&self, base: &NormalizedPath) -> Option<Self> {
        let prefix = base.inner.trim_end_matches('/');
        let rest = self.inner.strip_prefix(prefix)?;
        let rest = rest.strip_prefix('/')?;
        if rest.is_empty() {
            return None;
        }
        Some(Self {
            inner: rest.to_string(),
        })
    }

    /// Whether the path is rooted (`/x`, `//server/x` or a drive letter).
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/')
            || self.inner.as_bytes().get(1) == Some(&b':')
    }

    /// A relative path with at least one component.
    ///
    /// Keys coming from a remote replica must satisfy this before they are
    /// joined onto a local directory.
    pub fn is_safe_relative(&self) -> bool {
        !self.inner.is_empty() && !self.is_absolute()
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

/// Lexically clean a forward-slash path.
fn clean(path: &str) -> String {
    let network = path.starts_with("//") && !path.starts_with("///");
    let rooted = path.starts_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }

    let body = parts.join("/");
    if network {
        format!("//{}", body)
    } else if rooted {
        format!("/{}", body)
    } else {
        body
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
