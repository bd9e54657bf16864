use std::path::{Path, PathBuf};

/// One item yielded by a [`Walk`](crate::Walk).
///
/// Whether items come paired with their root is decided once per walk; see
/// [`WalkBuilder::with_root`](crate::WalkBuilder::with_root).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Found {
    /// A bare path, absolute or relative to its root.
    Path(PathBuf),

    /// A path together with the root it was found under.
    Rooted { root: PathBuf, path: PathBuf },
}

impl Found {
    /// The yielded path.
    pub fn path(&self) -> &Path {
        match self {
            Self::Path(path) | Self::Rooted { path, .. } => path,
        }
    }

    /// The root, when the walk pairs items with their roots.
    pub fn root(&self) -> Option<&Path> {
        match self {
            Self::Rooted { root, .. } => Some(root),
            Self::Path(_) => None,
        }
    }

    pub fn into_path(self) -> PathBuf {
        match self {
            Self::Path(path) | Self::Rooted { path, .. } => path,
        }
    }

    /// `(root, path)`, or `None` for a bare path.
    pub fn into_pair(self) -> Option<(PathBuf, PathBuf)> {
        match self {
            Self::Rooted { root, path } => Some((root, path)),
            Self::Path(_) => None,
        }
    }
}
