use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::debug;

use crate::error::RambleError;
use crate::pattern::split;

/// Where a walk starts.
///
/// A string is split on the walk's separator; a path is a single root; a
/// list or iterator supplies the roots in order.
///
/// ```rust
/// use ramble::RootSpec;
/// use std::path::PathBuf;
///
/// let joined: RootSpec = "src,tests".into();
/// let single: RootSpec = PathBuf::from("src").into();
/// let listed: RootSpec = vec!["src", "tests"].into();
/// let lazy = RootSpec::from_iter(["src", "tests"].into_iter().map(PathBuf::from));
/// # let _ = (joined, single, listed, lazy);
/// ```
#[derive(Debug, Clone)]
pub enum RootSpec {
    Joined(String),
    Path(PathBuf),
    List(Vec<PathBuf>),
}

impl From<&str> for RootSpec {
    fn from(s: &str) -> Self {
        Self::Joined(s.to_owned())
    }
}

impl From<String> for RootSpec {
    fn from(s: String) -> Self {
        Self::Joined(s)
    }
}

impl From<&Path> for RootSpec {
    fn from(p: &Path) -> Self {
        Self::Path(p.to_path_buf())
    }
}

impl From<PathBuf> for RootSpec {
    fn from(p: PathBuf) -> Self {
        Self::Path(p)
    }
}

impl From<&PathBuf> for RootSpec {
    fn from(p: &PathBuf) -> Self {
        Self::Path(p.clone())
    }
}

impl<P: Into<PathBuf>> From<Vec<P>> for RootSpec {
    fn from(v: Vec<P>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<P: Into<PathBuf>, const N: usize> From<[P; N]> for RootSpec {
    fn from(v: [P; N]) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for RootSpec {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::List(iter.into_iter().map(Into::into).collect())
    }
}

impl RootSpec {
    /// The roots in order, with `~` expanded, before any existence check.
    pub fn paths(&self, separator: &str) -> Vec<PathBuf> {
        match self {
            Self::Joined(s) => split(s, separator).map(|p| expand_home(Path::new(p))).collect(),
            Self::Path(p) => vec![expand_home(p)],
            Self::List(v) => v.iter().map(|p| expand_home(p)).collect(),
        }
    }
}

/// Resolved roots for one walk.
#[derive(Debug, Clone)]
pub(crate) struct Roots {
    /// Roots that will be walked, in order.
    pub paths:     Vec<PathBuf>,

    /// How many roots were specified, including any that were dropped.
    pub specified: usize,
}

/// Expand and validate a root spec.
///
/// Every root is checked before anything is walked, and all missing ones
/// are reported together. With `ignore_missing` they are dropped instead.
pub(crate) fn resolve(
    spec: &RootSpec,
    separator: &str,
    ignore_missing: bool,
) -> Result<Roots, RambleError> {
    let all = spec.paths(separator);
    let specified = all.len();
    let (paths, missing): (Vec<_>, Vec<_>) = all.into_iter().partition(|p| p.exists());

    if !missing.is_empty() {
        if !ignore_missing {
            return Err(RambleError::root_not_found(missing, separator));
        }
        debug!(?missing, "dropping missing roots");
    }

    debug!(roots = ?paths, "resolved roots");
    Ok(Roots { paths, specified })
}

/// Replace a leading `~` with the current user's home directory.
///
/// Only a bare `~` component is expanded. `~user` forms name another
/// user's home, which is not looked up, so they are returned unchanged.
/// Everything is returned unchanged when no home directory can be
/// determined.
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    let is_tilde = matches!(
        components.next(),
        Some(std::path::Component::Normal(first)) if first == "~"
    );
    if !is_tilde {
        return path.to_path_buf();
    }

    match BaseDirs::new() {
        Some(dirs) => dirs.home_dir().join(components.as_path()),
        None => path.to_path_buf(),
    }
}
