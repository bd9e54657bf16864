use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RambleError {
    // Validation
    #[error("no such {}: {}", directory_noun(.missing.len()), .joined)]
    RootNotFound {
        missing: Vec<PathBuf>,
        joined:  String,
    },

    #[error("patterns can have at most 3 arguments, found {required} required")]
    InvalidMatcherArity { required: usize },

    #[error("invalid pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    // Traversal
    #[error("cannot read directory {}", .path.display())]
    Enumeration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("symlink loop at {}", .0.display())]
    SymlinkLoop(PathBuf),
}

impl RambleError {
    /// Builds a `RootNotFound` naming every missing root, joined with `separator`.
    pub(crate) fn root_not_found(missing: Vec<PathBuf>, separator: &str) -> Self {
        let joined = missing
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(separator);
        Self::RootNotFound { missing, joined }
    }

    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Enumeration { path, .. } | Self::SymlinkLoop(path) => Some(path),
            Self::RootNotFound { missing, .. } => missing.first(),
            _ => None,
        }
    }

    /// Whether the walk can continue past this error.
    ///
    /// Enumeration failures and symlink loops only lose one subtree, so an
    /// [`OnError`](crate::OnError) handler may swallow them. Validation
    /// errors are raised by [`run()`](crate::WalkBuilder::run) before any
    /// output exists.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Enumeration { .. } | Self::SymlinkLoop(_))
    }
}

fn directory_noun(count: usize) -> &'static str {
    if count == 1 {
        "directory"
    } else {
        "directories"
    }
}
