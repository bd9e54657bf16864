use std::collections::VecDeque;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use std::sync::Arc;
use std::vec;

use tracing::debug;

use crate::entry::WalkEntry;
use crate::error::RambleError;
use crate::pattern::{MatchSet, SuffixFilter};
use crate::results::Found;
use crate::walker::{DirWalker, WalkerOptions};

// ---------------------------------------------------------------------------
// OnError
// ---------------------------------------------------------------------------

/// Handler for enumeration errors. Return `Ok(())` to skip the unreadable
/// directory, or an error to end the walk with it.
pub type ErrorHandler = Arc<dyn Fn(RambleError) -> Result<(), RambleError> + Send + Sync>;

/// What to do when a directory cannot be read.
#[derive(Clone, Default)]
pub enum OnError {
    /// Yield the error and end the walk.
    Propagate,

    /// Skip the directory and carry on.
    #[default]
    Skip,

    /// Let a handler decide.
    Handler(ErrorHandler),
}

impl OnError {
    pub fn handler<F>(f: F) -> Self
    where
        F: Fn(RambleError) -> Result<(), RambleError> + Send + Sync + 'static,
    {
        Self::Handler(Arc::new(f))
    }

    /// `Ok(())` if the walk should continue past `err`.
    fn dispatch(&self, err: RambleError) -> Result<(), RambleError> {
        match self {
            Self::Propagate => Err(err),
            Self::Skip => {
                debug!(error = %err, "skipping unreadable directory");
                Ok(())
            }
            Self::Handler(f) => f(err),
        }
    }
}

impl fmt::Debug for OnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Propagate => f.write_str("Propagate"),
            Self::Skip => f.write_str("Skip"),
            Self::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

// ---------------------------------------------------------------------------
// ResultShape
// ---------------------------------------------------------------------------

/// How each accepted name is turned into a [`Found`]. Fixed for a whole walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResultShape {
    pub relative:  bool,
    pub with_root: bool,
}

impl ResultShape {
    /// Resolve an unset `with_root`: pairs are produced only for relative
    /// output from more than one root.
    pub fn new(relative: bool, with_root: Option<bool>, root_count: usize) -> Self {
        Self {
            relative,
            with_root: with_root.unwrap_or(relative && root_count > 1),
        }
    }

    fn apply(&self, root: &Path, directory: &Path, name: &OsString) -> Found {
        let mut path = directory.join(name);
        if self.relative {
            if let Ok(rel) = path.strip_prefix(root) {
                path = rel.to_path_buf();
            }
        }
        if self.with_root {
            Found::Rooted {
                root: root.to_path_buf(),
                path,
            }
        } else {
            Found::Path(path)
        }
    }
}

// ---------------------------------------------------------------------------
// Walk
// ---------------------------------------------------------------------------

/// Everything the engine needs, validated by the builder.
pub(crate) struct EngineOptions {
    pub walker:      WalkerOptions,
    pub on_error:    OnError,
    pub include:     MatchSet,
    pub exclude:     MatchSet,
    pub suffixes:    Option<SuffixFilter>,
    pub directories: bool,
    pub shape:       ResultShape,
}

/// A lazy walk over one or more roots.
///
/// Created by [`WalkBuilder::run()`](crate::WalkBuilder::run). Roots are
/// walked one after another, in order. Each call to `next` lists at most
/// the directories needed to produce one item, and no directory handle is
/// held between calls, so dropping a `Walk` early is always clean.
///
/// Unreadable directories are skipped unless an [`OnError`] policy says
/// otherwise. Once an error is yielded the walk is over and `next` returns
/// `None`.
pub struct Walk {
    opts:    EngineOptions,
    roots:   vec::IntoIter<PathBuf>,
    current: Option<(PathBuf, DirWalker)>,
    ready:   VecDeque<Found>,
    done:    bool,
}

impl Walk {
    pub(crate) fn new(roots: Vec<PathBuf>, opts: EngineOptions) -> Self {
        Self {
            opts,
            roots: roots.into_iter(),
            current: None,
            ready: VecDeque::new(),
            done: false,
        }
    }

    /// Only the paths, dropping any roots.
    pub fn paths(self) -> impl Iterator<Item = Result<PathBuf, RambleError>> {
        self.map(|found| found.map(Found::into_path))
    }

    fn accepts(&self, is_dir: bool, name: &str, directory: &Path, root: &Path) -> bool {
        let opts = &self.opts;
        if !opts.include.matches(is_dir, name, directory, root) {
            return false;
        }
        if !is_dir {
            if let Some(suffixes) = &opts.suffixes {
                if !suffixes.accepts(name) {
                    return false;
                }
            }
        }
        !opts.exclude.matches(is_dir, name, directory, root)
    }

    /// Filter one listing, queue its output and, top-down, tell the walker
    /// which subdirectories to enter.
    fn process(&mut self, root: &Path, walker: &mut DirWalker, entry: WalkEntry) {
        let WalkEntry {
            directory,
            subdirs,
            files,
        } = entry;

        for name in &files {
            if self.accepts(false, &name.to_string_lossy(), &directory, root) {
                let found = self.opts.shape.apply(root, &directory, name);
                self.ready.push_back(found);
            }
        }

        let topdown = self.opts.walker.topdown;
        if !topdown && !self.opts.directories {
            return;
        }

        let accepted: Vec<OsString> = subdirs
            .into_iter()
            .filter(|name| {
                let name = format!("{}{MAIN_SEPARATOR}", name.to_string_lossy());
                self.accepts(true, &name, &directory, root)
            })
            .collect();

        if self.opts.directories {
            for name in &accepted {
                let found = self.opts.shape.apply(root, &directory, name);
                self.ready.push_back(found);
            }
        }

        if topdown {
            walker.descend(&directory, &accepted);
        }
    }
}

impl Iterator for Walk {
    type Item = Result<Found, RambleError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(found) = self.ready.pop_front() {
                return Some(Ok(found));
            }
            if self.done {
                return None;
            }

            let (root, mut walker) = match self.current.take() {
                Some(current) => current,
                None => match self.roots.next() {
                    Some(root) => {
                        debug!(root = %root.display(), "walking root");
                        let walker = DirWalker::new(root.clone(), self.opts.walker);
                        (root, walker)
                    }
                    None => {
                        self.done = true;
                        return None;
                    }
                },
            };

            match walker.next_entry() {
                Some(Ok(entry)) => {
                    self.process(&root, &mut walker, entry);
                    self.current = Some((root, walker));
                }
                Some(Err(err)) => {
                    if let Err(err) = self.opts.on_error.dispatch(err) {
                        self.done = true;
                        self.ready.clear();
                        return Some(Err(err));
                    }
                    self.current = Some((root, walker));
                }
                None => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_root_auto_resolution() {
        assert!(!ResultShape::new(false, None, 2).with_root);
        assert!(!ResultShape::new(true, None, 1).with_root);
        assert!(ResultShape::new(true, None, 2).with_root);
        assert!(ResultShape::new(false, Some(true), 1).with_root);
        assert!(!ResultShape::new(true, Some(false), 3).with_root);
    }

    #[test]
    fn shape_relative_pair() {
        let shape = ResultShape::new(true, None, 2);
        let found = shape.apply(Path::new("r"), Path::new("r/sub"), &OsString::from("f"));
        assert_eq!(
            found,
            Found::Rooted {
                root: PathBuf::from("r"),
                path: PathBuf::from("sub/f"),
            }
        );
    }

    #[test]
    fn shape_absolute_bare() {
        let shape = ResultShape::new(false, None, 1);
        let found = shape.apply(Path::new("r"), Path::new("r/sub"), &OsString::from("f"));
        assert_eq!(found, Found::Path(PathBuf::from("r/sub/f")));
    }

    #[test]
    fn on_error_dispatch() {
        let err = || RambleError::SymlinkLoop("x".into());
        assert!(OnError::Propagate.dispatch(err()).is_err());
        assert!(OnError::Skip.dispatch(err()).is_ok());
        let keep_going = OnError::handler(|e| if e.is_recoverable() { Ok(()) } else { Err(e) });
        assert!(keep_going.dispatch(err()).is_ok());
        let give_up = OnError::handler(Err);
        assert!(matches!(give_up.dispatch(err()), Err(RambleError::SymlinkLoop(_))));
    }

    #[test]
    fn skip_is_the_default() {
        assert!(matches!(OnError::default(), OnError::Skip));
    }
}
