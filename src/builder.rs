use std::sync::Arc;

use crate::builtin::dotfile;
use crate::engine::{EngineOptions, OnError, ResultShape, Walk};
use crate::error::RambleError;
use crate::pattern::{MatchSet, Patterns, SuffixFilter};
use crate::roots::{resolve, RootSpec};
use crate::walker::WalkerOptions;

/// Separator for joined roots, patterns and suffixes.
pub const DEFAULT_SEPARATOR: &str = ",";

// ---------------------------------------------------------------------------
// Suffix argument
// ---------------------------------------------------------------------------

/// The raw `suffix` argument: a joined string or an explicit list.
#[derive(Debug, Clone)]
pub enum Suffixes {
    Joined(String),
    List(Vec<String>),
}

impl From<&str> for Suffixes {
    fn from(s: &str) -> Self {
        Self::Joined(s.to_owned())
    }
}

impl From<String> for Suffixes {
    fn from(s: String) -> Self {
        Self::Joined(s)
    }
}

impl<S: Into<String>> From<Vec<S>> for Suffixes {
    fn from(v: Vec<S>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl Suffixes {
    fn compile(&self, separator: &str) -> SuffixFilter {
        match self {
            Self::Joined(s) => SuffixFilter::parse(s, separator),
            Self::List(v) => SuffixFilter::from_list(v.iter().cloned()),
        }
    }
}

// ---------------------------------------------------------------------------
// WalkBuilder
// ---------------------------------------------------------------------------

/// Configures a walk.
///
/// Created via [`ramble::walk()`](crate::walk). Chain options, then call
/// [`run()`](WalkBuilder::run) to validate everything and get the lazy
/// [`Walk`].
///
/// # Example
///
/// ```rust,no_run
/// let sources = ramble::walk("~/code/app,~/code/lib")
///     .include("*.rs")
///     .exclude("*/target/")
///     .relative(true)
///     .run()?;
///
/// for found in sources {
///     let found = found?;
///     println!("{:?} {}", found.root(), found.path().display());
/// }
/// # Ok::<(), ramble::RambleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WalkBuilder {
    roots:                RootSpec,
    topdown:              bool,
    follow_links:         bool,
    on_error:             OnError,
    include:              Patterns,
    exclude:              Patterns,
    directories:          bool,
    relative:             bool,
    with_root:            Option<bool>,
    sort:                 bool,
    suffix:               Option<Suffixes>,
    separator:            String,
    ignore_missing_roots: bool,
}

impl WalkBuilder {
    pub fn new(roots: impl Into<RootSpec>) -> Self {
        Self {
            roots:                roots.into(),
            topdown:              true,
            follow_links:         false,
            on_error:             OnError::default(),
            include:              Patterns::None,
            exclude:              Patterns::from(dotfile()),
            directories:          false,
            relative:             false,
            with_root:            None,
            sort:                 true,
            suffix:               None,
            separator:            DEFAULT_SEPARATOR.to_owned(),
            ignore_missing_roots: false,
        }
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Report directories before their contents (the default) or after.
    ///
    /// Top-down, excluded directories are not entered at all. Bottom-up,
    /// every directory is entered and exclusion only affects what is
    /// yielded.
    pub fn topdown(mut self, yes: bool) -> Self {
        self.topdown = yes;
        self
    }

    /// Enter symlinked directories. Off by default. Loops are reported as
    /// [`RambleError::SymlinkLoop`].
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }

    /// What to do with directories that cannot be read.
    pub fn on_error(mut self, policy: OnError) -> Self {
        self.on_error = policy;
        self
    }

    /// Shorthand for `.on_error(OnError::handler(f))`.
    pub fn on_error_with<F>(self, f: F) -> Self
    where
        F: Fn(RambleError) -> Result<(), RambleError> + Send + Sync + 'static,
    {
        self.on_error(OnError::Handler(Arc::new(f)))
    }

    /// Sort each directory's files and subdirectories by name. On by default.
    pub fn sort(mut self, yes: bool) -> Self {
        self.sort = yes;
        self
    }

    // ── Matching ──────────────────────────────────────────────────────────

    /// Names that must match. By default everything matches.
    pub fn include(mut self, patterns: impl Into<Patterns>) -> Self {
        self.include = patterns.into();
        self
    }

    /// Names that must not match. By default dotfiles are excluded; pass
    /// [`Patterns::None`] to exclude nothing.
    pub fn exclude(mut self, patterns: impl Into<Patterns>) -> Self {
        self.exclude = patterns.into();
        self
    }

    /// Files must also have one of these extensions, e.g. `".py"`. The empty
    /// string stands for files without an extension. Directories are not
    /// affected.
    pub fn suffix(mut self, suffixes: impl Into<Suffixes>) -> Self {
        self.suffix = Some(suffixes.into());
        self
    }

    // ── Output shape ──────────────────────────────────────────────────────

    /// Yield directories as well as files.
    pub fn directories(mut self, yes: bool) -> Self {
        self.directories = yes;
        self
    }

    /// Yield paths relative to their root instead of joined onto it.
    pub fn relative(mut self, yes: bool) -> Self {
        self.relative = yes;
        self
    }

    /// Pair each path with its root.
    ///
    /// When left unset, pairs are produced only for relative output from
    /// more than one root.
    pub fn with_root(mut self, yes: bool) -> Self {
        self.with_root = Some(yes);
        self
    }

    // ── Roots ─────────────────────────────────────────────────────────────

    /// Separator for joined roots, patterns and suffixes. Defaults to `,`.
    pub fn separator(mut self, sep: impl Into<String>) -> Self {
        self.separator = sep.into();
        self
    }

    /// Silently drop roots that do not exist instead of failing.
    pub fn ignore_missing_roots(mut self, yes: bool) -> Self {
        self.ignore_missing_roots = yes;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Validate the configuration and start the walk.
    ///
    /// Nothing is listed until the returned [`Walk`] is iterated.
    ///
    /// # Errors
    ///
    /// - [`RambleError::RootNotFound`] naming every missing root, unless
    ///   `.ignore_missing_roots(true)` is set.
    /// - [`RambleError::InvalidPattern`] for a glob that does not compile.
    /// - [`RambleError::InvalidMatcherArity`] for a dynamic predicate whose
    ///   signature cannot be adapted.
    pub fn run(self) -> Result<Walk, RambleError> {
        let sep = self.separator.as_str();
        let roots = resolve(&self.roots, sep, self.ignore_missing_roots)?;

        let include = MatchSet::compile(&self.include, sep, true)?;
        let exclude = MatchSet::compile(&self.exclude, sep, false)?;
        let suffixes = self.suffix.as_ref().map(|s| s.compile(sep));

        let opts = EngineOptions {
            walker: WalkerOptions {
                topdown:      self.topdown,
                follow_links: self.follow_links,
                sort:         self.sort,
            },
            on_error: self.on_error,
            include,
            exclude,
            suffixes,
            directories: self.directories,
            shape: ResultShape::new(self.relative, self.with_root, roots.specified),
        };

        Ok(Walk::new(roots.paths, opts))
    }
}
