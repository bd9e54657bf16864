//! # ramble
//!
//! A better directory walk: shell globs and predicates for including and
//! excluding names, several roots in one pass, sorted output, relative
//! paths, and a choice of top-down or bottom-up order.
//!
//! ramble owns the walk engine, the pattern compiler and the builder API.
//! Listing a single directory is delegated to `walkdir`; glob compilation
//! to `globset`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! for path in ramble::walk("src,tests").include("*.rs").run()?.paths() {
//!     println!("{}", path?.display());
//! }
//! # Ok::<(), ramble::RambleError>(())
//! ```
//!
//! # Matching
//!
//! A name is yielded when it matches `include` and does not match
//! `exclude`. Both accept globs, predicates, or a list of either:
//!
//! ```rust,no_run
//! use ramble::{Matcher, Predicate};
//! use std::path::Path;
//!
//! let walk = ramble::walk(".")
//!     .include(vec![
//!         Matcher::from("*.toml"),
//!         Matcher::from(Predicate::new(|name: &str| name == "Makefile")),
//!     ])
//!     .exclude(Predicate::new(|name: &str, dir: &Path, root: &Path| {
//!         dir == root && name == "target/"
//!     }))
//!     .run()?;
//! # Ok::<(), ramble::RambleError>(())
//! ```
//!
//! Globs are matched against the containing directory joined with the
//! name, and `*` crosses path separators. Directories are tested with a
//! trailing separator, so `*/build/` matches only directories. Predicates
//! take up to three arguments, `(name, directory, root)`, and are told
//! nothing about whether the entry is a file or a directory.

#![forbid(unsafe_code)]

pub mod builtin;
pub mod walker;

mod arity;
mod builder;
mod engine;
mod entry;
mod error;
mod pattern;
mod predicate;
mod results;
mod roots;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use arity::{param_count, Param, ParamKind, Signature, MAX_ARGS};
pub use builder::{Suffixes, WalkBuilder, DEFAULT_SEPARATOR};
pub use engine::{ErrorHandler, OnError, Walk};
pub use entry::WalkEntry;
pub use error::RambleError;
pub use pattern::{MatchSet, Matcher, Patterns, SuffixFilter};
pub use predicate::{Arg, IntoPredicate, Predicate};
pub use results::Found;
pub use roots::{expand_home, RootSpec};

// ── Entry points ──────────────────────────────────────────────────────────────

/// Create a [`WalkBuilder`] over `roots`.
///
/// # Example
///
/// ```rust
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("a.txt"), "").unwrap();
/// std::fs::write(dir.path().join(".hidden"), "").unwrap();
///
/// let found: Vec<_> = ramble::walk(dir.path())
///     .relative(true)
///     .run()
///     .unwrap()
///     .paths()
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(found, vec![std::path::PathBuf::from("a.txt")]);
/// ```
pub fn walk(roots: impl Into<RootSpec>) -> WalkBuilder {
    WalkBuilder::new(roots)
}

/// Walk a Python project, skipping generated files.
///
/// Excludes [`builtin::python_excludes`]; every other option is left at
/// its default and can still be changed.
pub fn project_all(roots: impl Into<RootSpec>) -> WalkBuilder {
    walk(roots).exclude(builtin::python_excludes())
}

/// Walk the `*.py` files of a Python project, skipping generated files.
pub fn project_source(roots: impl Into<RootSpec>) -> WalkBuilder {
    project_all(roots).include("*.py")
}
