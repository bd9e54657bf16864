//! Ready-made predicates.
//!
//! Directory names reach predicates with a trailing path separator, so
//! `names(["__pycache__/"])` only ever matches a directory.

use std::path::Path;

use crate::pattern::{Matcher, Patterns};
use crate::predicate::Predicate;

/// Matches names starting with `.`. This is the default exclusion.
pub fn dotfile() -> Predicate {
    Predicate::new(|name: &str| name.starts_with('.'))
}

/// Matches any of the given names exactly.
pub fn names<I, S>(names: I) -> Predicate
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    Predicate::new(move |name: &str| names.iter().any(|n| n == name))
}

/// Matches any of the given names, but only directly inside the root.
pub fn root_names<I, S>(names: I) -> Predicate
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    Predicate::new(move |name: &str, directory: &Path, root: &Path| {
        directory == root && names.iter().any(|n| n == name)
    })
}

/// Matches names ending with any of the given suffixes.
pub fn suffixes<I, S>(suffixes: I) -> Predicate
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let suffixes: Vec<String> = suffixes.into_iter().map(Into::into).collect();
    Predicate::new(move |name: &str| suffixes.iter().any(|s| name.ends_with(s.as_str())))
}

/// Negates a predicate.
pub fn inv(p: Predicate) -> Predicate {
    p.negate()
}

/// Generated files in a Python project: dotfiles, `build/`, `dist/` and
/// `htmlcov/` at the top level, `*.egg-info/` and `__pycache__/` anywhere,
/// and compiled `*.pyc` files.
pub fn python_excludes() -> Patterns {
    let sep = std::path::MAIN_SEPARATOR;
    let dir = |name: &str| format!("{name}{sep}");

    Patterns::List(vec![
        Matcher::Predicate(dotfile()),
        Matcher::Predicate(root_names([dir("build"), dir("dist"), dir("htmlcov")])),
        Matcher::Predicate(suffixes([dir(".egg-info"), ".pyc".to_owned()])),
        Matcher::Predicate(names([dir("__pycache__")])),
    ])
}
