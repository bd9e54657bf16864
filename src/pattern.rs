use std::collections::HashSet;
use std::path::{Path, MAIN_SEPARATOR};

use globset::GlobBuilder;

use crate::error::RambleError;
use crate::predicate::{MatchFn, Predicate};

// ---------------------------------------------------------------------------
// Matcher specs
// ---------------------------------------------------------------------------

/// One include or exclude rule.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// A shell-style glob, matched against the directory joined with the
    /// entry name. A trailing path separator makes it a directory-only glob.
    Glob(String),

    /// A callable, applied to files and directories alike.
    Predicate(Predicate),
}

impl From<&str> for Matcher {
    fn from(s: &str) -> Self {
        Self::Glob(s.to_owned())
    }
}

impl From<String> for Matcher {
    fn from(s: String) -> Self {
        Self::Glob(s)
    }
}

impl From<Predicate> for Matcher {
    fn from(p: Predicate) -> Self {
        Self::Predicate(p)
    }
}

/// The raw form of an include or exclude argument.
///
/// A string is split on the walk's separator into globs. A single
/// predicate or a list mixing globs and predicates is taken as is.
///
/// ```rust
/// use ramble::{Matcher, Patterns, Predicate};
///
/// let globs: Patterns = "*.rs,*.toml".into();
/// let mixed: Patterns = vec![
///     Matcher::from("*/target/"),
///     Matcher::from(Predicate::new(|name: &str| name.starts_with('.'))),
/// ].into();
/// # let _ = (globs, mixed);
/// ```
#[derive(Debug, Clone, Default)]
pub enum Patterns {
    /// No rules at all.
    #[default]
    None,

    /// Globs joined by the walk's separator.
    Joined(String),

    /// An explicit list of rules.
    List(Vec<Matcher>),
}

impl Patterns {
    /// Expand into individual matchers, splitting a joined string on `separator`.
    pub fn matchers(&self, separator: &str) -> Vec<Matcher> {
        match self {
            Self::None => Vec::new(),
            Self::Joined(s) => split(s, separator).map(Matcher::from).collect(),
            Self::List(v) => v.clone(),
        }
    }
}

impl From<&str> for Patterns {
    fn from(s: &str) -> Self {
        Self::Joined(s.to_owned())
    }
}

impl From<String> for Patterns {
    fn from(s: String) -> Self {
        Self::Joined(s)
    }
}

impl From<Predicate> for Patterns {
    fn from(p: Predicate) -> Self {
        Self::List(vec![Matcher::Predicate(p)])
    }
}

impl From<Matcher> for Patterns {
    fn from(m: Matcher) -> Self {
        Self::List(vec![m])
    }
}

impl<M: Into<Matcher>> From<Vec<M>> for Patterns {
    fn from(v: Vec<M>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<M: Into<Matcher>, const N: usize> From<[M; N]> for Patterns {
    fn from(v: [M; N]) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

pub(crate) fn split<'a>(s: &'a str, separator: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
    if separator.is_empty() {
        Box::new(std::iter::once(s))
    } else {
        Box::new(s.split(separator))
    }
}

// ---------------------------------------------------------------------------
// MatchSet
// ---------------------------------------------------------------------------

/// Compiled file and directory matchers for one role (include or exclude).
pub struct MatchSet {
    files:          Vec<MatchFn>,
    dirs:           Vec<MatchFn>,
    match_on_empty: bool,
}

impl MatchSet {
    /// Compile `patterns`, returning `match_on_empty` for any role left
    /// without matchers.
    ///
    /// # Errors
    ///
    /// [`RambleError::InvalidPattern`] for a glob that does not compile,
    /// [`RambleError::InvalidMatcherArity`] for a predicate whose signature
    /// cannot be adapted.
    pub fn compile(
        patterns: &Patterns,
        separator: &str,
        match_on_empty: bool,
    ) -> Result<Self, RambleError> {
        let mut set = Self {
            files: Vec::new(),
            dirs: Vec::new(),
            match_on_empty,
        };

        for m in patterns.matchers(separator) {
            match m {
                Matcher::Predicate(p) => {
                    let f = p.adapt()?;
                    set.files.push(f.clone());
                    set.dirs.push(f);
                }
                Matcher::Glob(g) => {
                    let f = compile_glob(&g)?;
                    if g.ends_with(MAIN_SEPARATOR) {
                        set.dirs.push(f);
                    } else {
                        set.files.push(f);
                    }
                }
            }
        }

        Ok(set)
    }

    /// Whether any matcher for this role accepts the entry.
    ///
    /// Directory names are expected with their trailing separator.
    pub fn matches(&self, is_dir: bool, name: &str, directory: &Path, root: &Path) -> bool {
        let matchers = if is_dir { &self.dirs } else { &self.files };
        if matchers.is_empty() {
            return self.match_on_empty;
        }
        matchers.iter().any(|m| m(name, directory, root))
    }
}

fn compile_glob(pattern: &str) -> Result<MatchFn, RambleError> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(false)
        .backslash_escape(false)
        .build()
        .map_err(|source| RambleError::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })?
        .compile_matcher();

    Ok(std::sync::Arc::new(move |name: &str, directory: &Path, _root: &Path| {
        glob.is_match(directory.join(name))
    }))
}

// ---------------------------------------------------------------------------
// Suffix filter
// ---------------------------------------------------------------------------

/// Required file extensions, AND-ed into the file include test.
///
/// Suffixes are compared with the final extension including its dot, so
/// `a.tar.gz` has suffix `.gz` and `.bashrc` has none. The empty string
/// stands for "no extension".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuffixFilter {
    suffixes: HashSet<String>,
}

impl SuffixFilter {
    /// Parse a suffix argument, splitting on `separator`. An empty string
    /// yields the single "no extension" suffix.
    pub fn parse(spec: &str, separator: &str) -> Self {
        Self {
            suffixes: split(spec, separator).map(str::to_owned).collect(),
        }
    }

    pub fn from_list<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn accepts(&self, name: &str) -> bool {
        let suffix = Path::new(name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        self.suffixes.contains(&suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(set: &MatchSet, is_dir: bool, name: &str) -> bool {
        set.matches(is_dir, name, Path::new("top/sub"), Path::new("top"))
    }

    #[test]
    fn empty_sets_return_default() {
        let inc = MatchSet::compile(&Patterns::None, ",", true).unwrap();
        let exc = MatchSet::compile(&Patterns::None, ",", false).unwrap();
        assert!(check(&inc, false, "a"));
        assert!(check(&inc, true, "a/"));
        assert!(!check(&exc, false, "a"));
        assert!(!check(&exc, true, "a/"));
    }

    #[test]
    fn globs_match_joined_path() {
        let set = MatchSet::compile(&"*.py".into(), ",", true).unwrap();
        assert!(check(&set, false, "foo.py"));
        assert!(!check(&set, false, "foo.txt"));
        // No directory globs registered, so directories fall back to the default.
        assert!(check(&set, true, "foo.txt/"));
    }

    #[test]
    fn star_crosses_separators() {
        let set = MatchSet::compile(&"*/sub/x?".into(), ",", false).unwrap();
        assert!(check(&set, false, "x1"));
        assert!(!check(&set, false, "x12"));
    }

    #[test]
    fn trailing_separator_targets_directories() {
        let pattern = format!("*{MAIN_SEPARATOR}build{MAIN_SEPARATOR}");
        let set = MatchSet::compile(&pattern.as_str().into(), ",", false).unwrap();
        let build = format!("build{MAIN_SEPARATOR}");
        assert!(check(&set, true, &build));
        assert!(!check(&set, false, "build"));
    }

    #[test]
    fn joined_strings_split_on_separator() {
        let set = MatchSet::compile(&"*.a|*.b".into(), "|", false).unwrap();
        assert!(check(&set, false, "x.a"));
        assert!(check(&set, false, "x.b"));
        assert!(!check(&set, false, "x.c"));
    }

    #[test]
    fn character_classes() {
        let set = MatchSet::compile(&"*/[ab]*".into(), ",", false).unwrap();
        assert!(check(&set, false, "apple"));
        assert!(!check(&set, false, "cherry"));
        let neg = MatchSet::compile(&"*/[!ab]*".into(), ",", false).unwrap();
        assert!(check(&neg, false, "cherry"));
    }

    #[test]
    fn predicates_apply_to_both_roles() {
        let p = Predicate::new(|name: &str| name.starts_with('.'));
        let set = MatchSet::compile(&p.into(), ",", false).unwrap();
        assert!(check(&set, false, ".env"));
        assert!(check(&set, true, ".git/"));
        assert!(!check(&set, true, "src/"));
    }

    #[test]
    fn any_matcher_is_enough() {
        let patterns: Patterns = vec![
            Matcher::from("*.md"),
            Matcher::from(Predicate::new(|name: &str| name == "Makefile")),
        ]
        .into();
        let set = MatchSet::compile(&patterns, ",", false).unwrap();
        assert!(check(&set, false, "README.md"));
        assert!(check(&set, false, "Makefile"));
        assert!(!check(&set, false, "main.c"));
    }

    #[test]
    fn suffix_filter() {
        let py = SuffixFilter::parse(".py,.pyi", ",");
        assert!(py.accepts("foo.py"));
        assert!(py.accepts("foo.pyi"));
        assert!(!py.accepts("foo.txt"));
        assert!(!py.accepts("py"));

        let bare = SuffixFilter::parse("", ",");
        assert!(bare.accepts("Makefile"));
        assert!(bare.accepts(".bashrc"));
        assert!(!bare.accepts("main.c"));
    }
}
