use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::arity::{param_count, Signature};
use crate::error::RambleError;

/// One argument handed to a dynamic predicate.
///
/// A dynamic predicate receives a prefix of `[Name, Directory, Root]`,
/// trimmed to the count its [`Signature`] allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    /// The entry name. Directory names carry a trailing path separator.
    Name(&'a str),

    /// The directory containing the entry.
    Directory(&'a Path),

    /// The root the entry was found under.
    Root(&'a Path),
}

impl<'a> Arg<'a> {
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::Name(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&'a Path> {
        match self {
            Self::Directory(p) | Self::Root(p) => Some(p),
            Self::Name(_) => None,
        }
    }
}

/// A matcher function after argument adaptation: always `(name, directory, root)`.
pub(crate) type MatchFn = Arc<dyn Fn(&str, &Path, &Path) -> bool + Send + Sync>;

type DynFn = Arc<dyn Fn(&[Arg<'_>]) -> bool + Send + Sync>;

#[derive(Clone)]
enum Body {
    Typed { arity: usize, f: MatchFn },
    Dynamic { sig: Signature, f: DynFn },
}

/// A callable matcher.
///
/// Build one from a typed closure with [`Predicate::new`], or from a
/// declared [`Signature`] with [`Predicate::dynamic`]. Either way the
/// predicate is never told whether it is testing a file or a directory.
///
/// # Example
///
/// ```rust
/// use ramble::Predicate;
/// use std::path::Path;
///
/// let by_name = Predicate::new(|name: &str| name.ends_with(".rs"));
/// let in_root = Predicate::new(|_name: &str, dir: &Path, root: &Path| dir == root);
/// assert_eq!(by_name.arity().unwrap(), 1);
/// assert_eq!(in_root.arity().unwrap(), 3);
/// ```
#[derive(Clone)]
pub struct Predicate {
    body: Body,
}

impl Predicate {
    /// Wrap a closure taking zero to three of `(name, directory, root)`.
    pub fn new<M>(f: impl IntoPredicate<M>) -> Self {
        f.into_predicate()
    }

    /// Wrap a predicate whose parameter list is only known at runtime.
    ///
    /// The argument count is resolved from `sig` when the predicate is
    /// compiled into a match set; an unusable signature fails the walk's
    /// [`run()`](crate::WalkBuilder::run) with
    /// [`RambleError::InvalidMatcherArity`].
    pub fn dynamic<F>(sig: Signature, f: F) -> Self
    where
        F: Fn(&[Arg<'_>]) -> bool + Send + Sync + 'static,
    {
        Self {
            body: Body::Dynamic { sig, f: Arc::new(f) },
        }
    }

    /// How many leading arguments this predicate is called with.
    pub fn arity(&self) -> Result<usize, RambleError> {
        match &self.body {
            Body::Typed { arity, .. } => Ok(*arity),
            Body::Dynamic { sig, .. } => param_count(sig),
        }
    }

    /// Negate this predicate.
    pub fn negate(self) -> Self {
        match self.body {
            Body::Typed { arity, f } => Self::typed(arity, move |n, d, r| !f(n, d, r)),
            Body::Dynamic { sig, f } => Self::dynamic(sig, move |args| !f(args)),
        }
    }

    /// Adapt to the uniform three-argument form.
    pub(crate) fn adapt(&self) -> Result<MatchFn, RambleError> {
        match &self.body {
            Body::Typed { f, .. } => Ok(Arc::clone(f)),
            Body::Dynamic { sig, f } => {
                let count = param_count(sig)?;
                let f = Arc::clone(f);
                Ok(Arc::new(move |name: &str, directory: &Path, root: &Path| {
                    let args = [Arg::Name(name), Arg::Directory(directory), Arg::Root(root)];
                    f(&args[..count])
                }))
            }
        }
    }

    fn typed<F>(arity: usize, f: F) -> Self
    where
        F: Fn(&str, &Path, &Path) -> bool + Send + Sync + 'static,
    {
        Self {
            body: Body::Typed { arity, f: Arc::new(f) },
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            Body::Typed { arity, .. } => f.debug_struct("Predicate").field("arity", arity).finish(),
            Body::Dynamic { sig, .. } => f.debug_struct("Predicate").field("signature", sig).finish(),
        }
    }
}

// ---------------------------------------------------------------------------
// IntoPredicate
// ---------------------------------------------------------------------------

/// Closures usable as predicates.
///
/// Implemented for `Fn() -> bool`, `Fn(&str) -> bool`,
/// `Fn(&str, &Path) -> bool` and `Fn(&str, &Path, &Path) -> bool`. The
/// marker `M` only exists to keep those impls apart; annotate closure
/// parameter types so the right one is picked.
pub trait IntoPredicate<M> {
    fn into_predicate(self) -> Predicate;
}

impl IntoPredicate<Predicate> for Predicate {
    fn into_predicate(self) -> Predicate {
        self
    }
}

impl<F> IntoPredicate<fn() -> bool> for F
where
    F: Fn() -> bool + Send + Sync + 'static,
{
    fn into_predicate(self) -> Predicate {
        Predicate::typed(0, move |_, _, _| self())
    }
}

impl<F> IntoPredicate<fn(&str) -> bool> for F
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    fn into_predicate(self) -> Predicate {
        Predicate::typed(1, move |name, _, _| self(name))
    }
}

impl<F> IntoPredicate<fn(&str, &Path) -> bool> for F
where
    F: Fn(&str, &Path) -> bool + Send + Sync + 'static,
{
    fn into_predicate(self) -> Predicate {
        Predicate::typed(2, move |name, directory, _| self(name, directory))
    }
}

impl<F> IntoPredicate<fn(&str, &Path, &Path) -> bool> for F
where
    F: Fn(&str, &Path, &Path) -> bool + Send + Sync + 'static,
{
    fn into_predicate(self) -> Predicate {
        Predicate::typed(3, self)
    }
}
