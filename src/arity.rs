//! Argument-count adaptation for dynamic predicates.
//!
//! Predicates are called with up to three arguments, always in the order
//! `(name, directory, root)`. A predicate written against fewer of them
//! receives only the leading ones. For typed closures the count is fixed by
//! the closure's type; for dynamic predicates it is derived from a declared
//! [`Signature`] by [`param_count`].

use crate::error::RambleError;

/// Number of canonical predicate arguments: name, directory, root.
pub const MAX_ARGS: usize = 3;

/// How a declared parameter binds its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// An ordinary positional parameter.
    Positional,

    /// A tail that soaks up any number of positional arguments.
    VarPositional,

    /// Only reachable by keyword. Predicates never receive one.
    KeywordOnly,

    /// Arbitrary keyword arguments. Predicates never receive one.
    VarKeyword,
}

/// One declared parameter of a dynamic predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub kind:        ParamKind,
    pub has_default: bool,
}

impl Param {
    pub fn required() -> Self {
        Self { kind: ParamKind::Positional, has_default: false }
    }

    pub fn optional() -> Self {
        Self { kind: ParamKind::Positional, has_default: true }
    }

    pub fn variadic() -> Self {
        Self { kind: ParamKind::VarPositional, has_default: false }
    }

    pub fn keyword_only() -> Self {
        Self { kind: ParamKind::KeywordOnly, has_default: false }
    }

    pub fn var_keyword() -> Self {
        Self { kind: ParamKind::VarKeyword, has_default: false }
    }
}

/// The declared parameter list of a dynamic predicate, in order.
///
/// ```rust
/// use ramble::{param_count, Signature};
///
/// let sig = Signature::new().required().optional();
/// assert_eq!(param_count(&sig).unwrap(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    params: Vec<Param>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// `n` required positional parameters.
    pub fn positional(n: usize) -> Self {
        Self { params: vec![Param::required(); n] }
    }

    pub fn param(mut self, p: Param) -> Self {
        self.params.push(p);
        self
    }

    pub fn required(self) -> Self {
        self.param(Param::required())
    }

    pub fn optional(self) -> Self {
        self.param(Param::optional())
    }

    pub fn variadic(self) -> Self {
        self.param(Param::variadic())
    }

    pub fn keyword_only(self) -> Self {
        self.param(Param::keyword_only())
    }

    pub fn var_keyword(self) -> Self {
        self.param(Param::var_keyword())
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }
}

impl FromIterator<Param> for Signature {
    fn from_iter<I: IntoIterator<Item = Param>>(iter: I) -> Self {
        Self { params: iter.into_iter().collect() }
    }
}

/// How many leading `(name, directory, root)` arguments a predicate with
/// this signature should receive.
///
/// Keyword parameters stop the count at their position. A variadic tail
/// takes all three. Positional parameters past the third are ignored when
/// they have defaults.
///
/// # Errors
///
/// [`RambleError::InvalidMatcherArity`] if a fourth or later positional
/// parameter has no default.
pub fn param_count(sig: &Signature) -> Result<usize, RambleError> {
    for (i, p) in sig.params.iter().enumerate() {
        match p.kind {
            ParamKind::KeywordOnly | ParamKind::VarKeyword => return Ok(i),
            ParamKind::VarPositional => return Ok(MAX_ARGS),
            ParamKind::Positional if i >= MAX_ARGS => {
                if p.has_default {
                    return Ok(MAX_ARGS);
                }
                return Err(RambleError::InvalidMatcherArity {
                    required: required_positionals(sig),
                });
            }
            ParamKind::Positional => {}
        }
    }

    Ok(sig.params.len().min(MAX_ARGS))
}

fn required_positionals(sig: &Signature) -> usize {
    sig.params
        .iter()
        .take_while(|p| p.kind == ParamKind::Positional)
        .filter(|p| !p.has_default)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(sig: Signature) -> usize {
        param_count(&sig).unwrap()
    }

    #[test]
    fn fixed_positionals() {
        assert_eq!(count(Signature::positional(0)), 0);
        assert_eq!(count(Signature::positional(1)), 1);
        assert_eq!(count(Signature::positional(2)), 2);
        assert_eq!(count(Signature::positional(3)), 3);
        assert!(matches!(
            param_count(&Signature::positional(4)),
            Err(RambleError::InvalidMatcherArity { required: 4 })
        ));
    }

    #[test]
    fn variadic_tail_takes_everything() {
        assert_eq!(count(Signature::new().variadic()), 3);
        assert_eq!(count(Signature::positional(1).variadic()), 3);
        assert_eq!(count(Signature::positional(2).variadic()), 3);
        assert_eq!(count(Signature::positional(3).variadic()), 3);
        assert!(param_count(&Signature::positional(4).variadic()).is_err());
    }

    #[test]
    fn defaults() {
        assert_eq!(count(Signature::new().optional()), 1);
        assert_eq!(count(Signature::new().optional().optional()), 2);
        assert_eq!(count(Signature::new().optional().optional().optional()), 3);
        assert_eq!(count(Signature::new().optional().optional().optional().optional()), 3);
        assert_eq!(count(Signature::positional(3).optional()), 3);
    }

    #[test]
    fn builder_records_params_in_order() {
        let sig = Signature::positional(1).optional().keyword_only();
        assert_eq!(
            sig.params(),
            &[Param::required(), Param::optional(), Param::keyword_only()]
        );
        let rebuilt: Signature = sig.params().iter().copied().collect();
        assert_eq!(rebuilt, sig);
    }

    #[test]
    fn keywords_stop_counting() {
        assert_eq!(count(Signature::new().keyword_only()), 0);
        assert_eq!(count(Signature::positional(1).keyword_only()), 1);
        assert_eq!(count(Signature::positional(2).var_keyword()), 2);
    }
}
