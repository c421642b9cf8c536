//! Filter contract and the ordered chain evaluating it.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A single redaction rule.
///
/// `should_mask` decides whether a field is replaced wholesale; `replace`
/// rewrites substrings of textual values. The two channels are independent:
/// no filter observes another filter's masking decision.
///
/// Filters must be pure: no I/O, no panics. A panicking filter is a caller
/// bug and propagates to the log-call site.
pub trait Filter: Send + Sync {
    /// Rewrites a string value. The default keeps the input unchanged.
    fn replace(&self, s: String) -> String {
        s
    }

    /// Returns true when the value seen under `field` (with sensitivity
    /// `tag`, empty when absent) must be masked wholesale.
    fn should_mask(&self, field: &str, value: &dyn Any, tag: &str) -> bool;
}

/// Ordered set of filters.
///
/// Masking is the logical OR of all filters, short-circuiting on the first
/// match; rewrites compose left to right, each filter seeing the previous
/// filter's output.
#[derive(Clone, Default)]
pub struct FilterChain {
    filters: Vec<Arc<dyn Filter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter to the end of the chain.
    pub fn push(&mut self, filter: impl Filter + 'static) {
        self.filters.push(Arc::new(filter));
    }

    /// Builder-style [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, filter: impl Filter + 'static) -> Self {
        self.push(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn should_mask(&self, field: &str, value: &dyn Any, tag: &str) -> bool {
        self.filters
            .iter()
            .any(|filter| filter.should_mask(field, value, tag))
    }

    pub fn replace(&self, s: &str) -> String {
        self.filters
            .iter()
            .fold(s.to_owned(), |acc, filter| filter.replace(acc))
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("len", &self.filters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Suffix(&'static str);

    impl Filter for Suffix {
        fn replace(&self, s: String) -> String {
            s + self.0
        }

        fn should_mask(&self, _field: &str, _value: &dyn Any, _tag: &str) -> bool {
            false
        }
    }

    struct MaskField(&'static str);

    impl Filter for MaskField {
        fn should_mask(&self, field: &str, _value: &dyn Any, _tag: &str) -> bool {
            field == self.0
        }
    }

    #[test]
    fn test_empty_chain() {
        let chain = FilterChain::new();
        assert!(chain.is_empty());
        assert!(!chain.should_mask("password", &"x", ""));
        assert_eq!(chain.replace("hello"), "hello");
    }

    #[test]
    fn test_should_mask_is_or_of_filters() {
        let chain = FilterChain::new()
            .with(MaskField("password"))
            .with(MaskField("token"));

        assert!(chain.should_mask("password", &"x", ""));
        assert!(chain.should_mask("token", &"x", ""));
        assert!(!chain.should_mask("username", &"x", ""));
    }

    #[test]
    fn test_replace_composes_left_to_right() {
        let chain = FilterChain::new().with(Suffix("-a")).with(Suffix("-b"));
        assert_eq!(chain.replace("x"), "x-a-b");
    }
}
