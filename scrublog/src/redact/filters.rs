//! Built-in filters: field name, field prefix, concrete type, value
//! substring, sensitivity tag and regex patterns.

use super::filter::Filter;
use crate::FILTERED_LABEL;
use regex::Regex;
use std::any::{Any, TypeId};

/// Masks fields whose name matches exactly.
pub struct FieldFilter {
    target: String,
}

impl FieldFilter {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl Filter for FieldFilter {
    fn should_mask(&self, field: &str, _value: &dyn Any, _tag: &str) -> bool {
        self.target == field
    }
}

/// Masks fields whose name starts with the prefix.
pub struct FieldPrefixFilter {
    prefix: String,
}

impl FieldPrefixFilter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Filter for FieldPrefixFilter {
    fn should_mask(&self, field: &str, _value: &dyn Any, _tag: &str) -> bool {
        field.starts_with(&self.prefix)
    }
}

/// Masks every value of one concrete type, regardless of field name.
///
/// ```
/// use scrublog::redact::TypeFilter;
///
/// struct ApiKey(String);
/// let filter = TypeFilter::of::<ApiKey>();
/// ```
pub struct TypeFilter {
    target: TypeId,
}

impl TypeFilter {
    pub fn of<T: 'static>() -> Self {
        Self {
            target: TypeId::of::<T>(),
        }
    }
}

impl Filter for TypeFilter {
    fn should_mask(&self, _field: &str, value: &dyn Any, _tag: &str) -> bool {
        value.type_id() == self.target
    }
}

/// Rewrites occurrences of a fixed substring with the sentinel label.
///
/// This filter never masks a whole field; a string value that consists
/// entirely of the target still ends up fully replaced by the rewrite.
pub struct ValueFilter {
    target: String,
}

impl ValueFilter {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl Filter for ValueFilter {
    fn replace(&self, s: String) -> String {
        s.replace(&self.target, FILTERED_LABEL)
    }

    fn should_mask(&self, _field: &str, _value: &dyn Any, _tag: &str) -> bool {
        false
    }
}

/// Masks fields declared with a matching sensitivity tag, e.g.
/// `#[redact(tag = "secure")]` on a derived struct.
///
/// An absent tag is an empty tag and never matches.
pub struct TagFilter {
    tag: String,
}

impl TagFilter {
    /// Matches the conventional `"secure"` tag.
    pub fn new() -> Self {
        Self::with_tag("secure")
    }

    pub fn with_tag(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl Default for TagFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for TagFilter {
    fn should_mask(&self, _field: &str, _value: &dyn Any, tag: &str) -> bool {
        !tag.is_empty() && self.tag == tag
    }
}

/// Rewrites regex matches with the sentinel label.
pub struct PatternFilter {
    patterns: Vec<Regex>,
}

impl PatternFilter {
    pub fn new(pattern: Regex) -> Self {
        Self {
            patterns: vec![pattern],
        }
    }

    pub fn with_patterns(patterns: Vec<Regex>) -> Self {
        Self { patterns }
    }

    /// Dashed phone number formats, e.g. `090-1234-5678`.
    pub fn phone_number() -> Self {
        Self::new(Regex::new("[0-9]{2,4}-[0-9]{2,4}-[0-9]{4}").expect("static pattern compiles"))
    }
}

impl Filter for PatternFilter {
    fn replace(&self, s: String) -> String {
        self.patterns
            .iter()
            .fold(s, |acc, pattern| {
                pattern.replace_all(&acc, FILTERED_LABEL).into_owned()
            })
    }

    fn should_mask(&self, _field: &str, _value: &dyn Any, _tag: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_filter_exact_match() {
        let filter = FieldFilter::new("password");
        assert!(filter.should_mask("password", &"x", ""));
        assert!(!filter.should_mask("password_hint", &"x", ""));
    }

    #[test]
    fn test_field_prefix_filter() {
        let filter = FieldPrefixFilter::new("secret_");
        assert!(filter.should_mask("secret_token", &"x", ""));
        assert!(!filter.should_mask("token", &"x", ""));
    }

    #[test]
    fn test_type_filter_matches_concrete_type() {
        struct ApiKey(#[allow(dead_code)] String);

        let filter = TypeFilter::of::<ApiKey>();
        let key = ApiKey("k".to_owned());
        assert!(filter.should_mask("anything", &key, ""));
        assert!(!filter.should_mask("anything", &"not a key", ""));
    }

    #[test]
    fn test_value_filter_rewrites_only() {
        let filter = ValueFilter::new("token1");
        assert!(!filter.should_mask("authorization", &"token1", ""));
        assert_eq!(
            filter.replace("Bearer token1".to_owned()),
            format!("Bearer {FILTERED_LABEL}")
        );
    }

    #[test]
    fn test_tag_filter_ignores_empty_tag() {
        let filter = TagFilter::new();
        assert!(filter.should_mask("f", &"x", "secure"));
        assert!(!filter.should_mask("f", &"x", ""));
        assert!(!filter.should_mask("f", &"x", "public"));
    }

    #[test]
    fn test_pattern_filter_phone_number() {
        let filter = PatternFilter::phone_number();
        assert_eq!(
            filter.replace("call 090-1234-5678 now".to_owned()),
            format!("call {FILTERED_LABEL} now")
        );
    }
}
