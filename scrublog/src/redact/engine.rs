//! Type-preserving deep copy with masking.
//!
//! Every node asks the chain whether it must be masked wholesale; strings
//! additionally run the chain's substring rewrites; containers recurse while
//! keeping their exact concrete type. The input is never mutated.

use super::filter::FilterChain;
use crate::FILTERED_LABEL;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// A value the redaction engine can deep-copy.
///
/// `redact` returns a structurally identical, independently allocated copy
/// of `self` with masked parts replaced. `field` is the name under which the
/// value is being inspected: the attachment key at the root, the field name
/// inside structs, the key's textual form inside maps. `tag` is the declared
/// sensitivity tag, empty when absent; it does not propagate into collection
/// elements.
///
/// Implement via `#[derive(Redact)]` for struct payloads; implementations
/// for scalars, `String`, `Option`, `Box`, `Vec`, arrays and string-keyed
/// maps live here.
pub trait Redact: Sized + 'static {
    /// Replacement used when a filter masks this value wholesale: the
    /// sentinel label for textual types, the zero/empty value otherwise.
    fn masked() -> Self;

    /// Deep copy with the filter chain applied.
    fn redact(&self, filters: &FilterChain, field: &str, tag: &str) -> Self;
}

macro_rules! impl_redact_for_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Redact for $ty {
            fn masked() -> Self {
                <$ty>::default()
            }

            fn redact(&self, filters: &FilterChain, field: &str, tag: &str) -> Self {
                if filters.should_mask(field, self, tag) {
                    Self::masked()
                } else {
                    *self
                }
            }
        }
    )*};
}

impl_redact_for_scalar!(
    bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, ()
);

impl Redact for char {
    fn masked() -> Self {
        '\0'
    }

    fn redact(&self, filters: &FilterChain, field: &str, tag: &str) -> Self {
        if filters.should_mask(field, self, tag) {
            Self::masked()
        } else {
            *self
        }
    }
}

impl Redact for String {
    fn masked() -> Self {
        FILTERED_LABEL.to_owned()
    }

    fn redact(&self, filters: &FilterChain, field: &str, tag: &str) -> Self {
        if filters.should_mask(field, self, tag) {
            Self::masked()
        } else {
            filters.replace(self)
        }
    }
}

// Pointer-like layers are transparent: the pointee runs the mask check under
// the same field and tag, an absent pointee stays absent.
impl<T: Redact> Redact for Option<T> {
    fn masked() -> Self {
        None
    }

    fn redact(&self, filters: &FilterChain, field: &str, tag: &str) -> Self {
        self.as_ref().map(|value| value.redact(filters, field, tag))
    }
}

impl<T: Redact> Redact for Box<T> {
    fn masked() -> Self {
        Box::new(T::masked())
    }

    fn redact(&self, filters: &FilterChain, field: &str, tag: &str) -> Self {
        Box::new((**self).redact(filters, field, tag))
    }
}

// Elements keep the parent's field name; the tag is cleared.
impl<T: Redact> Redact for Vec<T> {
    fn masked() -> Self {
        Vec::new()
    }

    fn redact(&self, filters: &FilterChain, field: &str, tag: &str) -> Self {
        if filters.should_mask(field, self, tag) {
            return Self::masked();
        }
        self.iter()
            .map(|value| value.redact(filters, field, ""))
            .collect()
    }
}

impl<T: Redact, const N: usize> Redact for [T; N] {
    fn masked() -> Self {
        std::array::from_fn(|_| T::masked())
    }

    fn redact(&self, filters: &FilterChain, field: &str, tag: &str) -> Self {
        if filters.should_mask(field, self, tag) {
            return Self::masked();
        }
        std::array::from_fn(|i| self[i].redact(filters, field, ""))
    }
}

// Map entries recurse under the key's textual form; keys themselves are
// copied unchanged and never masked.
impl<K, V> Redact for HashMap<K, V>
where
    K: Clone + Eq + Hash + ToString + 'static,
    V: Redact,
{
    fn masked() -> Self {
        HashMap::new()
    }

    fn redact(&self, filters: &FilterChain, field: &str, tag: &str) -> Self {
        if filters.should_mask(field, self, tag) {
            return Self::masked();
        }
        self.iter()
            .map(|(key, value)| (key.clone(), value.redact(filters, &key.to_string(), "")))
            .collect()
    }
}

impl<K, V> Redact for BTreeMap<K, V>
where
    K: Clone + Ord + ToString + 'static,
    V: Redact,
{
    fn masked() -> Self {
        BTreeMap::new()
    }

    fn redact(&self, filters: &FilterChain, field: &str, tag: &str) -> Self {
        if filters.should_mask(field, self, tag) {
            return Self::masked();
        }
        self.iter()
            .map(|(key, value)| (key.clone(), value.redact(filters, &key.to_string(), "")))
            .collect()
    }
}

// Dynamic path: the same rules over a JSON tree. Used for values that are
// already type-erased, like normalized-error context.
impl Redact for serde_json::Value {
    fn masked() -> Self {
        serde_json::Value::Null
    }

    fn redact(&self, filters: &FilterChain, field: &str, tag: &str) -> Self {
        use serde_json::Value;

        if filters.should_mask(field, self, tag) {
            return match self {
                Value::String(_) => Value::String(FILTERED_LABEL.to_owned()),
                Value::Number(_) => Value::from(0),
                Value::Bool(_) => Value::Bool(false),
                Value::Array(_) => Value::Array(Vec::new()),
                Value::Object(_) => Value::Object(serde_json::Map::new()),
                Value::Null => Value::Null,
            };
        }

        match self {
            Value::String(s) => Value::String(filters.replace(s)),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|value| value.redact(filters, field, ""))
                    .collect(),
            ),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.redact(filters, key, "")))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}
