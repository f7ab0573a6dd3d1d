//! Canonical, immutable parameter maps.
//!
//! [`RouteParams`] is the parameter half of a [`RouteEntry`](crate::RouteEntry).
//! Values are [`serde_json::Value`]s, so nested arrays and objects are
//! supported and compared structurally. The map itself is shared behind an
//! [`Arc`]: cloning a `RouteParams` never copies the data, and nothing hands
//! out a mutable reference to it once constructed.
//!
//! Keys are kept in a `BTreeMap`, which makes equality independent of the
//! order in which parameters were supplied.
//!
//! # Example
//!
//! ```
//! use route_stack::RouteParams;
//! use serde_json::json;
//!
//! let a = RouteParams::new().with("id", 42).with("tab", "posts");
//! let b = RouteParams::new().with("tab", "posts").with("id", 42);
//! assert_eq!(a, b);
//! assert_eq!(a.get_as::<u32>("id"), Some(42));
//! assert_eq!(a.get("tab"), Some(&json!("posts")));
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Immutable parameter map with deep value equality.
#[derive(Clone, Default, PartialEq)]
pub struct RouteParams {
    params: Arc<BTreeMap<String, Value>>,
}

impl RouteParams {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this map with `key` set to `value`.
    ///
    /// The receiver is left untouched; entries already built from it keep
    /// seeing the old contents.
    pub fn with(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut params = (*self.params).clone();
        params.insert(key.into(), normalize_value(value.into()));
        Self {
            params: Arc::new(params),
        }
    }

    /// Return a copy of this map without `key`.
    pub fn without(&self, key: &str) -> Self {
        if !self.params.contains_key(key) {
            return self.clone();
        }
        let mut params = (*self.params).clone();
        params.remove(key);
        Self {
            params: Arc::new(params),
        }
    }

    /// Get a parameter value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Get a parameter and deserialize it as `T`.
    ///
    /// Returns `None` if the key is missing or the value has the wrong shape.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        T::deserialize(self.params.get(key)?).ok()
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.params.iter()
    }

    /// Iterate over the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.params.keys()
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Return the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Return `true` if both maps share the same allocation.
    ///
    /// Cheap identity check used to tell a pass-through entry from a copy.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.params, &other.params)
    }

    /// Render the parameters as a JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Build params from an arbitrary JSON value.
    ///
    /// Objects become maps; every other shape (including `null`) yields an
    /// empty map.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::from(map),
            _ => Self::new(),
        }
    }
}

/// Deep-copy a value into its canonical shape.
///
/// `serde_json` values are already owned trees, so this only has to make
/// sure object keys end up ordered, which matters when the `preserve_order`
/// feature of `serde_json` is enabled somewhere in the dependency graph.
fn normalize_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> = map
                .into_iter()
                .map(|(k, v)| (k, normalize_value(v)))
                .collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_value).collect()),
        other => other,
    }
}

impl<K, V> FromIterator<(K, V)> for RouteParams
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let params = iter
            .into_iter()
            .map(|(k, v)| (k.into(), normalize_value(v.into())))
            .collect();
        Self {
            params: Arc::new(params),
        }
    }
}

impl From<Map<String, Value>> for RouteParams {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl From<HashMap<String, Value>> for RouteParams {
    fn from(map: HashMap<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, Value>> for RouteParams {
    fn from(map: BTreeMap<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for RouteParams
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl fmt::Debug for RouteParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.params.iter()).finish()
    }
}

impl fmt::Display for RouteParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

impl Serialize for RouteParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (*self.params).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RouteParams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_with_leaves_original_untouched() {
        let base = RouteParams::new().with("id", 1);
        let extended = base.with("tab", "posts");

        assert_eq!(base.len(), 1);
        assert_eq!(extended.len(), 2);
        assert!(!base.contains("tab"));
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a: RouteParams = [("a", json!(1)), ("b", json!(2))].into();
        let b: RouteParams = [("b", json!(2)), ("a", json!(1))].into();
        assert_eq!(a, b);
    }

    #[test]
    fn test_nested_values_compare_structurally() {
        let a = RouteParams::new().with("filter", json!({ "tags": ["x", "y"], "page": 2 }));
        let b = RouteParams::new().with("filter", json!({ "page": 2, "tags": ["x", "y"] }));
        let c = RouteParams::new().with("filter", json!({ "page": 2, "tags": ["y", "x"] }));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_get_as() {
        let params = RouteParams::new()
            .with("id", 123)
            .with("active", true)
            .with("name", "ada");

        assert_eq!(params.get_as::<u32>("id"), Some(123));
        assert_eq!(params.get_as::<bool>("active"), Some(true));
        assert_eq!(params.get_as::<String>("name"), Some("ada".to_string()));
        assert_eq!(params.get_as::<u32>("name"), None);
        assert_eq!(params.get_as::<u32>("missing"), None);
    }

    #[test]
    fn test_without() {
        let params = RouteParams::new().with("a", 1).with("b", 2);
        let trimmed = params.without("a");

        assert!(!trimmed.contains("a"));
        assert!(params.contains("a"));
        assert!(params.without("zzz").ptr_eq(&params));
    }

    #[test]
    fn test_from_value_non_object_is_empty() {
        assert!(RouteParams::from_value(json!(null)).is_empty());
        assert!(RouteParams::from_value(json!([1, 2])).is_empty());
        assert_eq!(RouteParams::from_value(json!({ "k": "v" })).len(), 1);
    }

    #[test]
    fn test_clone_shares_allocation() {
        let params = RouteParams::new().with("id", 7);
        let copy = params.clone();
        assert!(params.ptr_eq(&copy));
    }

    #[test]
    fn test_serde_shape() {
        let params = RouteParams::new().with("id", 7).with("q", "rust");
        assert_eq!(params.to_value(), json!({ "id": 7, "q": "rust" }));

        let back: RouteParams = serde_json::from_value(json!({ "q": "rust", "id": 7 })).unwrap();
        assert_eq!(back, params);
    }
}
