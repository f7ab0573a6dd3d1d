//! Route entries: the values the navigation stack is made of.
//!
//! A [`RouteEntry`] pairs an optional route identifier with a
//! [`RouteParams`] map. Entries are immutable and compare by value: two
//! entries are equal when their ids match and their parameter maps are
//! deeply equal, regardless of how either was built.
//!
//! Anything that can describe an entry implements [`IntoRouteEntry`]. The
//! router normalizes every input through that trait, so callers can pass
//! whichever shape is convenient:
//!
//! ```
//! use route_stack::{IntoRouteEntry, RouteEntry, RouteParams};
//! use serde_json::json;
//!
//! let a = "profile".into_route_entry();
//! let b = ("profile", RouteParams::new()).into_route_entry();
//! let c = json!({ "id": "profile" }).into_route_entry();
//! assert_eq!(a, b);
//! assert_eq!(b, c);
//!
//! // An existing entry passes through untouched.
//! let entry = RouteEntry::new("user").with_param("id", 7);
//! let same = entry.clone().into_route_entry();
//! assert!(same.params().ptr_eq(entry.params()));
//! ```

use crate::params::RouteParams;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// One slot of navigation history: a route id plus its parameters.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    #[serde(default)]
    id: Option<Arc<str>>,
    #[serde(default)]
    params: RouteParams,
}

impl RouteEntry {
    /// Create an entry for `id` with no parameters.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self {
            id: Some(Arc::from(id.as_ref())),
            params: RouteParams::new(),
        }
    }

    /// Create an entry with an id and parameters.
    pub fn with_params(id: impl AsRef<str>, params: impl Into<RouteParams>) -> Self {
        Self {
            id: Some(Arc::from(id.as_ref())),
            params: params.into(),
        }
    }

    /// The id-less, parameter-less entry. Used as the router's default.
    pub fn empty() -> Self {
        Self {
            id: None,
            params: RouteParams::new(),
        }
    }

    /// Return a copy of this entry with one more parameter.
    pub fn with_param(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            id: self.id.clone(),
            params: self.params.with(key, value),
        }
    }

    /// Return a copy of this entry with a different id and the same params.
    pub fn with_id(&self, id: impl AsRef<str>) -> Self {
        Self {
            id: Some(Arc::from(id.as_ref())),
            params: self.params.clone(),
        }
    }

    /// Route identifier, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Parameter map.
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// Shortcut for `self.params().get(key)`.
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Build an entry from a plain JSON description.
    ///
    /// Reads `id` and `params` off an object. A string id is taken as is;
    /// numbers and booleans are rendered to text; `null` or a missing field
    /// means no id. `params` is deep-converted when it is an object and
    /// ignored otherwise. Non-object input yields [`RouteEntry::empty`].
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::empty();
        };
        let id = match map.remove("id") {
            Some(Value::String(s)) => Some(Arc::from(s.as_str())),
            Some(Value::Number(n)) => Some(Arc::from(n.to_string().as_str())),
            Some(Value::Bool(b)) => Some(Arc::from(b.to_string().as_str())),
            _ => None,
        };
        let params = map
            .remove("params")
            .map(RouteParams::from_value)
            .unwrap_or_default();
        Self { id, params }
    }

    /// Render as a plain `{ "id": ..., "params": {...} }` JSON object.
    pub fn to_value(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert(
            "id".to_string(),
            self.id
                .as_deref()
                .map_or(Value::Null, |id| Value::String(id.to_string())),
        );
        map.insert("params".to_string(), self.params.to_value());
        Value::Object(map)
    }
}

impl Default for RouteEntry {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("id", &self.id())
            .field("params", &self.params)
            .finish()
    }
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id() {
            Some(id) => write!(f, "{id}")?,
            None => write!(f, "<none>")?,
        }
        if !self.params.is_empty() {
            write!(f, "{}", self.params)?;
        }
        Ok(())
    }
}

// ============================================================================
// IntoRouteEntry
// ============================================================================

/// Conversion into a canonical [`RouteEntry`].
///
/// Every stack operation accepts `impl IntoRouteEntry`, so this is the single
/// normalization point for caller input.
pub trait IntoRouteEntry {
    /// Convert into a route entry.
    fn into_route_entry(self) -> RouteEntry;
}

impl IntoRouteEntry for RouteEntry {
    fn into_route_entry(self) -> RouteEntry {
        self
    }
}

impl IntoRouteEntry for &RouteEntry {
    fn into_route_entry(self) -> RouteEntry {
        self.clone()
    }
}

impl IntoRouteEntry for &str {
    fn into_route_entry(self) -> RouteEntry {
        RouteEntry::new(self)
    }
}

impl IntoRouteEntry for String {
    fn into_route_entry(self) -> RouteEntry {
        RouteEntry::new(self)
    }
}

impl IntoRouteEntry for Value {
    fn into_route_entry(self) -> RouteEntry {
        RouteEntry::from_value(self)
    }
}

impl IntoRouteEntry for &Value {
    fn into_route_entry(self) -> RouteEntry {
        RouteEntry::from_value(self.clone())
    }
}

impl<I, P> IntoRouteEntry for (I, P)
where
    I: AsRef<str>,
    P: Into<RouteParams>,
{
    fn into_route_entry(self) -> RouteEntry {
        RouteEntry::with_params(self.0, self.1)
    }
}

impl<T: IntoRouteEntry> IntoRouteEntry for Option<T> {
    fn into_route_entry(self) -> RouteEntry {
        self.map_or_else(RouteEntry::empty, IntoRouteEntry::into_route_entry)
    }
}

impl From<&str> for RouteEntry {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<Value> for RouteEntry {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

// ============================================================================
// Tests
// ============================================================================
