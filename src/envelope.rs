//! Request envelope construction and default-parameter stripping.
//!
//! Every call to the API transmits the same outer JSON object: the action
//! name, an action-specific parameter object, and the API key. This module
//! defines that wire shape and the rule for which parameters make it onto
//! the wire at all.

use serde::Serialize;
use serde_json::{Map, Value};

/// The outer JSON object sent to the API endpoint.
///
/// Built fresh for every call and never reused.
#[derive(Debug, Serialize)]
pub(crate) struct Envelope<'a> {
    /// The remote action to execute (e.g. `getObject`, `saveObject`).
    pub action: &'a str,
    /// Action-specific parameters.
    pub params: Value,
    /// The caller's API key.
    pub key: &'a str,
}

/// Selection criteria for [`Client::get_objects`](crate::Client::get_objects).
///
/// Only the object type is required; the remaining criteria default to
/// their zero values and are omitted from the outgoing request while they
/// stay there.
///
/// # Examples
///
/// ```
/// use dilovod::ObjectsQuery;
///
/// let query = ObjectsQuery::new("catalogs.goods")
///     .filter("is_active", true)
///     .fields(["name", "price"])
///     .order_by("name ASC")
///     .limit(10);
/// ```
#[derive(Debug, Clone)]
pub struct ObjectsQuery {
    object_type: String,
    filter: Map<String, Value>,
    fields: Vec<String>,
    order_by: String,
    limit: u64,
}

impl ObjectsQuery {
    /// Creates a query for all objects of the given type
    /// (e.g. `catalogs.goods`, `documents.saleOrder`).
    pub fn new(object_type: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            filter: Map::new(),
            fields: Vec::new(),
            order_by: String::new(),
            limit: 0,
        }
    }

    /// Adds an equality condition on `field`. Repeated calls accumulate.
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter.insert(field.into(), value.into());
        self
    }

    /// Restricts returned objects to the named fields. An empty list (the
    /// default) returns all fields.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the sort clause, in `"<field> ASC|DESC"` form.
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = order_by.into();
        self
    }

    /// Caps the number of returned objects.
    ///
    /// `0` is the default and means unlimited; the remote protocol cannot
    /// express an explicit cap of zero.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Assembles the wire parameters, with default-valued entries removed.
    pub(crate) fn into_params(self) -> Value {
        let mut params = Map::new();
        params.insert("type".to_string(), Value::String(self.object_type));
        params.insert("filter".to_string(), Value::Object(self.filter));
        params.insert(
            "fields".to_string(),
            Value::Array(self.fields.into_iter().map(Value::String).collect()),
        );
        params.insert("orderby".to_string(), Value::String(self.order_by));
        params.insert("limit".to_string(), Value::from(self.limit));
        Value::Object(strip_defaults(params))
    }
}

/// Removes entries whose value equals the zero value for its type: an empty
/// mapping, an empty sequence, an empty string, or numeric zero.
///
/// The remote treats an absent parameter the same as its default, so the
/// envelope only carries what the caller actually set.
pub(crate) fn strip_defaults(params: Map<String, Value>) -> Map<String, Value> {
    params
        .into_iter()
        .filter(|(_, value)| !is_default(value))
        .collect()
}

fn is_default(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}
