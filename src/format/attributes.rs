//! Auxiliary named attributes of annotations.
//!
//! On the wire attributes are grouped by category,
//! `{"boolean": [{"name": .., "val": ..}], "num": [..], "text": [..], "vec": [..]}`.
//! In memory they are a single flat name -> value map. When the same name
//! appears in several categories the category iterated last wins.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::record::{as_array, as_record, number, numbers, required, required_string, Record};
use crate::error::SchemaError;

/// Flat attribute map, keyed by attribute name.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Name of the attribute that carries an annotation's source URI.
pub const URI_ATTRIBUTE: &str = "uri";

/// A typed attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    Boolean(bool),
    Num(f64),
    Text(String),
    Vec(Vec<f64>),
    /// A value that fits none of the typed variants, kept verbatim together
    /// with the category it was found under.
    Other { category: String, value: Value },
}

impl AttributeValue {
    /// The category this value is written under.
    pub fn category(&self) -> &str {
        match self {
            AttributeValue::Boolean(_) => "boolean",
            AttributeValue::Num(_) => "num",
            AttributeValue::Text(_) => "text",
            AttributeValue::Vec(_) => "vec",
            AttributeValue::Other { category, .. } => category,
        }
    }

    fn from_wire(category: &str, value: &Value) -> Self {
        let typed = match value {
            Value::Bool(flag) => Some(AttributeValue::Boolean(*flag)),
            Value::String(text) => Some(AttributeValue::Text(text.clone())),
            Value::Number(n) => n.as_f64().map(AttributeValue::Num),
            Value::Array(items) => items
                .iter()
                .map(Value::as_f64)
                .collect::<Option<Vec<_>>>()
                .map(AttributeValue::Vec),
            _ => None,
        };

        typed.unwrap_or_else(|| AttributeValue::Other {
            category: category.to_string(),
            value: value.clone(),
        })
    }

    fn to_wire(&self, name: &str, uid: Option<&str>) -> Result<Value, SchemaError> {
        let field = format!("attributes.{name}");
        match self {
            AttributeValue::Boolean(flag) => Ok(Value::Bool(*flag)),
            AttributeValue::Num(value) => number(*value, &field, uid),
            AttributeValue::Text(text) => Ok(Value::String(text.clone())),
            AttributeValue::Vec(values) => numbers(values.iter().copied(), &field, uid),
            AttributeValue::Other { value, .. } => Ok(value.clone()),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Num(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<Vec<f64>> for AttributeValue {
    fn from(value: Vec<f64>) -> Self {
        AttributeValue::Vec(value)
    }
}

/// Flattens a categorised `attributes` record.
pub fn decode_attributes(value: &Value, uid: Option<&str>) -> Result<Attributes, SchemaError> {
    let categories = as_record(value, "attributes", uid)?;
    let mut attributes = Attributes::new();

    for (category, entries) in categories {
        let field = format!("attributes.{category}");
        for entry in as_array(entries, &field, uid)? {
            let entry = as_record(entry, &field, uid)?;
            let name = required_string(entry, "name", uid)?;
            let val = required(entry, "val", uid)?;
            attributes.insert(name, AttributeValue::from_wire(category, val));
        }
    }

    Ok(attributes)
}

/// Splits the reserved `uri` attribute out of a decoded attribute map.
pub fn take_uri(attributes: &mut Attributes, uid: Option<&str>) -> Result<Option<String>, SchemaError> {
    match attributes.remove(URI_ATTRIBUTE) {
        None => Ok(None),
        Some(AttributeValue::Text(uri)) => Ok(Some(uri)),
        Some(_) => Err(SchemaError::invalid(URI_ATTRIBUTE, uid, "expected a string")),
    }
}

/// Groups attributes back into categories. Returns `None` when there is
/// nothing to write, so that the `attributes` key can be omitted.
pub fn encode_attributes(
    attributes: &Attributes,
    uri: Option<&str>,
    uid: Option<&str>,
) -> Result<Option<Value>, SchemaError> {
    if attributes.contains_key(URI_ATTRIBUTE) {
        return Err(SchemaError::invalid(
            URI_ATTRIBUTE,
            uid,
            "uri is reserved for the annotation's uri field",
        ));
    }
    if attributes.is_empty() && uri.is_none() {
        return Ok(None);
    }

    let mut categories: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    for (name, value) in attributes {
        let mut entry = Record::new();
        entry.insert("name".into(), Value::String(name.clone()));
        entry.insert("val".into(), value.to_wire(name, uid)?);
        categories
            .entry(value.category().to_string())
            .or_default()
            .push(Value::Object(entry));
    }

    if let Some(uri) = uri {
        let mut entry = Record::new();
        entry.insert("name".into(), Value::String(URI_ATTRIBUTE.into()));
        entry.insert("val".into(), Value::String(uri.to_string()));
        categories
            .entry("text".into())
            .or_default()
            .push(Value::Object(entry));
    }

    let out: Map<String, Value> = categories
        .into_iter()
        .map(|(category, entries)| (category, Value::Array(entries)))
        .collect();
    Ok(Some(Value::Object(out)))
}
