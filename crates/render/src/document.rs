//! Document, node and mark types as stored by the editor.
//!
//! These are decoded at the start of a render call and dropped at the end.
//! `null` in any optional field is treated the same as an absent field.
//!
//! Decoding is lenient below the root: an optional field of the wrong shape
//! decodes as absent, and a child node or mark that cannot be decoded at all
//! is dropped without affecting its siblings.

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Root literal that identifies a renderable document.
pub const DOC_TYPE: &str = "doc";

/// Node type of inline text leaves.
pub const TEXT_TYPE: &str = "text";

/// The root of a stored document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Must equal [`DOC_TYPE`] for the document to render.
    #[serde(rename = "type")]
    pub doc_type: String,

    /// Top-level nodes in layout order.
    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Vec<Node>>,
}

impl Document {
    /// Top-level nodes, empty when `content` is absent.
    pub fn nodes(&self) -> &[Node] {
        self.content.as_deref().unwrap_or(&[])
    }
}

/// One element of the document tree, block or inline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Node {
    /// Discriminant used for renderer lookup. Open-ended.
    #[serde(rename = "type")]
    pub node_type: String,

    /// Child nodes. Absent on atomic nodes.
    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Vec<Node>>,

    /// Node-specific parameters.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub attrs: Option<Map<String, Value>>,

    /// Literal text, only on text nodes. Numbers and booleans are kept as
    /// their JSON text.
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<String>,

    /// Inline formatting, only on text nodes. Stored outermost first.
    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub marks: Option<Vec<Mark>>,
}

impl Node {
    /// Child nodes, empty when `content` is absent.
    pub fn children(&self) -> &[Node] {
        self.content.as_deref().unwrap_or(&[])
    }

    /// Marks on this node, empty when absent.
    pub fn marks(&self) -> &[Mark] {
        self.marks.as_deref().unwrap_or(&[])
    }

    /// Typed view of the node's attributes.
    pub fn attrs(&self) -> Attrs<'_> {
        Attrs::new(self.attrs.as_ref())
    }

    pub fn is_text(&self) -> bool {
        self.node_type == TEXT_TYPE
    }
}

/// Inline formatting applied to a text node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub mark_type: String,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub attrs: Option<Map<String, Value>>,
}

/// Decode an optional field, treating a value of the wrong shape as absent.
///
/// Only conversion failures are absorbed; syntax errors and the parser's
/// recursion limit still fail the whole document.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Decode an optional list, dropping the elements that fail to decode.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

impl Mark {
    pub fn attrs(&self) -> Attrs<'_> {
        Attrs::new(self.attrs.as_ref())
    }
}

/// Lenient, typed read access to an attribute map.
///
/// Every accessor returns `None` (or the supplied default) for missing
/// keys, `null` values and values of an unusable type, so renderers never
/// fail on malformed attributes.
#[derive(Debug, Clone, Copy)]
pub struct Attrs<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Attrs<'a> {
    pub fn new(map: Option<&'a Map<String, Value>>) -> Self {
        Self { map }
    }

    /// Raw value for `key`, with `null` treated as absent.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map?.get(key).filter(|v| !v.is_null())
    }

    /// String value for `key`.
    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    /// String value for `key`, or `default` when absent.
    pub fn str_or(&self, key: &str, default: &'a str) -> &'a str {
        self.str(key).unwrap_or(default)
    }

    /// Scalar value for `key` as text. Numbers and booleans are formatted.
    pub fn text(&self, key: &str) -> Option<Cow<'a, str>> {
        match self.get(key)? {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }

    /// Boolean value for `key`.
    ///
    /// Accepts JSON booleans, `"true"`/`"false"` strings and `0`/`1`.
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => match s.trim() {
                "true" | "1" => true,
                "false" | "0" | "" => false,
                _ => default,
            },
            Some(Value::Number(n)) => n.as_f64().map_or(default, |f| f != 0.0),
            _ => default,
        }
    }

    /// Integer value for `key`. Accepts JSON integers and numeric strings.
    pub fn int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Non-negative integer value for `key`, or `default`.
    pub fn u64_or(&self, key: &str, default: u64) -> u64 {
        match self.int(key) {
            Some(v) if v >= 0 => v as u64,
            _ => default,
        }
    }

    /// Array value for `key`, empty when absent or not an array.
    pub fn array(&self, key: &str) -> &'a [Value] {
        self.get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
