//! The descriptor data model.
//!
//! A [`Property`] is one node of the JSON-Schema-like descriptor tree produced
//! by the walker. The tree is a passive data structure: it is built fresh per
//! top-level conversion and never mutated after return, except by a caller
//! assembling a final document from registered definitions.
//!
//! Enum and example entries are carried as [`RawLiteral`] values: untyped raw
//! JSON text, validated lazily rather than eagerly parsed, because a schema's
//! literals may be heterogeneous in shape.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

/// The `type` keyword of a schema node.
///
/// A node without a type (`Property::ty == None`) describes an unconstrained
/// value, which is how opaque payloads and mapping-typed fields degrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

/// A raw, not-yet-typed JSON literal.
///
/// Used for `enum` and `examples` entries. The text is serialized verbatim
/// into the output document, so it must be valid JSON by the time the
/// document is rendered; the walker enforces this for custom descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLiteral(String);

impl RawLiteral {
    /// Wrap raw JSON text. The text is not validated here.
    pub fn new(json: impl Into<String>) -> Self {
        Self(json.into())
    }

    /// The raw JSON text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the payload parses as JSON.
    pub fn is_valid_json(&self) -> bool {
        serde_json::from_str::<serde::de::IgnoredAny>(&self.0).is_ok()
    }
}

impl From<&str> for RawLiteral {
    fn from(json: &str) -> Self {
        Self::new(json)
    }
}

impl Serialize for RawLiteral {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match serde_json::value::RawValue::from_string(self.0.clone()) {
            Ok(raw) => raw.serialize(serializer),
            Err(err) => Err(serde::ser::Error::custom(err)),
        }
    }
}

/// One node of the descriptor tree.
///
/// A node is either inline (some combination of `ty`, `items`, `properties`,
/// bounds) or a reference (`reference` set, everything else empty) — never
/// both. Every array node carries `items`; fixed-length arrays additionally
/// satisfy `min_items == max_items == len`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// The `type` keyword; `None` means unset (unconstrained).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<PropertyType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,

    /// A pointer to a separately registered node (`$ref`), in place of an
    /// inline description.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Element schema for array nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Property>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unique_items: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_: Vec<RawLiteral>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<RawLiteral>,

    /// Field name → schema, for record/object nodes.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Property>,

    /// Names of required fields, in first-seen traversal order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Reference name → schema; populated only at the document-assembly
    /// boundary, never by the walker itself.
    #[serde(rename = "$defs", skip_serializing_if = "BTreeMap::is_empty")]
    pub defs: BTreeMap<String, Property>,
}

impl Property {
    /// An empty, unconstrained node.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// An inline node with just a `type` keyword.
    pub fn of_type(ty: PropertyType) -> Self {
        Self {
            ty: Some(ty),
            ..Self::default()
        }
    }

    /// A reference node pointing at a registered definition.
    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            reference: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the element schema.
    pub fn with_items(mut self, items: Property) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    /// Whether this node is a reference rather than an inline description.
    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_property_serializes_to_empty_object() {
        let json = serde_json::to_string(&Property::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn type_keyword_is_lowercase() {
        let json = serde_json::to_string(&Property::of_type(PropertyType::String)).unwrap();
        assert_eq!(json, r#"{"type":"string"}"#);
    }

    #[test]
    fn reference_uses_ref_keyword() {
        let json = serde_json::to_string(&Property::reference("#/$defs/Foo")).unwrap();
        assert_eq!(json, r##"{"$ref":"#/$defs/Foo"}"##);
    }

    #[test]
    fn array_bounds_use_camel_case_keywords() {
        let prop = Property {
            ty: Some(PropertyType::Array),
            items: Some(Box::new(Property::of_type(PropertyType::String))),
            min_items: Some(32),
            max_items: Some(32),
            unique_items: true,
            ..Property::default()
        };
        let json = serde_json::to_string(&prop).unwrap();
        assert_eq!(
            json,
            r#"{"type":"array","items":{"type":"string"},"minItems":32,"maxItems":32,"uniqueItems":true}"#
        );
    }

    #[test]
    fn raw_literals_serialize_verbatim() {
        let prop = Property {
            ty: Some(PropertyType::String),
            enum_: vec!["\"foo\"".into(), "\"bar\"".into()],
            ..Property::default()
        };
        let json = serde_json::to_string(&prop).unwrap();
        assert_eq!(json, r#"{"type":"string","enum":["foo","bar"]}"#);
    }

    #[test]
    fn raw_literal_validity() {
        assert!(RawLiteral::new("{\"a\": 1}").is_valid_json());
        assert!(RawLiteral::new("42").is_valid_json());
        assert!(!RawLiteral::new("foo").is_valid_json());
        assert!(!RawLiteral::new("").is_valid_json());
    }
}
