//! Assembling a root schema document from accumulated definitions.
//!
//! The walker never builds documents; it only produces a root descriptor and
//! drives the registry. Wrapping the root with a `$schema` URI and the
//! registered `$defs` is the caller's job, and this module is the ready-made
//! way to do it.

use serde::Serialize;

use crate::property::Property;
use crate::registry::Definitions;

/// The JSON Schema draft this crate's output targets.
pub const DRAFT_2020_12: &str = "https://json-schema.org/draft/2020-12/schema";

/// A root schema document: a descriptor plus its definitions section.
///
/// ```rust
/// use propschema::{Definitions, Document, Reflect, from_type};
///
/// #[derive(Reflect)]
/// struct User {
///     pub name: String,
/// }
///
/// let mut defs = Definitions::new();
/// let root = from_type::<User>("#/$defs/", &mut defs, None).unwrap();
/// let document = Document::new(root).with_definitions(defs);
/// let json = serde_json::to_string_pretty(&document).unwrap();
/// assert!(json.contains("\"$schema\""));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// The `$schema` URI, omitted when `None`.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// The root descriptor, flattened into the document body.
    #[serde(flatten)]
    pub root: Property,
}

impl Document {
    /// Wrap a root descriptor, targeting [`DRAFT_2020_12`].
    pub fn new(root: Property) -> Self {
        Self {
            schema: Some(DRAFT_2020_12.to_string()),
            root,
        }
    }

    /// Override the `$schema` URI.
    pub fn with_schema_uri(mut self, uri: impl Into<String>) -> Self {
        self.schema = Some(uri.into());
        self
    }

    /// Drop the `$schema` keyword.
    pub fn without_schema_uri(mut self) -> Self {
        self.schema = None;
        self
    }

    /// Attach accumulated definitions as the document's `$defs` section.
    pub fn with_definitions(mut self, definitions: Definitions) -> Self {
        self.root.defs = definitions.into_map();
        self
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyType;
    use crate::registry::RefRegistry;

    #[test]
    fn document_flattens_root_next_to_schema_keyword() {
        let document = Document::new(Property::of_type(PropertyType::Object));
        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value["$schema"], DRAFT_2020_12);
        assert_eq!(value["type"], "object");
    }

    #[test]
    fn definitions_land_under_defs() {
        let mut defs = Definitions::new();
        defs.register("Nested", Property::of_type(PropertyType::String));

        let document = Document::new(Property::of_type(PropertyType::Object))
            .without_schema_uri()
            .with_definitions(defs);

        let value = serde_json::to_value(&document).unwrap();
        assert!(value.get("$schema").is_none());
        assert_eq!(value["$defs"]["Nested"]["type"], "string");
    }
}
