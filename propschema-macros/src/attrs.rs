//! Attribute parsing using darling for the `#[schema(...)]` surface.

use darling::{FromDeriveInput, FromField};
use syn::{Generics, Ident, Type, Visibility};

/// Container-level view of the type under derivation.
///
/// No container attributes are recognized today; this carries identity and
/// generics into codegen. Input-shape validation (structs only) happens in
/// `expand`, where the errors can be specific.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(schema))]
pub struct ContainerAttrs {
    pub ident: Ident,
    pub generics: Generics,
}

/// Field-level attributes parsed from `#[schema(...)]` on struct fields.
#[derive(Debug, FromField)]
#[darling(attributes(schema))]
pub struct FieldAttrs {
    /// Field identifier (always present: tuple structs are rejected).
    pub ident: Option<Ident>,

    /// Field type.
    pub ty: Type,

    /// Field visibility, mirrored into the runtime model.
    pub vis: Visibility,

    /// Rename this field; the value `-` removes it from the schema.
    #[darling(default)]
    pub rename: Option<String>,

    /// Raw comma-separated directive list, parsed by the runtime engine.
    #[darling(default)]
    pub directives: Option<String>,

    /// Description text.
    #[darling(default)]
    pub description: Option<String>,

    /// Inline the fields of an embedded struct at this position.
    #[darling(default)]
    pub flatten: bool,
}

impl FieldAttrs {
    /// Whether the field is externally accessible.
    pub fn is_public(&self) -> bool {
        matches!(self.vis, Visibility::Public(_))
    }
}
