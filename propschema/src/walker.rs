//! The recursive type walker.
//!
//! Entry points are [`from_type`] and [`from_value`]: given a record-shaped
//! type, a reference-name prefix, a caller-owned registry handle, and an
//! optional example provider, produce one [`Property`] tree describing the
//! record.
//!
//! Nested named records are never inlined. The walker consults the registry's
//! `has_ref` immediately before descending into one; unknown names are
//! computed, registered exactly once, and replaced by a `$ref` node, so a
//! repeat encounter of the same type short-circuits without re-deriving.

use std::collections::BTreeMap;

use convert_case::{Case, Casing};

use crate::directives::{FieldDirectives, RequiredOverride};
use crate::error::SchemaError;
use crate::property::{Property, PropertyType, RawLiteral};
use crate::registry::{ExampleProvider, RefRegistry};
use crate::shape::{Field, RecordShape, Reflect, Shape};

/// Convert a record-shaped type into a descriptor tree.
///
/// - `name_prefix` is prepended to every derived reference name
///   (e.g. `"#/$defs/"`).
/// - `registry` receives one [`RefRegistry::register`] call per distinct
///   nested record type discovered during the conversion.
/// - `provider`, when given, contributes extra example literals to
///   custom-described types.
///
/// Fails with [`SchemaError::InputKind`] when `T` is not record-shaped, and
/// with [`SchemaError::TagParse`] when a field directive carries a malformed
/// numeric bound.
///
/// # Panics
///
/// Panics when a custom description (or the provider) supplies an `enum` or
/// `examples` entry that is not valid JSON. That is a defect in the type's
/// shipped metadata, not a runtime input problem, so it aborts the conversion
/// instead of surfacing as an error value.
///
/// ```rust
/// use propschema::{Definitions, Reflect, from_type};
///
/// #[derive(Reflect)]
/// struct User {
///     pub name: String,
///     pub age: u32,
/// }
///
/// let mut defs = Definitions::new();
/// let property = from_type::<User>("#/$defs/", &mut defs, None).unwrap();
/// assert_eq!(property.required, vec!["name", "age"]);
/// ```
pub fn from_type<T: Reflect>(
    name_prefix: &str,
    registry: &mut dyn RefRegistry,
    provider: Option<&dyn ExampleProvider>,
) -> Result<Property, SchemaError> {
    match T::shape() {
        Shape::Record(record) => {
            let mut walker = Walker {
                prefix: name_prefix,
                registry,
                provider,
            };
            walker.record(&record)
        }
        other => Err(SchemaError::InputKind {
            kind: other.kind_name(),
        }),
    }
}

/// Value-taking sugar over [`from_type`].
///
/// Conversion is driven entirely by the value's static type; the value itself
/// is never inspected.
pub fn from_value<T: Reflect>(
    _value: &T,
    name_prefix: &str,
    registry: &mut dyn RefRegistry,
    provider: Option<&dyn ExampleProvider>,
) -> Result<Property, SchemaError> {
    from_type::<T>(name_prefix, registry, provider)
}

/// The definition name the walker derives for a record type, or `None` when
/// the type is not record-shaped.
///
/// Useful for callers assembling documents around registered definitions.
pub fn definition_name<T: Reflect>() -> Option<String> {
    match T::shape() {
        Shape::Record(record) => Some(sanitize_type_name(record.name)),
        _ => None,
    }
}

/// Turn a fully-qualified type path into a flat, collision-free identifier:
/// `my_crate::api::NestedStruct` becomes `MyCrateApiNestedStruct`.
fn sanitize_type_name(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_case(Case::Pascal))
        .collect()
}

struct Walker<'a> {
    prefix: &'a str,
    registry: &'a mut dyn RefRegistry,
    provider: Option<&'a dyn ExampleProvider>,
}

impl Walker<'_> {
    /// Build the inline descriptor for a record.
    fn record(&mut self, record: &RecordShape) -> Result<Property, SchemaError> {
        let mut properties = BTreeMap::new();
        let mut required = Vec::new();
        let path = sanitize_type_name(record.name);
        self.collect_fields(&record.fields, &path, &mut properties, &mut required)?;

        Ok(Property {
            ty: Some(PropertyType::Object),
            properties,
            required,
            ..Property::default()
        })
    }

    /// Walk `fields` in declaration order, filling `properties` and
    /// `required`. Flattened record fields recurse through this same method
    /// at their point of declaration, so embedded entries land before fields
    /// declared after them.
    fn collect_fields(
        &mut self,
        fields: &[Field],
        path: &str,
        properties: &mut BTreeMap<String, Property>,
        required: &mut Vec<String>,
    ) -> Result<(), SchemaError> {
        for field in fields {
            let field_path = format!("{path}.{}", field.name);
            let directives = FieldDirectives::parse(field, &field_path)?;

            // Ignored and hidden fields are dropped without walking their
            // types.
            if directives.ignored || directives.hidden {
                continue;
            }

            let shape = (field.shape)();

            // Non-public fields are invisible to the schema, unless the
            // type's own description capability pulls them back in.
            if !field.public && !matches!(shape, Shape::Custom { .. }) {
                continue;
            }

            if field.flatten {
                if let Shape::Record(embedded) = &shape {
                    self.collect_fields(&embedded.fields, path, properties, required)?;
                    continue;
                }
            }

            let key = directives.rename.unwrap_or(field.name).to_string();
            let (mut property, required_by_default) = self.walk(shape)?;
            apply_directives(&mut property, &directives);

            let is_required = match directives.required {
                RequiredOverride::Required => true,
                RequiredOverride::NotRequired => false,
                RequiredOverride::Unset => required_by_default,
            };
            if is_required {
                required.push(key.clone());
            }
            properties.insert(key, property);
        }

        Ok(())
    }

    /// Kind dispatch: produce a descriptor for one shape, along with the
    /// kind's default requiredness. The four nullable-by-construction kinds
    /// (optional, sequence, fixed array, map) default to not-required;
    /// everything else defaults to required.
    fn walk(&mut self, shape: Shape) -> Result<(Property, bool), SchemaError> {
        let out = match shape {
            Shape::String => (Property::of_type(PropertyType::String), true),
            Shape::Integer => (Property::of_type(PropertyType::Integer), true),
            Shape::Number => (Property::of_type(PropertyType::Number), true),
            Shape::Boolean => (Property::of_type(PropertyType::Boolean), true),
            Shape::Optional(inner) => {
                let (property, _) = self.walk(inner())?;
                (property, false)
            }
            Shape::Sequence(element) => {
                let (items, _) = self.walk(element())?;
                let property = Property::of_type(PropertyType::Array).with_items(items);
                (property, false)
            }
            Shape::Array { element, len } => {
                let (items, _) = self.walk(element())?;
                let property = Property {
                    min_items: Some(len as u64),
                    max_items: Some(len as u64),
                    ..Property::of_type(PropertyType::Array).with_items(items)
                };
                (property, false)
            }
            // The schema shape of mappings is underspecified; emit an
            // unconstrained node rather than guessing.
            Shape::Map => (Property::unconstrained(), false),
            Shape::Record(record) => (self.reference(&record)?, true),
            Shape::Custom { name, describe } => (self.custom(name, describe), true),
            Shape::Any => (Property::unconstrained(), true),
            Shape::Unit => (Property::unconstrained(), false),
        };
        Ok(out)
    }

    /// Reference a nested record, computing and registering its descriptor on
    /// first encounter.
    fn reference(&mut self, record: &RecordShape) -> Result<Property, SchemaError> {
        let name = sanitize_type_name(record.name);
        if !self.registry.has_ref(&name) {
            let property = self.record(record)?;
            self.registry.register(&name, property);
        }
        Ok(Property::reference(format!("{}{name}", self.prefix)))
    }

    /// Take a custom description verbatim, merge provider examples, and
    /// validate every raw literal.
    fn custom(&mut self, type_name: &str, describe: fn() -> Property) -> Property {
        let mut property = describe();
        if let Some(provider) = self.provider {
            property.examples.extend(provider.examples(type_name));
        }
        validate_literals(type_name, "enum", &property.enum_);
        validate_literals(type_name, "examples", &property.examples);
        property
    }
}

/// Apply parsed directives on top of a kind-derived (or custom) descriptor.
fn apply_directives(property: &mut Property, directives: &FieldDirectives) {
    if directives.deprecated {
        property.deprecated = true;
    }
    if let Some(description) = directives.description {
        property.description = Some(description.to_string());
    }

    let is_array = property.ty == Some(PropertyType::Array);

    // uniqueItems only means something on arrays.
    if directives.unique_items && is_array {
        property.unique_items = true;
    }

    // Arrays take item-count bounds, everything else length bounds.
    if is_array {
        if let Some(min) = directives.minimum {
            property.min_items = Some(min);
        }
        if let Some(max) = directives.maximum {
            property.max_items = Some(max);
        }
    } else {
        if let Some(min) = directives.minimum {
            property.min_length = Some(min);
        }
        if let Some(max) = directives.maximum {
            property.max_length = Some(max);
        }
    }
}

/// Abort the conversion when a shipped literal is not valid JSON.
fn validate_literals(type_name: &str, keyword: &str, literals: &[RawLiteral]) {
    for literal in literals {
        if !literal.is_valid_json() {
            panic!(
                "invalid JSON literal {:?} in `{keyword}` of the schema description for `{type_name}`",
                literal.as_str(),
            );
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
