//! The runtime type model the walker dispatches on.
//!
//! Rust has no runtime reflection, so record types carry a static mirror of
//! their fields instead: a [`RecordShape`] with one [`Field`] entry per
//! declared field. The `#[derive(Reflect)]` macro generates these mirrors;
//! primitives and standard containers have built-in [`Reflect`] impls below.
//!
//! The mirror deliberately carries schema directives as *raw strings* rather
//! than pre-parsed data, so that directive interpretation (and its error
//! reporting) happens at conversion time, inside the engine.

use crate::property::Property;

/// The kind of a type, as seen by the walker.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Textual values.
    String,
    /// Integer-like values.
    Integer,
    /// Floating-point values.
    Number,
    /// Booleans.
    Boolean,
    /// A nullable wrapper around another type (`Option<T>`).
    Optional(fn() -> Shape),
    /// A variable-length sequence (`Vec<T>`, slices, sets).
    Sequence(fn() -> Shape),
    /// A fixed-length sequence (`[T; N]`).
    Array { element: fn() -> Shape, len: usize },
    /// A key-value mapping. The schema shape of mappings is an extension
    /// point; the walker emits an unconstrained node for them.
    Map,
    /// A named record type with mirrored fields.
    Record(RecordShape),
    /// A type that supplies its own complete descriptor via [`Describe`].
    Custom {
        name: &'static str,
        describe: fn() -> Property,
    },
    /// An opaque payload with no defined mapping (`serde_json::Value`).
    Any,
    /// The null-like unit type.
    Unit,
}

impl Shape {
    /// Adapt a [`Describe`] implementation into a shape.
    ///
    /// Use this in a manual [`Reflect`] impl to opt a type into the custom
    /// description capability:
    ///
    /// ```rust
    /// use propschema::{Describe, Property, PropertyType, Reflect, Shape};
    ///
    /// struct ObjectId;
    ///
    /// impl Describe for ObjectId {
    ///     fn describe() -> Property {
    ///         Property::of_type(PropertyType::String).with_title("object id")
    ///     }
    /// }
    ///
    /// impl Reflect for ObjectId {
    ///     fn shape() -> Shape {
    ///         Shape::describe::<Self>()
    ///     }
    /// }
    /// ```
    pub fn describe<T: Describe>() -> Shape {
        Shape::Custom {
            name: std::any::type_name::<T>(),
            describe: T::describe,
        }
    }

    /// A short label for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::String => "string",
            Shape::Integer => "integer",
            Shape::Number => "number",
            Shape::Boolean => "boolean",
            Shape::Optional(_) => "optional",
            Shape::Sequence(_) => "sequence",
            Shape::Array { .. } => "array",
            Shape::Map => "map",
            Shape::Record(_) => "record",
            Shape::Custom { .. } => "custom",
            Shape::Any => "opaque",
            Shape::Unit => "null",
        }
    }
}

/// The static mirror of a record (struct) type.
#[derive(Debug, Clone)]
pub struct RecordShape {
    /// The fully-qualified type path, used to derive a deterministic,
    /// collision-free definition name.
    pub name: &'static str,
    /// Mirrored fields, in declaration order.
    pub fields: Vec<Field>,
}

/// The static mirror of one struct field.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// The declared field name.
    pub name: &'static str,
    /// Rename target from `#[schema(rename = "...")]`; the value `-` is the
    /// ignore sentinel.
    pub rename: Option<&'static str>,
    /// Raw comma-separated directive list from `#[schema(directives = "...")]`,
    /// parsed at conversion time.
    pub directives: &'static str,
    /// Description text from `#[schema(description = "...")]`.
    pub description: Option<&'static str>,
    /// Whether the field's record type is flattened into its parent.
    pub flatten: bool,
    /// Whether the field is externally accessible (`pub`). Non-public fields
    /// are skipped unless their type carries a custom description.
    pub public: bool,
    /// The field type's shape.
    pub shape: fn() -> Shape,
}

/// Types that expose their shape to the walker.
///
/// Derive this with `#[derive(Reflect)]` for structs, or implement it
/// manually — typically via [`Shape::describe`] for types that carry their
/// own descriptor.
pub trait Reflect {
    /// The shape of this type.
    fn shape() -> Shape;
}

/// The custom description capability.
///
/// A type implementing this supplies its own complete, literal [`Property`];
/// the walker uses it verbatim instead of deriving one from the type's kind.
/// Requiredness is NOT part of the description: it remains a property of the
/// field using the type, so field-level directives still apply on top.
///
/// Every `enum`/`examples` entry in the returned descriptor must be valid
/// JSON; the walker treats an invalid entry as a defect in the type's own
/// metadata and aborts the conversion with a panic.
pub trait Describe {
    /// The complete descriptor for this type.
    fn describe() -> Property;
}

// =============================================================================
// Built-in impls: primitives
// =============================================================================

macro_rules! impl_reflect {
    ($shape:expr => $($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn shape() -> Shape {
                    $shape
                }
            }
        )*
    };
}

impl_reflect!(Shape::String => String, char);
impl_reflect!(Shape::Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_reflect!(Shape::Number => f32, f64);
impl_reflect!(Shape::Boolean => bool);
impl_reflect!(Shape::Unit => ());

impl<'a> Reflect for &'a str {
    fn shape() -> Shape {
        Shape::String
    }
}

// =============================================================================
// Built-in impls: containers
// =============================================================================

impl<T: Reflect> Reflect for Option<T> {
    fn shape() -> Shape {
        Shape::Optional(T::shape)
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn shape() -> Shape {
        Shape::Sequence(T::shape)
    }
}

impl<'a, T: Reflect> Reflect for &'a [T] {
    fn shape() -> Shape {
        Shape::Sequence(T::shape)
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn shape() -> Shape {
        Shape::Array {
            element: T::shape,
            len: N,
        }
    }
}

impl<T: Reflect> Reflect for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }
}

impl<K, V> Reflect for std::collections::HashMap<K, V> {
    fn shape() -> Shape {
        Shape::Map
    }
}

impl<K, V> Reflect for std::collections::BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::Map
    }
}

impl<T: Reflect> Reflect for std::collections::HashSet<T> {
    fn shape() -> Shape {
        Shape::Sequence(T::shape)
    }
}

impl<T: Reflect> Reflect for std::collections::BTreeSet<T> {
    fn shape() -> Shape {
        Shape::Sequence(T::shape)
    }
}

/// Arbitrary JSON is an opaque payload: the walker emits an unconstrained
/// node for it.
impl Reflect for serde_json::Value {
    fn shape() -> Shape {
        Shape::Any
    }
}

// =============================================================================
// Feature-gated impls
// =============================================================================

#[cfg(feature = "uuid")]
impl Describe for uuid::Uuid {
    fn describe() -> Property {
        Property::of_type(crate::property::PropertyType::String)
    }
}

#[cfg(feature = "uuid")]
impl Reflect for uuid::Uuid {
    fn shape() -> Shape {
        Shape::describe::<Self>()
    }
}

#[cfg(feature = "chrono")]
impl<Tz: chrono::TimeZone> Describe for chrono::DateTime<Tz> {
    fn describe() -> Property {
        Property::of_type(crate::property::PropertyType::String)
    }
}

#[cfg(feature = "chrono")]
impl<Tz: chrono::TimeZone> Reflect for chrono::DateTime<Tz> {
    fn shape() -> Shape {
        Shape::describe::<Self>()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyType;

    #[test]
    fn primitive_shapes() {
        assert!(matches!(String::shape(), Shape::String));
        assert!(matches!(i64::shape(), Shape::Integer));
        assert!(matches!(f64::shape(), Shape::Number));
        assert!(matches!(bool::shape(), Shape::Boolean));
        assert!(matches!(<()>::shape(), Shape::Unit));
    }

    #[test]
    fn container_shapes() {
        assert!(matches!(Option::<String>::shape(), Shape::Optional(_)));
        assert!(matches!(Vec::<String>::shape(), Shape::Sequence(_)));
        assert!(matches!(
            <[String; 32]>::shape(),
            Shape::Array { len: 32, .. }
        ));
        assert!(matches!(
            std::collections::HashMap::<String, i32>::shape(),
            Shape::Map
        ));
        assert!(matches!(serde_json::Value::shape(), Shape::Any));
    }

    #[test]
    fn boxes_are_transparent() {
        assert!(matches!(Box::<String>::shape(), Shape::String));
    }

    #[test]
    fn optional_wraps_element_shape() {
        let Shape::Optional(inner) = Option::<Vec<bool>>::shape() else {
            panic!("expected optional shape");
        };
        assert!(matches!(inner(), Shape::Sequence(_)));
    }

    #[test]
    fn describe_shape_carries_type_name() {
        struct Custom;
        impl Describe for Custom {
            fn describe() -> Property {
                Property::of_type(PropertyType::String)
            }
        }

        let Shape::Custom { name, describe } = Shape::describe::<Custom>() else {
            panic!("expected custom shape");
        };
        assert!(name.ends_with("Custom"));
        assert_eq!(describe().ty, Some(PropertyType::String));
    }
}
