//! # propschema
//!
//! Derive JSON-Schema-compatible descriptor trees from the static shape of
//! Rust types, without hand-written per-type schema code.
//!
//! `propschema` walks a record type's mirrored structure — its fields, their
//! kinds, and their nested types — and produces a [`Property`] tree: field
//! schemas, a required-field list inferred from each field's kind, and `$ref`
//! nodes for nested named records, deduplicated through a caller-owned
//! registry.
//!
//! ## Quick start
//!
//! ```rust
//! use propschema::{Definitions, Document, Reflect, from_type};
//!
//! #[derive(Reflect)]
//! struct User {
//!     pub name: String,
//!     pub age: u32,
//!     pub email: Option<String>,
//! }
//!
//! let mut defs = Definitions::new();
//! let root = from_type::<User>("#/$defs/", &mut defs, None).unwrap();
//!
//! // `email` is Option-typed, so it is not required.
//! assert_eq!(root.required, vec!["name", "age"]);
//!
//! let document = Document::new(root).with_definitions(defs);
//! println!("{}", serde_json::to_string_pretty(&document).unwrap());
//! ```
//!
//! ## Field directives
//!
//! Fields take `#[schema(...)]` attributes, carried as raw text and parsed at
//! conversion time:
//!
//! | Attribute | Effect |
//! |-----------|--------|
//! | `#[schema(rename = "name")]` | Schema key becomes `name` |
//! | `#[schema(rename = "-")]` | Field excluded entirely |
//! | `#[schema(directives = "required")]` | Forced into `required` |
//! | `#[schema(directives = "notRequired")]` | Forced out of `required` |
//! | `#[schema(directives = "deprecated")]` | Sets `deprecated` |
//! | `#[schema(directives = "uniqueItems")]` | Sets `uniqueItems` (arrays) |
//! | `#[schema(directives = "hidden")]` | Field excluded, type not walked |
//! | `#[schema(directives = "min=N")]` / `max=N` | Length or item bound |
//! | `#[schema(description = "...")]` | Sets `description` |
//!
//! Directive tokens combine in one comma-separated list, e.g.
//! `#[schema(directives = "notRequired,deprecated")]`. Unknown tokens are
//! ignored for forward compatibility.
//!
//! ## Required-field inference
//!
//! Fields are required by default. The four nullable-by-construction kinds —
//! `Option<T>`, sequences, fixed-length arrays, and maps — default to not
//! required. An explicit `required`/`notRequired` directive always wins.
//!
//! ## Nested records and `$ref`
//!
//! A field whose type is itself a record never gets an inline schema. The
//! walker derives a deterministic name from the type's fully-qualified path,
//! asks the registry whether that name is known, computes and registers the
//! nested descriptor on first encounter, and emits
//! `{ "$ref": "<prefix><name>" }`. Sharing one [`Definitions`] store across
//! many conversions deduplicates definitions across an entire API surface.
//!
//! ## Custom descriptions
//!
//! A type can opt out of kind-based derivation by implementing [`Describe`]
//! and exposing it through its [`Reflect`] impl with [`Shape::describe`].
//! The returned [`Property`] is used verbatim; only the field-level
//! requiredness logic still applies on top.
//!
//! ## Type mappings
//!
//! | Rust type | Schema |
//! |-----------|--------|
//! | `String`, `&str`, `char` | `"type": "string"` |
//! | `i8`–`i128`, `u8`–`u128`, `isize`, `usize` | `"type": "integer"` |
//! | `f32`, `f64` | `"type": "number"` |
//! | `bool` | `"type": "boolean"` |
//! | `Option<T>` | schema of `T`, not required |
//! | `Vec<T>`, `&[T]`, sets | `"type": "array"` + `items` |
//! | `[T; N]` | array with `minItems == maxItems == N` |
//! | `HashMap`, `BTreeMap` | unconstrained node (extension point) |
//! | derived structs | `$ref` to a registered definition |
//! | `serde_json::Value` | unconstrained node |
//! | `Uuid`, `DateTime<Tz>` (feature-gated) | `"type": "string"` |

pub mod directives;
pub mod document;
pub mod error;
pub mod property;
pub mod registry;
pub mod shape;
pub mod walker;

pub use directives::{FieldDirectives, RequiredOverride, IGNORE_SENTINEL};
pub use document::{Document, DRAFT_2020_12};
pub use error::SchemaError;
pub use property::{Property, PropertyType, RawLiteral};
pub use registry::{Definitions, ExampleProvider, FnRegistry, RefRegistry};
pub use shape::{Describe, Field, RecordShape, Reflect, Shape};
pub use walker::{definition_name, from_type, from_value};

// Re-export the derive macro when available
#[cfg(feature = "derive")]
pub use propschema_macros::Reflect;
