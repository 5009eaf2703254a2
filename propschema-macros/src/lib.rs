//! # propschema-macros
//!
//! Procedural macros for deriving JSON Schema descriptors from Rust types.
//!
//! This crate provides `#[derive(Reflect)]`, which mirrors a struct's fields
//! into the `propschema` runtime type model. The macro deliberately does NOT
//! interpret schema directives: rename targets, directive lists, and
//! description texts are carried as raw strings so that the runtime engine
//! parses them at conversion time and reports errors with field paths.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use propschema::Reflect;
//!
//! #[derive(Reflect)]
//! struct User {
//!     #[schema(rename = "id")]
//!     pub user_id: u64,
//!
//!     #[schema(directives = "notRequired,deprecated")]
//!     pub legacy_name: String,
//!
//!     #[schema(description = "primary contact address")]
//!     pub email: Option<String>,
//!
//!     #[schema(rename = "-")]
//!     pub internal: f64,
//! }
//! ```
//!
//! ## Field attributes
//!
//! - `#[schema(rename = "name")]` — rename this field (`"-"` removes it)
//! - `#[schema(directives = "...")]` — comma-separated directive list,
//!   parsed by the runtime engine
//! - `#[schema(description = "...")]` — description text
//! - `#[schema(flatten)]` — inline the fields of an embedded struct

use proc_macro::TokenStream;
use syn::DeriveInput;

mod attrs;
mod expand;

/// Derive macro mirroring a struct into the runtime type model.
#[proc_macro_derive(Reflect, attributes(schema))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    match expand::derive(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
