//! Codegen for the `Reflect` impl block.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use darling::{FromDeriveInput, FromField};

use crate::attrs::{ContainerAttrs, FieldAttrs};

/// Expand a `#[derive(Reflect)]` input into an impl block.
pub fn derive(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let container = ContainerAttrs::from_derive_input(input)
        .map_err(|e| syn::Error::new_spanned(&input.ident, e.to_string()))?;

    let data_struct = match &input.data {
        Data::Struct(s) => s,
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Reflect can only be derived for structs; implement it manually for enums",
            ));
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Reflect cannot be derived for unions",
            ));
        }
    };

    let fields = match &data_struct.fields {
        Fields::Named(fields) => mirror_fields(fields)?,
        // A unit struct is an empty record.
        Fields::Unit => Vec::new(),
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Reflect cannot be derived for tuple structs",
            ));
        }
    };

    let name = &container.ident;
    let (impl_generics, ty_generics, where_clause) = bounded_generics(&container);

    Ok(quote! {
        impl #impl_generics ::propschema::Reflect for #name #ty_generics #where_clause {
            fn shape() -> ::propschema::Shape {
                ::propschema::Shape::Record(::propschema::RecordShape {
                    name: ::core::any::type_name::<Self>(),
                    fields: ::std::vec![#(#fields),*],
                })
            }
        }
    })
}

/// Generate one `Field` mirror expression per named field.
fn mirror_fields(fields: &syn::FieldsNamed) -> Result<Vec<TokenStream>, syn::Error> {
    let mut mirrors = Vec::with_capacity(fields.named.len());

    for field in &fields.named {
        let attrs = FieldAttrs::from_field(field)
            .map_err(|e| syn::Error::new_spanned(field, e.to_string()))?;

        let ident = attrs
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "named field has no identifier"))?;
        let name = ident.to_string();

        let rename = option_str(attrs.rename.as_deref());
        let directives = attrs.directives.as_deref().unwrap_or_default();
        let description = option_str(attrs.description.as_deref());
        let flatten = attrs.flatten;
        let public = attrs.is_public();
        let ty = &attrs.ty;

        mirrors.push(quote! {
            ::propschema::Field {
                name: #name,
                rename: #rename,
                directives: #directives,
                description: #description,
                flatten: #flatten,
                public: #public,
                shape: <#ty as ::propschema::Reflect>::shape,
            }
        });
    }

    Ok(mirrors)
}

fn option_str(value: Option<&str>) -> TokenStream {
    match value {
        Some(value) => quote! { ::core::option::Option::Some(#value) },
        None => quote! { ::core::option::Option::None },
    }
}

/// Split generics for the impl block, adding a `Reflect` bound to every type
/// parameter so mirrored field shapes resolve.
fn bounded_generics(
    container: &ContainerAttrs,
) -> (TokenStream, TokenStream, TokenStream) {
    let mut generics = container.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(syn::parse_quote!(::propschema::Reflect));
    }

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    (
        quote! { #impl_generics },
        quote! { #ty_generics },
        quote! { #where_clause },
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand(input: DeriveInput) -> String {
        derive(&input).unwrap().to_string()
    }

    #[test]
    fn mirrors_named_fields_in_order() {
        let generated = expand(parse_quote! {
            struct User {
                pub name: String,
                pub age: u32,
            }
        });

        assert!(generated.contains("impl :: propschema :: Reflect for User"));
        assert!(generated.contains("name : \"name\""));
        assert!(generated.contains("name : \"age\""));
        assert!(generated.find("\"name\"").unwrap() < generated.find("\"age\"").unwrap());
        assert!(generated.contains("< u32 as :: propschema :: Reflect > :: shape"));
    }

    #[test]
    fn carries_raw_attribute_strings() {
        let generated = expand(parse_quote! {
            struct Tagged {
                #[schema(rename = "renamed_field", directives = "notRequired,deprecated")]
                pub a: String,
                #[schema(description = "free text")]
                b: f64,
            }
        });

        assert!(generated.contains("\"renamed_field\""));
        assert!(generated.contains("\"notRequired,deprecated\""));
        assert!(generated.contains("\"free text\""));
        // `b` is not pub.
        assert!(generated.contains("public : false"));
    }

    #[test]
    fn unit_struct_is_an_empty_record() {
        let generated = expand(parse_quote! {
            struct Empty;
        });
        assert!(generated.contains("Shape :: Record"));
        assert!(!generated.contains(":: propschema :: Field"));
    }

    #[test]
    fn rejects_enums_and_tuple_structs() {
        let enum_input: DeriveInput = parse_quote! {
            enum Kind { A, B }
        };
        assert!(derive(&enum_input).is_err());

        let tuple_input: DeriveInput = parse_quote! {
            struct Pair(pub String, pub u32);
        };
        assert!(derive(&tuple_input).is_err());
    }

    #[test]
    fn generic_params_get_reflect_bounds() {
        let generated = expand(parse_quote! {
            struct Page<T> {
                pub items: Vec<T>,
            }
        });
        assert!(generated.contains("T : :: propschema :: Reflect"));
    }
}
