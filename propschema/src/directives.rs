//! Per-field directive parsing.
//!
//! Each mirrored field carries its schema directives as raw text (the rename
//! target and a comma-separated directive list). This module turns that text
//! into a structured [`FieldDirectives`] set at conversion time.
//!
//! Policy: unknown directive tokens are silently ignored, so a schema
//! annotated for a newer release still converts under an older engine. The
//! one thing that does fail is a malformed numeric bound, which returns a
//! [`SchemaError::TagParse`] carrying the field's path.

use crate::error::SchemaError;
use crate::shape::Field;

/// The rename value that removes a field from the schema entirely.
pub const IGNORE_SENTINEL: &str = "-";

/// Explicit requiredness override for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequiredOverride {
    /// No directive present; the kind-based default applies.
    #[default]
    Unset,
    /// `required`: the field is always in the required list.
    Required,
    /// `notRequired`: the field is never in the required list.
    NotRequired,
}

/// The parsed directive set for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDirectives {
    /// Schema key override.
    pub rename: Option<&'static str>,
    /// Field is excluded entirely (rename set to [`IGNORE_SENTINEL`]).
    pub ignored: bool,
    /// Explicit requiredness, overriding the kind-based default.
    pub required: RequiredOverride,
    /// `deprecated` directive.
    pub deprecated: bool,
    /// `uniqueItems` directive (honored on array fields only).
    pub unique_items: bool,
    /// `hidden`: field excluded, type not walked.
    pub hidden: bool,
    /// `min=N` / `minimum=N` bound.
    pub minimum: Option<u64>,
    /// `max=N` / `maximum=N` bound.
    pub maximum: Option<u64>,
    /// Free-text description.
    pub description: Option<&'static str>,
}

impl FieldDirectives {
    /// Parse the directives carried by a mirrored field.
    ///
    /// `path` is the dotted path of the field within the conversion, used in
    /// error reports.
    pub fn parse(field: &Field, path: &str) -> Result<Self, SchemaError> {
        let mut directives = Self::parse_list(field.directives, path)?;
        match field.rename {
            Some(IGNORE_SENTINEL) => directives.ignored = true,
            Some(rename) => directives.rename = Some(rename),
            None => {}
        }
        directives.description = field.description;
        Ok(directives)
    }

    /// Parse a comma-separated directive list.
    pub fn parse_list(list: &str, path: &str) -> Result<Self, SchemaError> {
        let mut directives = Self::default();

        for token in list.split(',') {
            let token = token.trim();
            match token {
                "" => {}
                "required" => directives.required = RequiredOverride::Required,
                "notRequired" => directives.required = RequiredOverride::NotRequired,
                "deprecated" => directives.deprecated = true,
                "uniqueItems" => directives.unique_items = true,
                "hidden" => directives.hidden = true,
                _ => {
                    if let Some(value) = bound_value(token, &["min", "minimum"]) {
                        directives.minimum = Some(parse_bound(token, value, path)?);
                    } else if let Some(value) = bound_value(token, &["max", "maximum"]) {
                        directives.maximum = Some(parse_bound(token, value, path)?);
                    }
                    // Anything else is an unknown token and is ignored.
                }
            }
        }

        Ok(directives)
    }
}

/// If `token` is `key=value` for one of `keys`, return the value part.
fn bound_value<'a>(token: &'a str, keys: &[&str]) -> Option<&'a str> {
    let (key, value) = token.split_once('=')?;
    keys.contains(&key.trim()).then(|| value.trim())
}

fn parse_bound(token: &str, value: &str, path: &str) -> Result<u64, SchemaError> {
    value.parse().map_err(|_| SchemaError::TagParse {
        path: path.to_string(),
        token: token.to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(list: &str) -> FieldDirectives {
        FieldDirectives::parse_list(list, "Test.field").unwrap()
    }

    #[test]
    fn empty_list_yields_defaults() {
        assert_eq!(parse(""), FieldDirectives::default());
    }

    #[test]
    fn required_overrides() {
        assert_eq!(parse("required").required, RequiredOverride::Required);
        assert_eq!(parse("notRequired").required, RequiredOverride::NotRequired);
        assert_eq!(parse("").required, RequiredOverride::Unset);
    }

    #[test]
    fn flag_directives() {
        let directives = parse("deprecated,uniqueItems,hidden");
        assert!(directives.deprecated);
        assert!(directives.unique_items);
        assert!(directives.hidden);
    }

    #[test]
    fn numeric_bounds() {
        let directives = parse("min=3,max=12");
        assert_eq!(directives.minimum, Some(3));
        assert_eq!(directives.maximum, Some(12));

        // Long spellings and whitespace are accepted too.
        let directives = parse(" minimum = 1 , maximum = 2 ");
        assert_eq!(directives.minimum, Some(1));
        assert_eq!(directives.maximum, Some(2));
    }

    #[test]
    fn bad_bound_reports_field_path() {
        let err = FieldDirectives::parse_list("min=abc", "Outer.field").unwrap_err();
        assert_eq!(
            err,
            SchemaError::TagParse {
                path: "Outer.field".to_string(),
                token: "min=abc".to_string(),
            }
        );
    }

    #[test]
    fn unknown_tokens_are_ignored() {
        let directives = parse("wibble,deprecated,futureDirective=7");
        assert!(directives.deprecated);
        assert_eq!(directives.minimum, None);
    }

    #[test]
    fn rename_sentinel_marks_ignored() {
        let field = crate::shape::Field {
            name: "b",
            rename: Some(IGNORE_SENTINEL),
            directives: "",
            description: None,
            flatten: false,
            public: true,
            shape: <f64 as crate::Reflect>::shape,
        };
        let directives = FieldDirectives::parse(&field, "Test.b").unwrap();
        assert!(directives.ignored);
        assert_eq!(directives.rename, None);
    }

    proptest! {
        // Unknown alphabetic tokens never change the outcome and never fail.
        #[test]
        fn unknown_tokens_never_fail(tokens in proptest::collection::vec("[A-Za-z]{1,12}", 0..6)) {
            let known = ["required", "notRequired", "deprecated", "uniqueItems", "hidden"];
            let list = tokens
                .iter()
                .filter(|t| !known.contains(&t.as_str()))
                .cloned()
                .collect::<Vec<_>>()
                .join(",");
            let directives = FieldDirectives::parse_list(&list, "Prop.test").unwrap();
            prop_assert_eq!(directives, FieldDirectives::default());
        }
    }
}
