//! Error types for schema conversion.

/// Errors returned by a conversion.
///
/// Both variants are ordinary, recoverable input errors. An invalid JSON
/// literal inside a custom description is deliberately NOT represented here:
/// it indicates corrupted metadata shipped by a type author, and the walker
/// aborts with a panic instead of returning it (see
/// [`Describe`](crate::Describe)).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The top-level value is not record-shaped.
    #[error("expected a record-shaped value at the top level, got {kind}")]
    InputKind {
        /// The kind of the offending value.
        kind: &'static str,
    },

    /// A directive carried a malformed numeric bound.
    #[error("invalid numeric bound `{token}` in schema directives for `{path}`")]
    TagParse {
        /// Dotted path of the offending field.
        path: String,
        /// The token that failed to parse.
        token: String,
    },
}
