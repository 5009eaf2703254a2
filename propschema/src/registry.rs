//! The ref registry protocol and a ready-made definitions store.
//!
//! The walker never owns definition storage. The caller supplies a handle
//! with exactly two operations — register a computed descriptor under a name,
//! and ask whether a name is already known — and the walker drives it to
//! deduplicate nested record types and to terminate on cyclic type graphs.
//! Because the handle is caller-owned, independent callers can keep
//! independent registries, and many separate conversions can share one
//! registry to deduplicate definitions across an entire API surface.

use std::collections::BTreeMap;

use crate::property::{Property, RawLiteral};

/// The caller-owned registry handle.
///
/// The walker checks [`has_ref`](RefRegistry::has_ref) immediately before
/// recursing into a named record type, and calls
/// [`register`](RefRegistry::register) at most once per distinct type
/// discovered in one conversion, immediately after computing its descriptor.
/// The walker treats the handle as opaque: it never reads or iterates the
/// backing store. If conversions run concurrently against a shared registry,
/// serializing these two calls is the registry owner's responsibility.
pub trait RefRegistry {
    /// Store a computed descriptor under its derived name.
    fn register(&mut self, name: &str, property: Property);

    /// Whether a descriptor is already registered under `name`.
    fn has_ref(&self, name: &str) -> bool;
}

/// Adapter implementing [`RefRegistry`] over a pair of closures.
///
/// ```rust
/// use propschema::{FnRegistry, Property, RefRegistry};
///
/// let mut seen = Vec::new();
/// let mut registry = FnRegistry::new(
///     |name: &str, _property: Property| seen.push(name.to_string()),
///     |_name: &str| false,
/// );
/// registry.register("Foo", Property::default());
/// ```
pub struct FnRegistry<R, H> {
    register: R,
    has_ref: H,
}

impl<R, H> FnRegistry<R, H>
where
    R: FnMut(&str, Property),
    H: Fn(&str) -> bool,
{
    /// Wrap a register/has-ref closure pair.
    pub fn new(register: R, has_ref: H) -> Self {
        Self { register, has_ref }
    }
}

impl<R, H> RefRegistry for FnRegistry<R, H>
where
    R: FnMut(&str, Property),
    H: Fn(&str) -> bool,
{
    fn register(&mut self, name: &str, property: Property) {
        (self.register)(name, property)
    }

    fn has_ref(&self, name: &str) -> bool {
        (self.has_ref)(name)
    }
}

/// An ordered definitions store implementing the registry protocol.
///
/// This is the store most callers want: accumulate definitions across one or
/// many conversions, then drain them into a document's `$defs` section.
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    definitions: BTreeMap<String, Property>,
}

impl Definitions {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a definition by name.
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.definitions.get(name)
    }

    /// Iterate definitions in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.definitions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The number of registered definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Consume the store, yielding the name → descriptor map.
    pub fn into_map(self) -> BTreeMap<String, Property> {
        self.definitions
    }
}

impl RefRegistry for Definitions {
    fn register(&mut self, name: &str, property: Property) {
        self.definitions.insert(name.to_string(), property);
    }

    fn has_ref(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }
}

/// Optional collaborator supplying supplementary example content.
///
/// Consulted when a field's type carries a custom description; any literals
/// returned for the type are appended to the descriptor's `examples` and
/// validated like the description's own literals. Not required for
/// correctness of the core contract.
pub trait ExampleProvider {
    /// Extra example literals for the named type.
    fn examples(&self, type_name: &str) -> Vec<RawLiteral>;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyType;

    #[test]
    fn definitions_round_trip() {
        let mut defs = Definitions::new();
        assert!(defs.is_empty());
        assert!(!defs.has_ref("Foo"));

        defs.register("Foo", Property::of_type(PropertyType::String));
        assert!(defs.has_ref("Foo"));
        assert_eq!(defs.len(), 1);
        assert_eq!(
            defs.get("Foo"),
            Some(&Property::of_type(PropertyType::String))
        );
    }

    #[test]
    fn register_overwrites_by_name() {
        let mut defs = Definitions::new();
        defs.register("Foo", Property::of_type(PropertyType::String));
        defs.register("Foo", Property::of_type(PropertyType::Integer));
        assert_eq!(defs.len(), 1);
        assert_eq!(
            defs.get("Foo"),
            Some(&Property::of_type(PropertyType::Integer))
        );
    }

    #[test]
    fn fn_registry_delegates() {
        let mut names = Vec::new();
        let mut registry = FnRegistry::new(
            |name: &str, _property: Property| names.push(name.to_string()),
            |name: &str| name == "Known",
        );
        registry.register("Foo", Property::default());
        assert!(registry.has_ref("Known"));
        assert!(!registry.has_ref("Foo"));
        drop(registry);
        assert_eq!(names, vec!["Foo"]);
    }
}
