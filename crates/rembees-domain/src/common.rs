//! Shared traits implemented by the domain entities.

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving whole-Rupiah amounts.
pub trait Amounted {
    fn amount(&self) -> u64;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}
