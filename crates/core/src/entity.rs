//! Entity trait: identity + continuity across state changes.

use serde::{Deserialize, Serialize};

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// The catalog entity kind this type belongs to.
    fn kind() -> EntityKind;
}

/// The closed set of catalog entity kinds the admin console manages.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Product,
    Category,
    Brand,
    Tag,
    Cart,
    Attribute,
}

impl EntityKind {
    /// Every kind, in a stable order. Registration completeness is checked
    /// against this list.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Product,
        EntityKind::Category,
        EntityKind::Brand,
        EntityKind::Tag,
        EntityKind::Cart,
        EntityKind::Attribute,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Product => "product",
            EntityKind::Category => "category",
            EntityKind::Brand => "brand",
            EntityKind::Tag => "tag",
            EntityKind::Cart => "cart",
            EntityKind::Attribute => "attribute",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
