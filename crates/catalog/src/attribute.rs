use serde::{Deserialize, Serialize};

use shopadmin_core::{AttributeId, DomainError, DomainResult, Entity, EntityKind, ProductId};

/// A key/value metadata row owned by exactly one product.
///
/// Ownership is exclusive: when the product goes, its attribute rows go with
/// it (the store enforces the cascade).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: AttributeId,
    pub product: ProductId,
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(
        product: ProductId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("attribute name cannot be empty"));
        }
        Ok(Self {
            id: AttributeId::new(),
            product,
            name,
            value: value.into(),
        })
    }
}

impl Entity for Attribute {
    type Id = AttributeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn kind() -> EntityKind {
        EntityKind::Attribute
    }
}
