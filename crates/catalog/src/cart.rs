use serde::{Deserialize, Serialize};

use shopadmin_core::{CartId, Entity, EntityKind, ProductId};

/// A customer's cart: the products they have selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    /// Free-form customer label; there is no user subsystem at this layer.
    pub customer: String,
    pub items: Vec<ProductId>,
}

impl Cart {
    pub fn new(customer: impl Into<String>) -> Self {
        Self {
            id: CartId::new(),
            customer: customer.into(),
            items: Vec::new(),
        }
    }

    pub fn add_item(&mut self, product: ProductId) {
        self.items.push(product);
    }

    pub fn remove_item(&mut self, product: ProductId) {
        if let Some(pos) = self.items.iter().position(|p| *p == product) {
            self.items.remove(pos);
        }
    }
}

impl Entity for Cart {
    type Id = CartId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn kind() -> EntityKind {
        EntityKind::Cart
    }
}
