//! Admin form handling.
//!
//! The registry decides what a form may touch: list-row edits are limited to
//! the declared `list_editable` columns, inline attribute saves require the
//! inline to be declared on the owner's screen. Slug derivation mirrors the
//! client-side prepopulation, so a form submitted without a slug still gets
//! one.

use thiserror::Error;

use shopadmin_catalog::{Attribute, Product};
use shopadmin_core::{
    AttributeId, BrandId, CategoryId, DomainError, EntityKind, ProductId,
};
use shopadmin_store::{CatalogStore, StoreError};

use crate::registry::AdminRegistry;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("'{field}' is not editable from the listing page")]
    NotListEditable { field: String },

    #[error("{kind} rows are not inlined on this screen")]
    InlineNotDeclared { kind: EntityKind },
}

/// Submitted product create form. A missing slug is derived from the title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub title: String,
    pub slug: Option<String>,
    pub price_cents: u64,
    pub brand: Option<BrandId>,
    pub description: String,
    pub categories: Vec<CategoryId>,
}

/// Validate a create form against the store and persist the product.
pub fn create_product(store: &CatalogStore, form: ProductForm) -> Result<Product, FormError> {
    // References must resolve before anything is written.
    if let Some(brand) = form.brand {
        store.brand(&brand)?;
    }
    for category in &form.categories {
        store.category(category)?;
    }

    let mut product = Product::new(form.title, form.slug.as_deref(), form.price_cents)?;
    product.assign_brand(form.brand);
    product.set_description(form.description);
    for category in form.categories {
        product.add_category(category);
    }

    let id = store.insert_product(product)?;
    Ok(store.product(&id)?)
}

/// One in-place edit on a listing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEdit {
    Active(bool),
    Price(u64),
}

impl ListEdit {
    fn field(&self) -> &'static str {
        match self {
            ListEdit::Active(_) => "active",
            ListEdit::Price(_) => "price",
        }
    }
}

/// Apply listing-row edits to a product. Every edit must target a declared
/// `list_editable` column; the change persists through the store.
pub fn apply_list_edits(
    registry: &AdminRegistry,
    store: &CatalogStore,
    id: &ProductId,
    edits: &[ListEdit],
) -> Result<Product, FormError> {
    let options = registry.options(EntityKind::Product);
    for edit in edits {
        if !options.is_list_editable(edit.field()) {
            return Err(FormError::NotListEditable {
                field: edit.field().to_string(),
            });
        }
    }

    let updated = store.update_product(id, |product| {
        for edit in edits {
            match edit {
                ListEdit::Active(active) => product.set_active(*active),
                ListEdit::Price(price) => product.set_price_cents(*price),
            }
        }
        Ok(())
    })?;
    Ok(updated)
}

/// One row of a submitted inline sub-form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeEdit {
    /// A blank row that was filled in.
    Create { name: String, value: String },
    /// An existing row that was changed.
    Update {
        id: AttributeId,
        name: String,
        value: String,
    },
    /// An existing row marked for deletion.
    Delete { id: AttributeId },
}

/// Persist the inline attribute sub-form of a product's detail page.
pub fn save_attribute_inlines(
    registry: &AdminRegistry,
    store: &CatalogStore,
    product: &ProductId,
    edits: Vec<AttributeEdit>,
) -> Result<(), FormError> {
    let options = registry.options(EntityKind::Product);
    if !options.has_inline(EntityKind::Attribute) {
        return Err(FormError::InlineNotDeclared {
            kind: EntityKind::Attribute,
        });
    }

    for edit in edits {
        match edit {
            AttributeEdit::Create { name, value } => {
                store.insert_attribute(Attribute::new(*product, name, value)?)?;
            }
            AttributeEdit::Update { id, name, value } => {
                store.update_attribute(&id, |attribute| {
                    if name.trim().is_empty() {
                        return Err(DomainError::validation("attribute name cannot be empty"));
                    }
                    attribute.name = name.clone();
                    attribute.value = value.clone();
                    Ok(())
                })?;
            }
            AttributeEdit::Delete { id } => {
                store.delete_attribute(&id)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::catalog_admin;
    use shopadmin_catalog::{Brand, Category};

    fn setup() -> (AdminRegistry, CatalogStore) {
        (catalog_admin().unwrap(), CatalogStore::new())
    }

    #[test]
    fn create_without_slug_derives_it_from_the_title() {
        let (_, store) = setup();
        let product = create_product(
            &store,
            ProductForm {
                title: "Red Shoes".to_string(),
                price_cents: 4999,
                ..ProductForm::default()
            },
        )
        .unwrap();
        assert_eq!(product.slug, "red-shoes");
        assert_eq!(store.product(&product.id).unwrap().slug, "red-shoes");
    }

    #[test]
    fn explicit_slug_is_kept_and_editable_later() {
        let (_, store) = setup();
        let product = create_product(
            &store,
            ProductForm {
                title: "Red Shoes".to_string(),
                slug: Some("crimson".to_string()),
                price_cents: 4999,
                ..ProductForm::default()
            },
        )
        .unwrap();
        assert_eq!(product.slug, "crimson");

        store
            .update_product(&product.id, |p| p.set_slug("scarlet"))
            .unwrap();
        assert_eq!(store.product(&product.id).unwrap().slug, "scarlet");
    }

    #[test]
    fn create_resolves_brand_and_categories() {
        let (_, store) = setup();
        let brand = store.insert_brand(Brand::new("Acme").unwrap()).unwrap();
        let shoes = store
            .insert_category(Category::new("Shoes").unwrap())
            .unwrap();

        let product = create_product(
            &store,
            ProductForm {
                title: "Red Shoes".to_string(),
                price_cents: 4999,
                brand: Some(brand),
                categories: vec![shoes],
                description: "Bright red".to_string(),
                ..ProductForm::default()
            },
        )
        .unwrap();
        assert_eq!(product.brand, Some(brand));
        assert_eq!(product.categories, vec![shoes]);
    }

    #[test]
    fn create_rejects_dangling_references() {
        let (_, store) = setup();
        let err = create_product(
            &store,
            ProductForm {
                title: "Red Shoes".to_string(),
                price_cents: 4999,
                brand: Some(BrandId::new()),
                ..ProductForm::default()
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FormError::Store(StoreError::NotFound {
                kind: EntityKind::Brand
            })
        ));
    }

    #[test]
    fn list_edits_change_active_and_price_in_place() {
        let (registry, store) = setup();
        let product = create_product(
            &store,
            ProductForm {
                title: "Red Shoes".to_string(),
                price_cents: 4999,
                ..ProductForm::default()
            },
        )
        .unwrap();

        let updated = apply_list_edits(
            &registry,
            &store,
            &product.id,
            &[ListEdit::Active(false), ListEdit::Price(3999)],
        )
        .unwrap();
        assert!(!updated.active);
        assert_eq!(updated.price_cents, 3999);

        // The change persisted, not just the returned copy.
        let stored = store.product(&product.id).unwrap();
        assert!(!stored.active);
        assert_eq!(stored.price_cents, 3999);
    }

    #[test]
    fn list_edits_respect_the_declared_columns() {
        let store = CatalogStore::new();
        // A registry whose product screen declares nothing list-editable.
        let registry = {
            let mut builder = AdminRegistry::builder();
            for kind in EntityKind::ALL {
                builder = builder.register(kind).unwrap();
            }
            builder.finish().unwrap()
        };
        let product = create_product(
            &store,
            ProductForm {
                title: "Red Shoes".to_string(),
                price_cents: 4999,
                ..ProductForm::default()
            },
        )
        .unwrap();

        let err = apply_list_edits(&registry, &store, &product.id, &[ListEdit::Price(1)])
            .unwrap_err();
        assert!(matches!(err, FormError::NotListEditable { field } if field == "price"));

        // Nothing was applied.
        assert_eq!(store.product(&product.id).unwrap().price_cents, 4999);
    }

    #[test]
    fn inline_saves_create_update_and_delete_rows() {
        let (registry, store) = setup();
        let product = create_product(
            &store,
            ProductForm {
                title: "Red Shoes".to_string(),
                price_cents: 4999,
                ..ProductForm::default()
            },
        )
        .unwrap();

        save_attribute_inlines(
            &registry,
            &store,
            &product.id,
            vec![
                AttributeEdit::Create {
                    name: "color".to_string(),
                    value: "red".to_string(),
                },
                AttributeEdit::Create {
                    name: "size".to_string(),
                    value: "41".to_string(),
                },
            ],
        )
        .unwrap();

        let rows = store.attributes_of(&product.id).unwrap();
        assert_eq!(rows.len(), 2);

        save_attribute_inlines(
            &registry,
            &store,
            &product.id,
            vec![
                AttributeEdit::Update {
                    id: rows[1].id,
                    name: "size".to_string(),
                    value: "42".to_string(),
                },
                AttributeEdit::Delete { id: rows[0].id },
            ],
        )
        .unwrap();

        let rows = store.attributes_of(&product.id).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, "42");
    }

    #[test]
    fn inline_saves_require_the_declared_inline() {
        let store = CatalogStore::new();
        let registry = {
            let mut builder = AdminRegistry::builder();
            for kind in EntityKind::ALL {
                builder = builder.register(kind).unwrap();
            }
            builder.finish().unwrap()
        };
        let product = create_product(
            &store,
            ProductForm {
                title: "Red Shoes".to_string(),
                price_cents: 4999,
                ..ProductForm::default()
            },
        )
        .unwrap();

        let err = save_attribute_inlines(
            &registry,
            &store,
            &product.id,
            vec![AttributeEdit::Create {
                name: "color".to_string(),
                value: "red".to_string(),
            }],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FormError::InlineNotDeclared {
                kind: EntityKind::Attribute
            }
        ));
    }
}
