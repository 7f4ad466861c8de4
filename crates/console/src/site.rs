//! The store's default admin configuration.

use shopadmin_core::EntityKind;

use crate::error::ConfigError;
use crate::options::AdminOptions;
use crate::registry::AdminRegistry;

/// Build the catalog admin registry.
///
/// Product gets the customized screen; Attribute gets a dedicated (empty)
/// customization record; the remaining entities take framework defaults.
pub fn catalog_admin() -> Result<AdminRegistry, ConfigError> {
    let product = AdminOptions::builder(EntityKind::Product)
        .list_display([
            "title", "slug", "price", "brand", "created", "updated", "active",
        ])
        .list_filter(["brand", "active", "categories"])
        .search_fields(["title", "description"])
        .list_editable(["active", "price"])
        .list_select_related(["brand"])
        .filter_horizontal(["categories"])
        .prepopulate("slug", "title")
        .fieldset("Main Info", ["title", "slug", "price", "active", "brand"])
        .fieldset("Additional Info", ["description", "categories"])
        .save_on_top(true)
        .list_per_page(5)
        .inline(EntityKind::Attribute, 1)
        .build()?;

    let attribute = AdminOptions::builder(EntityKind::Attribute).build()?;

    AdminRegistry::builder()
        .register_with(product)?
        .register(EntityKind::Category)?
        .register(EntityKind::Cart)?
        .register(EntityKind::Brand)?
        .register(EntityKind::Tag)?
        .register_with(attribute)?
        .finish()
}
