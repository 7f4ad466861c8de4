use anyhow::Context;

use shopadmin_catalog::{Attribute, Brand, Category, Product};
use shopadmin_console::pages::{self, ListQuery};
use shopadmin_console::site;
use shopadmin_store::CatalogStore;

/// Build the default admin site over a seeded in-memory catalog and print
/// the first product listing page and one detail page as JSON.
fn main() -> anyhow::Result<()> {
    shopadmin_observability::init();

    let registry = site::catalog_admin().context("admin configuration is contradictory")?;
    tracing::info!(entities = registry.len(), "admin registry built");

    let store = CatalogStore::new();
    seed(&store)?;

    let listing = pages::product_list_page(&registry, &store, &ListQuery::default())?;
    println!("{}", serde_json::to_string_pretty(&listing)?);

    let first = listing.rows.first().context("seed produced no products")?;
    let detail = pages::product_detail_page(&registry, &store, &first.id)?;
    println!("{}", serde_json::to_string_pretty(&detail)?);

    Ok(())
}

fn seed(store: &CatalogStore) -> anyhow::Result<()> {
    let acme = store.insert_brand(Brand::new("Acme")?)?;
    let shoes = store.insert_category(Category::new("Shoes")?)?;
    let sale = store.insert_category(Category::new("Sale")?)?;

    for (title, price) in [
        ("Red Shoes", 4999u64),
        ("Blue Shoes", 5499),
        ("Trail Runners", 8999),
        ("Canvas Sneakers", 3999),
        ("Winter Boots", 12999),
        ("Sandals", 2499),
        ("Slippers", 1999),
    ] {
        let mut product = Product::new(title, None, price)?;
        product.assign_brand(Some(acme));
        product.add_category(shoes);
        if price < 4000 {
            product.add_category(sale);
        }
        product.set_description(format!("{title}, by Acme."));
        let id = store.insert_product(product)?;
        store.insert_attribute(Attribute::new(id, "material", "leather")?)?;
    }

    Ok(())
}
