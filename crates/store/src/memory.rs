use std::collections::HashMap;
use std::sync::RwLock;

use shopadmin_catalog::{Attribute, Brand, Cart, Category, Product, Tag};
use shopadmin_core::{
    AttributeId, BrandId, CartId, CategoryId, DomainResult, EntityKind, ProductId, TagId,
};

use crate::error::{StoreError, StoreResult};

/// In-memory catalog store.
///
/// One map per entity. Listing orders rows by identifier; IDs are UUIDv7, so
/// that order is creation order. Attribute rows are exclusively owned by
/// their product and are cascade-deleted with it; deleting a category or a
/// brand only clears the references on surviving products.
#[derive(Debug, Default)]
pub struct CatalogStore {
    products: RwLock<HashMap<ProductId, Product>>,
    categories: RwLock<HashMap<CategoryId, Category>>,
    brands: RwLock<HashMap<BrandId, Brand>>,
    tags: RwLock<HashMap<TagId, Tag>>,
    carts: RwLock<HashMap<CartId, Cart>>,
    attributes: RwLock<HashMap<AttributeId, Attribute>>,
}

fn sorted_by_id<I: Ord + Copy, T>(map: &HashMap<I, T>, id_of: impl Fn(&T) -> I) -> Vec<T>
where
    T: Clone,
{
    let mut rows: Vec<T> = map.values().cloned().collect();
    rows.sort_by_key(|row| id_of(row));
    rows
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- products ---

    pub fn insert_product(&self, product: Product) -> StoreResult<ProductId> {
        let mut products = self.products.write().map_err(|_| StoreError::LockPoisoned)?;
        if products.values().any(|p| p.slug == product.slug) {
            return Err(StoreError::DuplicateSlug(product.slug));
        }
        let id = product.id;
        tracing::debug!(product_id = %id, slug = %product.slug, "product inserted");
        products.insert(id, product);
        Ok(id)
    }

    pub fn product(&self, id: &ProductId) -> StoreResult<Product> {
        let products = self.products.read().map_err(|_| StoreError::LockPoisoned)?;
        products
            .get(id)
            .cloned()
            .ok_or(StoreError::not_found(EntityKind::Product))
    }

    /// All products in creation order.
    pub fn products(&self) -> StoreResult<Vec<Product>> {
        let products = self.products.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(sorted_by_id(&*products, |p| p.id))
    }

    /// Products with their brand resolved in the same pass: the eager-join
    /// answering the console's `list_select_related` hint.
    pub fn products_with_brand(&self) -> StoreResult<Vec<(Product, Option<Brand>)>> {
        let products = self.products.read().map_err(|_| StoreError::LockPoisoned)?;
        let brands = self.brands.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut rows: Vec<(Product, Option<Brand>)> = products
            .values()
            .map(|p| {
                let brand = p.brand.and_then(|b| brands.get(&b).cloned());
                (p.clone(), brand)
            })
            .collect();
        rows.sort_by_key(|(p, _)| p.id);
        Ok(rows)
    }

    /// Apply an edit to a product and return the updated row.
    pub fn update_product(
        &self,
        id: &ProductId,
        edit: impl FnOnce(&mut Product) -> DomainResult<()>,
    ) -> StoreResult<Product> {
        let mut products = self.products.write().map_err(|_| StoreError::LockPoisoned)?;
        let product = products
            .get_mut(id)
            .ok_or(StoreError::not_found(EntityKind::Product))?;
        // Edit a copy so a failing edit leaves the stored row untouched.
        let mut updated = product.clone();
        edit(&mut updated)?;
        *product = updated.clone();
        Ok(updated)
    }

    /// Delete a product and cascade to its attribute rows.
    pub fn delete_product(&self, id: &ProductId) -> StoreResult<()> {
        let mut products = self.products.write().map_err(|_| StoreError::LockPoisoned)?;
        if products.remove(id).is_none() {
            return Err(StoreError::not_found(EntityKind::Product));
        }
        drop(products);

        let mut attributes = self
            .attributes
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        let before = attributes.len();
        attributes.retain(|_, a| a.product != *id);
        let cascaded = before - attributes.len();
        tracing::info!(product_id = %id, cascaded, "product deleted");
        Ok(())
    }

    // --- categories ---

    pub fn insert_category(&self, category: Category) -> StoreResult<CategoryId> {
        let mut categories = self
            .categories
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        let id = category.id;
        categories.insert(id, category);
        Ok(id)
    }

    pub fn category(&self, id: &CategoryId) -> StoreResult<Category> {
        let categories = self.categories.read().map_err(|_| StoreError::LockPoisoned)?;
        categories
            .get(id)
            .cloned()
            .ok_or(StoreError::not_found(EntityKind::Category))
    }

    pub fn categories(&self) -> StoreResult<Vec<Category>> {
        let categories = self.categories.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(sorted_by_id(&*categories, |c| c.id))
    }

    /// Delete a category; products referencing it only lose the relation.
    pub fn delete_category(&self, id: &CategoryId) -> StoreResult<()> {
        let mut categories = self
            .categories
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        if categories.remove(id).is_none() {
            return Err(StoreError::not_found(EntityKind::Category));
        }
        drop(categories);

        let mut products = self.products.write().map_err(|_| StoreError::LockPoisoned)?;
        for product in products.values_mut() {
            product.remove_category(*id);
        }
        Ok(())
    }

    // --- brands ---

    pub fn insert_brand(&self, brand: Brand) -> StoreResult<BrandId> {
        let mut brands = self.brands.write().map_err(|_| StoreError::LockPoisoned)?;
        let id = brand.id;
        brands.insert(id, brand);
        Ok(id)
    }

    pub fn brand(&self, id: &BrandId) -> StoreResult<Brand> {
        let brands = self.brands.read().map_err(|_| StoreError::LockPoisoned)?;
        brands
            .get(id)
            .cloned()
            .ok_or(StoreError::not_found(EntityKind::Brand))
    }

    pub fn brands(&self) -> StoreResult<Vec<Brand>> {
        let brands = self.brands.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(sorted_by_id(&*brands, |b| b.id))
    }

    /// Delete a brand; products referencing it only lose the reference.
    pub fn delete_brand(&self, id: &BrandId) -> StoreResult<()> {
        let mut brands = self.brands.write().map_err(|_| StoreError::LockPoisoned)?;
        if brands.remove(id).is_none() {
            return Err(StoreError::not_found(EntityKind::Brand));
        }
        drop(brands);

        let mut products = self.products.write().map_err(|_| StoreError::LockPoisoned)?;
        for product in products.values_mut() {
            if product.brand == Some(*id) {
                product.assign_brand(None);
            }
        }
        Ok(())
    }

    // --- tags ---

    pub fn insert_tag(&self, tag: Tag) -> StoreResult<TagId> {
        let mut tags = self.tags.write().map_err(|_| StoreError::LockPoisoned)?;
        let id = tag.id;
        tags.insert(id, tag);
        Ok(id)
    }

    pub fn tags(&self) -> StoreResult<Vec<Tag>> {
        let tags = self.tags.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(sorted_by_id(&*tags, |t| t.id))
    }

    pub fn delete_tag(&self, id: &TagId) -> StoreResult<()> {
        let mut tags = self.tags.write().map_err(|_| StoreError::LockPoisoned)?;
        if tags.remove(id).is_none() {
            return Err(StoreError::not_found(EntityKind::Tag));
        }
        Ok(())
    }

    // --- carts ---

    pub fn insert_cart(&self, cart: Cart) -> StoreResult<CartId> {
        let mut carts = self.carts.write().map_err(|_| StoreError::LockPoisoned)?;
        let id = cart.id;
        carts.insert(id, cart);
        Ok(id)
    }

    pub fn cart(&self, id: &CartId) -> StoreResult<Cart> {
        let carts = self.carts.read().map_err(|_| StoreError::LockPoisoned)?;
        carts
            .get(id)
            .cloned()
            .ok_or(StoreError::not_found(EntityKind::Cart))
    }

    pub fn carts(&self) -> StoreResult<Vec<Cart>> {
        let carts = self.carts.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(sorted_by_id(&*carts, |c| c.id))
    }

    // --- attributes ---

    /// Insert an attribute row. The owning product must exist.
    pub fn insert_attribute(&self, attribute: Attribute) -> StoreResult<AttributeId> {
        {
            let products = self.products.read().map_err(|_| StoreError::LockPoisoned)?;
            if !products.contains_key(&attribute.product) {
                return Err(StoreError::not_found(EntityKind::Product));
            }
        }
        let mut attributes = self
            .attributes
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        let id = attribute.id;
        attributes.insert(id, attribute);
        Ok(id)
    }

    pub fn attribute(&self, id: &AttributeId) -> StoreResult<Attribute> {
        let attributes = self
            .attributes
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        attributes
            .get(id)
            .cloned()
            .ok_or(StoreError::not_found(EntityKind::Attribute))
    }

    pub fn attributes(&self) -> StoreResult<Vec<Attribute>> {
        let attributes = self
            .attributes
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(sorted_by_id(&*attributes, |a| a.id))
    }

    /// Attribute rows owned by one product, in creation order.
    pub fn attributes_of(&self, product: &ProductId) -> StoreResult<Vec<Attribute>> {
        let attributes = self
            .attributes
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        let mut rows: Vec<Attribute> = attributes
            .values()
            .filter(|a| a.product == *product)
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.id);
        Ok(rows)
    }

    /// Apply an edit to an attribute row and return the updated row.
    pub fn update_attribute(
        &self,
        id: &AttributeId,
        edit: impl FnOnce(&mut Attribute) -> DomainResult<()>,
    ) -> StoreResult<Attribute> {
        let mut attributes = self
            .attributes
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        let attribute = attributes
            .get_mut(id)
            .ok_or(StoreError::not_found(EntityKind::Attribute))?;
        let mut updated = attribute.clone();
        edit(&mut updated)?;
        *attribute = updated.clone();
        Ok(updated)
    }

    pub fn delete_attribute(&self, id: &AttributeId) -> StoreResult<()> {
        let mut attributes = self
            .attributes
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        if attributes.remove(id).is_none() {
            return Err(StoreError::not_found(EntityKind::Attribute));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_product() -> (CatalogStore, ProductId) {
        let store = CatalogStore::new();
        let product = Product::new("Red Shoes", None, 4999).unwrap();
        let id = store.insert_product(product).unwrap();
        (store, id)
    }

    #[test]
    fn insert_then_get_round_trips() {
        let (store, id) = store_with_product();
        let product = store.product(&id).unwrap();
        assert_eq!(product.slug, "red-shoes");
    }

    #[test]
    fn duplicate_slug_is_a_conflict() {
        let (store, _) = store_with_product();
        let twin = Product::new("Red Shoes", None, 100).unwrap();
        let err = store.insert_product(twin).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSlug(s) if s == "red-shoes"));
    }

    #[test]
    fn deleting_a_product_cascades_to_its_attributes() {
        let (store, id) = store_with_product();
        let other = store
            .insert_product(Product::new("Blue Shoes", None, 5999).unwrap())
            .unwrap();

        store
            .insert_attribute(Attribute::new(id, "color", "red").unwrap())
            .unwrap();
        store
            .insert_attribute(Attribute::new(id, "size", "42").unwrap())
            .unwrap();
        store
            .insert_attribute(Attribute::new(other, "color", "blue").unwrap())
            .unwrap();

        store.delete_product(&id).unwrap();

        assert!(store.attributes_of(&id).unwrap().is_empty());
        assert_eq!(store.attributes_of(&other).unwrap().len(), 1);
        assert!(matches!(
            store.product(&id).unwrap_err(),
            StoreError::NotFound {
                kind: EntityKind::Product
            }
        ));
    }

    #[test]
    fn deleting_a_brand_keeps_the_product() {
        let (store, id) = store_with_product();
        let brand = store.insert_brand(Brand::new("Acme").unwrap()).unwrap();
        store
            .update_product(&id, |p| {
                p.assign_brand(Some(brand));
                Ok(())
            })
            .unwrap();

        store.delete_brand(&brand).unwrap();

        let product = store.product(&id).unwrap();
        assert_eq!(product.brand, None);
    }

    #[test]
    fn deleting_a_category_only_clears_the_relation() {
        let (store, id) = store_with_product();
        let shoes = store
            .insert_category(Category::new("Shoes").unwrap())
            .unwrap();
        let sale = store
            .insert_category(Category::new("Sale").unwrap())
            .unwrap();
        store
            .update_product(&id, |p| {
                p.add_category(shoes);
                p.add_category(sale);
                Ok(())
            })
            .unwrap();

        store.delete_category(&shoes).unwrap();

        let product = store.product(&id).unwrap();
        assert_eq!(product.categories, vec![sale]);
    }

    #[test]
    fn attribute_insert_requires_owner() {
        let store = CatalogStore::new();
        let orphan = Attribute::new(ProductId::new(), "color", "red").unwrap();
        assert!(matches!(
            store.insert_attribute(orphan).unwrap_err(),
            StoreError::NotFound {
                kind: EntityKind::Product
            }
        ));
    }

    #[test]
    fn products_with_brand_resolves_the_join() {
        let (store, id) = store_with_product();
        let brand = store.insert_brand(Brand::new("Acme").unwrap()).unwrap();
        store
            .update_product(&id, |p| {
                p.assign_brand(Some(brand));
                Ok(())
            })
            .unwrap();

        let rows = store.products_with_brand().unwrap();
        assert_eq!(rows.len(), 1);
        let (_, joined) = &rows[0];
        assert_eq!(joined.as_ref().map(|b| b.name.as_str()), Some("Acme"));
    }

    #[test]
    fn update_propagates_domain_errors() {
        let (store, id) = store_with_product();
        let err = store
            .update_product(&id, |p| p.set_slug(""))
            .unwrap_err();
        assert!(matches!(err, StoreError::Domain(_)));
        // Failed edit must not have partially applied.
        assert_eq!(store.product(&id).unwrap().slug, "red-shoes");
    }

    #[test]
    fn listing_is_in_creation_order() {
        let store = CatalogStore::new();
        let first = store
            .insert_product(Product::new("One", None, 1).unwrap())
            .unwrap();
        let second = store
            .insert_product(Product::new("Two", None, 2).unwrap())
            .unwrap();
        let third = store
            .insert_product(Product::new("Three", None, 3).unwrap())
            .unwrap();

        let ids: Vec<ProductId> = store.products().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![first, second, third]);
    }

    #[test]
    fn deleting_a_tag_touches_nothing_else() {
        let (store, id) = store_with_product();
        let sale = store.insert_tag(Tag::new("Sale").unwrap()).unwrap();
        store.insert_tag(Tag::new("New").unwrap()).unwrap();

        store.delete_tag(&sale).unwrap();

        let names: Vec<String> = store.tags().unwrap().iter().map(|t| t.name.clone()).collect();
        assert_eq!(names, vec!["New"]);
        assert!(store.product(&id).is_ok());
        assert!(matches!(
            store.delete_tag(&sale).unwrap_err(),
            StoreError::NotFound {
                kind: EntityKind::Tag
            }
        ));
    }

    #[test]
    fn cart_round_trips_with_its_items() {
        let (store, id) = store_with_product();
        let mut cart = Cart::new("alex");
        cart.add_item(id);
        let cart_id = store.insert_cart(cart).unwrap();

        let stored = store.cart(&cart_id).unwrap();
        assert_eq!(stored.customer, "alex");
        assert_eq!(stored.items, vec![id]);
        assert_eq!(store.carts().unwrap().len(), 1);
    }

    #[test]
    fn brands_list_in_creation_order() {
        let store = CatalogStore::new();
        let acme = store.insert_brand(Brand::new("Acme").unwrap()).unwrap();
        let zenith = store.insert_brand(Brand::new("Zenith").unwrap()).unwrap();

        let ids: Vec<BrandId> = store.brands().unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![acme, zenith]);
    }

    #[test]
    fn attribute_fetch_by_id() {
        let (store, id) = store_with_product();
        let attr = store
            .insert_attribute(Attribute::new(id, "color", "red").unwrap())
            .unwrap();

        let stored = store.attribute(&attr).unwrap();
        assert_eq!(stored.name, "color");
        assert!(matches!(
            store.attribute(&AttributeId::new()).unwrap_err(),
            StoreError::NotFound {
                kind: EntityKind::Attribute
            }
        ));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: after deleting any product, no attribute row in the
            /// store references it.
            #[test]
            fn cascade_leaves_no_orphans(attr_counts in proptest::collection::vec(0usize..5, 1..6)) {
                let store = CatalogStore::new();
                let mut ids = Vec::new();
                for (i, count) in attr_counts.iter().enumerate() {
                    let product = Product::new(format!("Product {i}"), None, 100).unwrap();
                    let id = store.insert_product(product).unwrap();
                    for j in 0..*count {
                        let attr = Attribute::new(id, format!("k{j}"), "v").unwrap();
                        store.insert_attribute(attr).unwrap();
                    }
                    ids.push(id);
                }

                let victim = ids[0];
                store.delete_product(&victim).unwrap();

                for attr in store.attributes().unwrap() {
                    prop_assert_ne!(attr.product, victim);
                    prop_assert!(store.product(&attr.product).is_ok());
                }
            }
        }
    }
}
