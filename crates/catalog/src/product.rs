use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopadmin_core::{
    BrandId, CategoryId, DomainError, DomainResult, Entity, EntityKind, ProductId, slugify,
};

/// A product in the catalog.
///
/// The slug is derived from the title when none is supplied at creation time,
/// and stays editable afterwards (it is an independent field, not a computed
/// view of the title).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// URL-friendly identifier, unique-intent across the catalog.
    pub slug: String,
    /// Price in the smallest currency unit (e.g. cents).
    pub price_cents: u64,
    pub brand: Option<BrandId>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub categories: Vec<CategoryId>,
    pub description: String,
}

impl Product {
    /// Create a product. A missing `slug` is derived from the title by
    /// slugification; an explicit slug is taken as-is.
    pub fn new(
        title: impl Into<String>,
        slug: Option<&str>,
        price_cents: u64,
    ) -> DomainResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }

        let slug = match slug {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => {
                let derived = slugify(&title);
                if derived.is_empty() {
                    return Err(DomainError::validation(
                        "title yields an empty slug; supply one explicitly",
                    ));
                }
                derived
            }
        };

        let now = Utc::now();
        Ok(Self {
            id: ProductId::new(),
            title,
            slug,
            price_cents,
            brand: None,
            active: true,
            created_at: now,
            updated_at: now,
            categories: Vec::new(),
            description: String::new(),
        })
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.touch();
    }

    pub fn set_price_cents(&mut self, price_cents: u64) {
        self.price_cents = price_cents;
        self.touch();
    }

    /// Re-slug is intentional and explicit; retitling never rewrites the slug.
    pub fn set_slug(&mut self, slug: impl Into<String>) -> DomainResult<()> {
        let slug = slug.into();
        if slug.trim().is_empty() {
            return Err(DomainError::validation("slug cannot be empty"));
        }
        self.slug = slug;
        self.touch();
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> DomainResult<()> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }
        self.title = title;
        self.touch();
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    pub fn assign_brand(&mut self, brand: Option<BrandId>) {
        self.brand = brand;
        self.touch();
    }

    pub fn add_category(&mut self, category: CategoryId) {
        if !self.categories.contains(&category) {
            self.categories.push(category);
            self.touch();
        }
    }

    pub fn remove_category(&mut self, category: CategoryId) {
        let before = self.categories.len();
        self.categories.retain(|c| *c != category);
        if self.categories.len() != before {
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn kind() -> EntityKind {
        EntityKind::Product
    }
}
