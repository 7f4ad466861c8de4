//! Simple labelled entities referenced by products.

use serde::{Deserialize, Serialize};

use shopadmin_core::{
    BrandId, CategoryId, DomainError, DomainResult, Entity, EntityKind, TagId, slugify,
};

/// A product category (carries its own slug for URL use).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("category name cannot be empty"));
        }
        let slug = slugify(&name);
        Ok(Self {
            id: CategoryId::new(),
            name,
            slug,
        })
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn kind() -> EntityKind {
        EntityKind::Category
    }
}

/// A product brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
}

impl Brand {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("brand name cannot be empty"));
        }
        Ok(Self {
            id: BrandId::new(),
            name,
        })
    }
}

impl Entity for Brand {
    type Id = BrandId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn kind() -> EntityKind {
        EntityKind::Brand
    }
}

/// A free-form product tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("tag name cannot be empty"));
        }
        Ok(Self {
            id: TagId::new(),
            name,
        })
    }
}

impl Entity for Tag {
    type Id = TagId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn kind() -> EntityKind {
        EntityKind::Tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_derives_its_slug() {
        let category = Category::new("Winter Boots").unwrap();
        assert_eq!(category.slug, "winter-boots");
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(Category::new(" ").is_err());
        assert!(Brand::new("").is_err());
        assert!(Tag::new("\t").is_err());
    }
}
