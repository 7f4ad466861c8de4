//! `shopadmin-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod slug;

pub use entity::{Entity, EntityKind};
pub use error::{DomainError, DomainResult};
pub use id::{AttributeId, BrandId, CartId, CategoryId, ProductId, TagId};
pub use slug::slugify;
