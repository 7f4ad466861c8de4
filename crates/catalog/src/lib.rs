//! Catalog domain module.
//!
//! This crate contains the store's catalog entities (products, the labels
//! they reference, carts, and per-product attributes), implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod attribute;
pub mod cart;
pub mod labels;
pub mod product;

pub use attribute::Attribute;
pub use cart::Cart;
pub use labels::{Brand, Category, Tag};
pub use product::Product;
