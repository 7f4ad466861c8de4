//! `shopadmin-console` — the catalog admin console.
//!
//! An admin registry is an explicit value built once at startup: entity
//! registrations are validated against per-entity field schemas when the
//! registry is constructed, so a contradictory configuration (duplicate
//! registration, unknown field, overlapping fieldsets) fails before anything
//! is served. Page assembly (`pages`) and form handling (`forms`) consume the
//! registry together with the catalog store.

pub mod error;
pub mod forms;
pub mod options;
pub mod pages;
pub mod registry;
pub mod schema;
pub mod site;

pub use error::ConfigError;
pub use options::{AdminOptions, FieldGroup, InlineSpec, MultiSelectWidget, OptionsBuilder};
pub use registry::{AdminRegistry, RegistryBuilder};
pub use schema::{EntitySchema, FieldDef, FieldType};
pub use site::catalog_admin;
