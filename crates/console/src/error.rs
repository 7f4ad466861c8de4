//! Configuration-time error model.

use thiserror::Error;

use shopadmin_core::EntityKind;

/// A contradiction in the admin configuration.
///
/// These surface while the registry is being constructed, never while a page
/// is rendering.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{kind} has no field named '{field}'")]
    UnknownField { kind: EntityKind, field: String },

    #[error("'{field}' on {kind} is not editable")]
    NotEditable { kind: EntityKind, field: String },

    #[error("'{field}' cannot drive a sidebar filter (not a flag or relation)")]
    Unfilterable { field: String },

    #[error("'{field}' is not a text field and cannot be searched")]
    Unsearchable { field: String },

    #[error("'{field}' is not a foreign key; eager join makes no sense")]
    NotForeignKey { field: String },

    #[error("'{field}' is not a many-to-many relation")]
    NotManyToMany { field: String },

    #[error("list-editable field '{field}' is not among the list columns")]
    ListEditableNotListed { field: String },

    #[error("list-editable field '{field}' is the leading link column")]
    ListEditableLeadingColumn { field: String },

    #[error("field '{field}' appears in more than one fieldset")]
    FieldsetOverlap { field: String },

    #[error("editable field '{field}' appears in no fieldset")]
    FieldsetIncomplete { field: String },

    #[error("list_per_page must be at least 1")]
    ZeroPageSize,

    #[error("{owned} carries no foreign key to {owner}; it cannot be inlined")]
    InlineNotOwned { owner: EntityKind, owned: EntityKind },

    #[error("prepopulation target '{field}' must be an editable text field")]
    BadPrepopulationTarget { field: String },

    #[error("{0} is already registered")]
    DuplicateRegistration(EntityKind),

    #[error("{0} was never registered")]
    Unregistered(EntityKind),
}
