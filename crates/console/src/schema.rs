//! Per-entity field schemas.
//!
//! Admin options are declared by field name; these tables are what those
//! names are validated against at registry construction time, instead of
//! being resolved dynamically when a page renders.

use shopadmin_core::EntityKind;

/// The shape of a single entity field, as far as the console needs to know.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Short free text (searchable).
    Text,
    /// Long free text (searchable).
    LongText,
    /// Amount in minor currency units.
    Money,
    Bool,
    /// Framework-managed timestamp; never directly edited.
    Timestamp,
    /// Reference to a single row of another entity.
    ForeignKey(EntityKind),
    /// Reference to many rows of another entity.
    ManyToMany(EntityKind),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub ftype: FieldType,
    /// Whether the field appears on edit forms (timestamps and ids do not).
    pub editable: bool,
}

impl FieldDef {
    const fn editable(name: &'static str, ftype: FieldType) -> Self {
        Self {
            name,
            ftype,
            editable: true,
        }
    }

    const fn readonly(name: &'static str, ftype: FieldType) -> Self {
        Self {
            name,
            ftype,
            editable: false,
        }
    }

    pub fn is_searchable(&self) -> bool {
        matches!(self.ftype, FieldType::Text | FieldType::LongText)
    }

    /// Sidebar filters work on flags and relations.
    pub fn is_filterable(&self) -> bool {
        matches!(
            self.ftype,
            FieldType::Bool | FieldType::ForeignKey(_) | FieldType::ManyToMany(_)
        )
    }
}

/// The known fields of one entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    pub kind: EntityKind,
    pub fields: &'static [FieldDef],
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    pub fn editable_fields(&self) -> impl Iterator<Item = &FieldDef> + '_ {
        self.fields.iter().filter(|f| f.editable)
    }

    /// Whether this entity carries a foreign key to `owner` (inline support).
    pub fn owned_by(&self, owner: EntityKind) -> bool {
        self.fields
            .iter()
            .any(|f| f.ftype == FieldType::ForeignKey(owner) && f.editable)
    }
}

const PRODUCT_FIELDS: &[FieldDef] = &[
    FieldDef::editable("title", FieldType::Text),
    FieldDef::editable("slug", FieldType::Text),
    FieldDef::editable("price", FieldType::Money),
    FieldDef::editable("brand", FieldType::ForeignKey(EntityKind::Brand)),
    FieldDef::editable("active", FieldType::Bool),
    FieldDef::readonly("created", FieldType::Timestamp),
    FieldDef::readonly("updated", FieldType::Timestamp),
    FieldDef::editable("description", FieldType::LongText),
    FieldDef::editable("categories", FieldType::ManyToMany(EntityKind::Category)),
];

const CATEGORY_FIELDS: &[FieldDef] = &[
    FieldDef::editable("name", FieldType::Text),
    FieldDef::editable("slug", FieldType::Text),
];

const BRAND_FIELDS: &[FieldDef] = &[FieldDef::editable("name", FieldType::Text)];

const TAG_FIELDS: &[FieldDef] = &[FieldDef::editable("name", FieldType::Text)];

const CART_FIELDS: &[FieldDef] = &[
    FieldDef::editable("customer", FieldType::Text),
    FieldDef::editable("items", FieldType::ManyToMany(EntityKind::Product)),
];

const ATTRIBUTE_FIELDS: &[FieldDef] = &[
    FieldDef::editable("product", FieldType::ForeignKey(EntityKind::Product)),
    FieldDef::editable("name", FieldType::Text),
    FieldDef::editable("value", FieldType::Text),
];

/// Schema lookup for a catalog entity kind.
pub fn schema(kind: EntityKind) -> EntitySchema {
    let fields = match kind {
        EntityKind::Product => PRODUCT_FIELDS,
        EntityKind::Category => CATEGORY_FIELDS,
        EntityKind::Brand => BRAND_FIELDS,
        EntityKind::Tag => TAG_FIELDS,
        EntityKind::Cart => CART_FIELDS,
        EntityKind::Attribute => ATTRIBUTE_FIELDS,
    };
    EntitySchema { kind, fields }
}
