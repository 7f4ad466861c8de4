//! Typed per-entity admin customization.
//!
//! The dictionary-of-options configuration becomes a builder over named,
//! typed settings, checked against the entity schema when built. A settings
//! mistake is a `ConfigError` at construction, not a broken page later.

use shopadmin_core::EntityKind;

use crate::error::ConfigError;
use crate::schema::{self, EntitySchema, FieldType};

/// Widget style for choosing rows of a many-to-many relation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MultiSelectWidget {
    Horizontal,
    Vertical,
}

/// A named group of detail-form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGroup {
    pub label: String,
    pub fields: Vec<String>,
}

/// An embedded sub-table of an owned entity on the owner's detail page.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InlineSpec {
    pub owned: EntityKind,
    /// Blank rows pre-offered for new entries.
    pub extra: usize,
}

/// Validated admin customization for one entity kind.
///
/// Construct through [`AdminOptions::builder`]; a value of this type always
/// describes a coherent configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminOptions {
    kind: EntityKind,
    list_display: Vec<String>,
    list_filter: Vec<String>,
    search_fields: Vec<String>,
    list_editable: Vec<String>,
    list_select_related: Vec<String>,
    multi_select: Option<(Vec<String>, MultiSelectWidget)>,
    prepopulated: Vec<(String, String)>,
    fieldsets: Vec<FieldGroup>,
    save_on_top: bool,
    list_per_page: usize,
    inlines: Vec<InlineSpec>,
}

/// Framework default when nothing is customized: every field is a column,
/// 100 rows per page.
const DEFAULT_LIST_PER_PAGE: usize = 100;

impl AdminOptions {
    pub fn builder(kind: EntityKind) -> OptionsBuilder {
        OptionsBuilder::new(kind)
    }

    /// Defaults for an uncustomized registration. Infallible by
    /// construction: nothing user-supplied is involved.
    pub(crate) fn defaults(kind: EntityKind) -> Self {
        let schema = schema::schema(kind);
        Self {
            kind,
            list_display: schema.field_names().map(str::to_string).collect(),
            list_filter: Vec::new(),
            search_fields: Vec::new(),
            list_editable: Vec::new(),
            list_select_related: Vec::new(),
            multi_select: None,
            prepopulated: Vec::new(),
            fieldsets: Vec::new(),
            save_on_top: false,
            list_per_page: DEFAULT_LIST_PER_PAGE,
            inlines: Vec::new(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn list_display(&self) -> &[String] {
        &self.list_display
    }

    pub fn list_filter(&self) -> &[String] {
        &self.list_filter
    }

    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    pub fn list_editable(&self) -> &[String] {
        &self.list_editable
    }

    pub fn list_select_related(&self) -> &[String] {
        &self.list_select_related
    }

    /// Active multi-select widget declaration, if any. When both styles were
    /// declared during building, the later declaration is the one kept.
    pub fn multi_select(&self) -> Option<(&[String], MultiSelectWidget)> {
        self.multi_select
            .as_ref()
            .map(|(fields, widget)| (fields.as_slice(), *widget))
    }

    /// (target, source) pairs: target auto-fills from source client-side.
    pub fn prepopulated(&self) -> &[(String, String)] {
        &self.prepopulated
    }

    pub fn fieldsets(&self) -> &[FieldGroup] {
        &self.fieldsets
    }

    pub fn save_on_top(&self) -> bool {
        self.save_on_top
    }

    pub fn list_per_page(&self) -> usize {
        self.list_per_page
    }

    pub fn inlines(&self) -> &[InlineSpec] {
        &self.inlines
    }

    pub fn has_inline(&self, owned: EntityKind) -> bool {
        self.inlines.iter().any(|i| i.owned == owned)
    }

    pub fn is_list_editable(&self, field: &str) -> bool {
        self.list_editable.iter().any(|f| f == field)
    }

    pub fn is_filter_declared(&self, field: &str) -> bool {
        self.list_filter.iter().any(|f| f == field)
    }
}

/// Collects raw declarations; all validation happens in [`OptionsBuilder::build`].
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    kind: EntityKind,
    list_display: Option<Vec<String>>,
    list_filter: Vec<String>,
    search_fields: Vec<String>,
    list_editable: Vec<String>,
    list_select_related: Vec<String>,
    multi_select: Option<(Vec<String>, MultiSelectWidget)>,
    prepopulated: Vec<(String, String)>,
    fieldsets: Vec<FieldGroup>,
    save_on_top: bool,
    list_per_page: usize,
    inlines: Vec<InlineSpec>,
}

fn to_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Into::into).collect()
}

impl OptionsBuilder {
    fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            list_display: None,
            list_filter: Vec::new(),
            search_fields: Vec::new(),
            list_editable: Vec::new(),
            list_select_related: Vec::new(),
            multi_select: None,
            prepopulated: Vec::new(),
            fieldsets: Vec::new(),
            save_on_top: false,
            list_per_page: DEFAULT_LIST_PER_PAGE,
            inlines: Vec::new(),
        }
    }

    /// Columns of the listing table, in display order.
    pub fn list_display<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_display = Some(to_names(fields));
        self
    }

    /// Sidebar filters.
    pub fn list_filter<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_filter = to_names(fields);
        self
    }

    /// Full-text search scope.
    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = to_names(fields);
        self
    }

    /// Columns editable directly from the listing row.
    pub fn list_editable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_editable = to_names(fields);
        self
    }

    /// Eager-join hint: resolve these foreign keys when listing.
    pub fn list_select_related<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_select_related = to_names(fields);
        self
    }

    /// Side-by-side multi-select widget. Replaces any earlier widget
    /// declaration: the last style declared is the one applied.
    pub fn filter_horizontal<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.multi_select = Some((to_names(fields), MultiSelectWidget::Horizontal));
        self
    }

    /// Stacked multi-select widget. Replaces any earlier widget declaration.
    pub fn filter_vertical<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.multi_select = Some((to_names(fields), MultiSelectWidget::Vertical));
        self
    }

    /// `target` auto-fills from `source` (slugified) client-side; the value
    /// stays editable afterwards.
    pub fn prepopulate(mut self, target: impl Into<String>, source: impl Into<String>) -> Self {
        self.prepopulated.push((target.into(), source.into()));
        self
    }

    /// Append a named detail-form field group.
    pub fn fieldset<I, S>(mut self, label: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fieldsets.push(FieldGroup {
            label: label.into(),
            fields: to_names(fields),
        });
        self
    }

    /// Duplicate the save controls at the top of the detail view.
    pub fn save_on_top(mut self, on: bool) -> Self {
        self.save_on_top = on;
        self
    }

    pub fn list_per_page(mut self, per_page: usize) -> Self {
        self.list_per_page = per_page;
        self
    }

    /// Embed `owned` rows as an editable sub-table on the detail page, with
    /// `extra` blank rows pre-offered.
    pub fn inline(mut self, owned: EntityKind, extra: usize) -> Self {
        self.inlines.push(InlineSpec { owned, extra });
        self
    }

    /// Validate everything against the entity schema and produce the options.
    pub fn build(self) -> Result<AdminOptions, ConfigError> {
        let schema = schema::schema(self.kind);

        let list_display: Vec<String> = match &self.list_display {
            Some(fields) => {
                for field in fields {
                    self.require_field(&schema, field)?;
                }
                fields.clone()
            }
            None => schema.field_names().map(str::to_string).collect(),
        };

        for field in &self.list_filter {
            let def = self.require_field(&schema, field)?;
            if !def.is_filterable() {
                return Err(ConfigError::Unfilterable {
                    field: field.clone(),
                });
            }
        }

        for field in &self.search_fields {
            let def = self.require_field(&schema, field)?;
            if !def.is_searchable() {
                return Err(ConfigError::Unsearchable {
                    field: field.clone(),
                });
            }
        }

        for field in &self.list_editable {
            let def = self.require_field(&schema, field)?;
            if !def.editable {
                return Err(ConfigError::NotEditable {
                    kind: self.kind,
                    field: field.clone(),
                });
            }
            if !list_display.contains(field) {
                return Err(ConfigError::ListEditableNotListed {
                    field: field.clone(),
                });
            }
            // The first column is the detail-page link and must stay a link.
            if list_display.first().map(String::as_str) == Some(field.as_str()) {
                return Err(ConfigError::ListEditableLeadingColumn {
                    field: field.clone(),
                });
            }
        }

        for field in &self.list_select_related {
            let def = self.require_field(&schema, field)?;
            if !matches!(def.ftype, FieldType::ForeignKey(_)) {
                return Err(ConfigError::NotForeignKey {
                    field: field.clone(),
                });
            }
        }

        if let Some((fields, _)) = &self.multi_select {
            for field in fields {
                let def = self.require_field(&schema, field)?;
                if !matches!(def.ftype, FieldType::ManyToMany(_)) {
                    return Err(ConfigError::NotManyToMany {
                        field: field.clone(),
                    });
                }
            }
        }

        for (target, source) in &self.prepopulated {
            self.require_field(&schema, source)?;
            let def = self.require_field(&schema, target)?;
            if !def.editable || !def.is_searchable() {
                return Err(ConfigError::BadPrepopulationTarget {
                    field: target.clone(),
                });
            }
        }

        if !self.fieldsets.is_empty() {
            self.check_fieldsets(&schema)?;
        }

        if self.list_per_page == 0 {
            return Err(ConfigError::ZeroPageSize);
        }

        for inline in &self.inlines {
            if !schema::schema(inline.owned).owned_by(self.kind) {
                return Err(ConfigError::InlineNotOwned {
                    owner: self.kind,
                    owned: inline.owned,
                });
            }
        }

        Ok(AdminOptions {
            kind: self.kind,
            list_display,
            list_filter: self.list_filter,
            search_fields: self.search_fields,
            list_editable: self.list_editable,
            list_select_related: self.list_select_related,
            multi_select: self.multi_select,
            prepopulated: self.prepopulated,
            fieldsets: self.fieldsets,
            save_on_top: self.save_on_top,
            list_per_page: self.list_per_page,
            inlines: self.inlines,
        })
    }

    fn require_field<'s>(
        &self,
        schema: &'s EntitySchema,
        field: &str,
    ) -> Result<&'s crate::schema::FieldDef, ConfigError> {
        schema.field(field).ok_or_else(|| ConfigError::UnknownField {
            kind: self.kind,
            field: field.to_string(),
        })
    }

    /// Declared fieldsets must partition the entity's editable fields: no
    /// field in two groups, no editable field in none.
    fn check_fieldsets(&self, schema: &EntitySchema) -> Result<(), ConfigError> {
        let mut seen: Vec<&str> = Vec::new();
        for group in &self.fieldsets {
            for field in &group.fields {
                let def = self.require_field(schema, field)?;
                if !def.editable {
                    return Err(ConfigError::NotEditable {
                        kind: self.kind,
                        field: field.clone(),
                    });
                }
                if seen.contains(&field.as_str()) {
                    return Err(ConfigError::FieldsetOverlap {
                        field: field.clone(),
                    });
                }
                seen.push(field);
            }
        }

        for def in schema.editable_fields() {
            if !seen.contains(&def.name) {
                return Err(ConfigError::FieldsetIncomplete {
                    field: def.name.to_string(),
                });
            }
        }
        Ok(())
    }
}
