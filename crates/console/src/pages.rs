//! Admin page assembly.
//!
//! Pages are plain data: the list page is the configured columns resolved
//! against the store (filtered, searched, paginated), the detail page is the
//! configured fieldsets plus inline attribute rows. Rendering them to HTML
//! is someone else's job.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use shopadmin_catalog::{Brand, Product};
use shopadmin_core::{AttributeId, BrandId, CategoryId, EntityKind, ProductId};
use shopadmin_store::{CatalogStore, StoreError};

use crate::options::AdminOptions;
use crate::registry::AdminRegistry;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The sidebar only offers declared filters; a query using anything else
    /// is a caller bug, not a user mistake.
    #[error("filter on '{field}' is not declared for this screen")]
    FilterNotDeclared { field: String },

    #[error("page numbers start at 1")]
    InvalidPage,
}

/// One resolved cell of a listing row or detail group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    Text(String),
    Money(u64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    /// Resolved display name of a foreign key, if set.
    Reference(Option<String>),
    /// Resolved display names of a many-to-many relation.
    References(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    pub id: ProductId,
    pub cells: Vec<CellValue>,
}

/// The product listing screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPage {
    pub columns: Vec<String>,
    /// Columns editable in place, straight from the listing row.
    pub editable_columns: Vec<String>,
    /// Sidebar filters offered by this screen.
    pub sidebar_filters: Vec<String>,
    pub rows: Vec<ListRow>,
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
}

/// Filter/search/pagination parameters for the product listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number; `None` means the first page.
    pub page: Option<usize>,
    pub brand: Option<BrandId>,
    pub active: Option<bool>,
    pub category: Option<CategoryId>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailGroup {
    pub label: String,
    pub fields: Vec<(String, CellValue)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineRow {
    pub id: AttributeId,
    pub name: String,
    pub value: String,
}

/// An embedded editable sub-table on the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineSection {
    pub kind: EntityKind,
    pub rows: Vec<InlineRow>,
    /// Blank rows pre-offered for new entries.
    pub blank_rows: usize,
}

/// The product detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailPage {
    pub id: ProductId,
    pub groups: Vec<DetailGroup>,
    pub inlines: Vec<InlineSection>,
    /// (target, source) pairs the client should auto-fill via slugification.
    pub prepopulate: Vec<(String, String)>,
    pub save_on_top: bool,
}

/// Assemble the product listing page.
pub fn product_list_page(
    registry: &AdminRegistry,
    store: &CatalogStore,
    query: &ListQuery,
) -> Result<ListPage, PageError> {
    let options = registry.options(EntityKind::Product);
    check_declared_filters(options, query)?;

    let page = match query.page {
        None => 1,
        Some(0) => return Err(PageError::InvalidPage),
        Some(n) => n,
    };

    // The eager-join hint decides whether brands come resolved in one pass
    // or get looked up row by row.
    let rows: Vec<(Product, Option<Brand>)> =
        if options.list_select_related().iter().any(|f| f == "brand") {
            store.products_with_brand()?
        } else {
            let mut out = Vec::new();
            for product in store.products()? {
                let brand = match product.brand {
                    Some(id) => Some(store.brand(&id)?),
                    None => None,
                };
                out.push((product, brand));
            }
            out
        };

    let category_names = category_name_index(store)?;

    let matches = |product: &Product| -> bool {
        if let Some(brand) = query.brand {
            if product.brand != Some(brand) {
                return false;
            }
        }
        if let Some(active) = query.active {
            if product.active != active {
                return false;
            }
        }
        if let Some(category) = query.category {
            if !product.categories.contains(&category) {
                return false;
            }
        }
        if let Some(needle) = &query.search {
            let needle = needle.to_lowercase();
            let hit = options.search_fields().iter().any(|field| {
                let haystack = match field.as_str() {
                    "title" => &product.title,
                    "description" => &product.description,
                    "slug" => &product.slug,
                    _ => return false,
                };
                haystack.to_lowercase().contains(&needle)
            });
            if !hit {
                return false;
            }
        }
        true
    };

    let filtered: Vec<&(Product, Option<Brand>)> =
        rows.iter().filter(|(p, _)| matches(p)).collect();

    let total = filtered.len();
    let per_page = options.list_per_page();
    let page_count = total.div_ceil(per_page).max(1);

    let page_rows: Vec<ListRow> = filtered
        .iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .map(|(product, brand)| ListRow {
            id: product.id,
            cells: options
                .list_display()
                .iter()
                .map(|column| cell_value(product, brand.as_ref(), &category_names, column))
                .collect(),
        })
        .collect();

    tracing::debug!(page, total, rows = page_rows.len(), "product list assembled");

    Ok(ListPage {
        columns: options.list_display().to_vec(),
        editable_columns: options.list_editable().to_vec(),
        sidebar_filters: options.list_filter().to_vec(),
        rows: page_rows,
        page,
        page_count,
        total,
    })
}

/// Assemble the product detail page: fieldset groups plus inline sections.
pub fn product_detail_page(
    registry: &AdminRegistry,
    store: &CatalogStore,
    id: &ProductId,
) -> Result<DetailPage, PageError> {
    let options = registry.options(EntityKind::Product);
    let product = store.product(id)?;

    let brand = match product.brand {
        Some(brand_id) => Some(store.brand(&brand_id)?),
        None => None,
    };
    let category_names = category_name_index(store)?;

    let groups = options
        .fieldsets()
        .iter()
        .map(|group| DetailGroup {
            label: group.label.clone(),
            fields: group
                .fields
                .iter()
                .map(|field| {
                    (
                        field.clone(),
                        cell_value(&product, brand.as_ref(), &category_names, field),
                    )
                })
                .collect(),
        })
        .collect();

    let mut inlines = Vec::new();
    for spec in options.inlines() {
        // Attribute is the only owned entity in this catalog.
        let rows = store
            .attributes_of(id)?
            .into_iter()
            .map(|a| InlineRow {
                id: a.id,
                name: a.name,
                value: a.value,
            })
            .collect();
        inlines.push(InlineSection {
            kind: spec.owned,
            rows,
            blank_rows: spec.extra,
        });
    }

    Ok(DetailPage {
        id: product.id,
        groups,
        inlines,
        prepopulate: options.prepopulated().to_vec(),
        save_on_top: options.save_on_top(),
    })
}

fn check_declared_filters(options: &AdminOptions, query: &ListQuery) -> Result<(), PageError> {
    let candidates: [(&str, bool); 3] = [
        ("brand", query.brand.is_some()),
        ("active", query.active.is_some()),
        ("categories", query.category.is_some()),
    ];
    for (field, used) in candidates {
        if used && !options.is_filter_declared(field) {
            return Err(PageError::FilterNotDeclared {
                field: field.to_string(),
            });
        }
    }
    Ok(())
}

fn category_name_index(
    store: &CatalogStore,
) -> Result<std::collections::HashMap<CategoryId, String>, PageError> {
    Ok(store
        .categories()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect())
}

fn cell_value(
    product: &Product,
    brand: Option<&Brand>,
    category_names: &std::collections::HashMap<CategoryId, String>,
    column: &str,
) -> CellValue {
    match column {
        "title" => CellValue::Text(product.title.clone()),
        "slug" => CellValue::Text(product.slug.clone()),
        "price" => CellValue::Money(product.price_cents),
        "brand" => CellValue::Reference(brand.map(|b| b.name.clone())),
        "active" => CellValue::Bool(product.active),
        "created" => CellValue::Timestamp(product.created_at),
        "updated" => CellValue::Timestamp(product.updated_at),
        "description" => CellValue::Text(product.description.clone()),
        "categories" => CellValue::References(
            product
                .categories
                .iter()
                .map(|c| {
                    category_names
                        .get(c)
                        .cloned()
                        .unwrap_or_else(|| c.to_string())
                })
                .collect(),
        ),
        // Column names were validated at registry construction.
        other => CellValue::Text(format!("<unknown column {other}>")),
    }
}
