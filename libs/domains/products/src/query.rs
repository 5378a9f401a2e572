//! Filter, sort and paginate a product sequence.
//!
//! Stages always run in that order: the optional filters narrow the
//! sequence, an optional single-field sort orders it, and the page window is
//! taken last.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de};
use strum::{Display, EnumString};
use utoipa::IntoParams;

use crate::models::Product;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 5;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// `minPrice=` with no value is the same as leaving the bound out
fn optional_price<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid price `{}`", raw))),
    }
}

/// Which products a listing may see before any filter applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductScope {
    #[default]
    All,
    AvailableOnly,
}

impl ProductScope {
    pub fn includes(&self, product: &Product) -> bool {
        match self {
            ProductScope::All => true,
            ProductScope::AvailableOnly => product.is_available,
        }
    }
}

/// Sortable product fields.
///
/// Both the camelCase wire names and the PascalCase property names are
/// accepted; anything else leaves the order untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum SortField {
    #[strum(to_string = "id", serialize = "Id")]
    Id,
    #[strum(to_string = "name", serialize = "Name")]
    Name,
    #[strum(to_string = "sku", serialize = "Sku")]
    Sku,
    #[strum(to_string = "price", serialize = "Price", serialize = "value")]
    Price,
    #[strum(to_string = "description", serialize = "Description")]
    Description,
    #[strum(to_string = "isAvailable", serialize = "IsAvailable")]
    IsAvailable,
    #[strum(to_string = "categoryId", serialize = "CategoryId")]
    CategoryId,
}

impl SortField {
    /// Natural ascending order of the field; strings compare ordinally
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Sku => a.sku.cmp(&b.sku),
            SortField::Price => a.price.cmp(&b.price),
            SortField::Description => a.description.cmp(&b.description),
            SortField::IsAvailable => a.is_available.cmp(&b.is_available),
            SortField::CategoryId => a.category_id.cmp(&b.category_id),
        }
    }
}

/// Sort direction; exactly `desc` is descending, every other value ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl From<String> for SortOrder {
    fn from(value: String) -> Self {
        if value == "desc" {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Query parameters accepted by the product listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Inclusive lower price bound
    #[serde(default, deserialize_with = "optional_price")]
    #[param(value_type = Option<f64>)]
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound
    #[serde(default, deserialize_with = "optional_price")]
    #[param(value_type = Option<f64>)]
    pub max_price: Option<Decimal>,
    /// Case-insensitive substring of SKU or name
    pub search_term: Option<String>,
    /// Case-insensitive exact SKU
    pub sku: Option<String>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Field to sort by, e.g. `price` or `name`
    pub sort_by: Option<String>,
    /// `desc` for descending, anything else ascending
    #[serde(default)]
    #[param(value_type = Option<String>, example = "desc")]
    pub sort_order: SortOrder,
    /// 1-based page number
    #[serde(default = "default_page")]
    #[param(default = 1)]
    pub page: u32,
    /// Page size
    #[serde(default = "default_size")]
    #[param(default = 5)]
    pub size: u32,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            min_price: None,
            max_price: None,
            search_term: None,
            sku: None,
            name: None,
            sort_by: None,
            sort_order: SortOrder::Asc,
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Empty strings count as "not supplied"
fn needle(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl ProductQuery {
    /// The recognised sort field, if any
    pub fn sort_field(&self) -> Option<SortField> {
        self.sort_by
            .as_deref()
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse().ok())
    }

    /// Number of items skipped before the page window starts
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.size as usize)
    }

    /// Run filter, sort and paginate over `source`
    pub fn apply<I>(&self, source: I) -> Vec<Product>
    where
        I: IntoIterator<Item = Product>,
    {
        let search = needle(&self.search_term);
        let sku = needle(&self.sku);
        let name = needle(&self.name);

        let mut items: Vec<Product> = source
            .into_iter()
            .filter(|p| self.min_price.is_none_or(|min| p.price >= min))
            .filter(|p| self.max_price.is_none_or(|max| p.price <= max))
            .filter(|p| {
                search
                    .as_deref()
                    .is_none_or(|term| contains_ci(&p.sku, term) || contains_ci(&p.name, term))
            })
            .filter(|p| sku.as_deref().is_none_or(|sku| p.sku.to_lowercase() == sku))
            .filter(|p| name.as_deref().is_none_or(|term| contains_ci(&p.name, term)))
            .collect();

        // sort_by is stable, so ties keep their source order in both directions
        if let Some(field) = self.sort_field() {
            match self.sort_order {
                SortOrder::Asc => items.sort_by(|a, b| field.compare(a, b)),
                SortOrder::Desc => items.sort_by(|a, b| field.compare(b, a)),
            }
        }

        items
            .into_iter()
            .skip(self.offset())
            .take(self.size as usize)
            .collect()
    }
}
