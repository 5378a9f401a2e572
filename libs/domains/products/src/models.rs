use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Rejects empty and whitespace-only strings
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Product entity
///
/// The owning category lives outside this service; only its id is stored and
/// nothing about the category is ever serialized with the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier
    pub id: i32,
    pub name: String,
    /// Stock keeping unit
    pub sku: String,
    /// Unit price
    #[serde(with = "rust_decimal::serde::float", alias = "value")]
    #[schema(value_type = f64, example = 19.99)]
    pub price: Decimal,
    pub description: String,
    /// Whether the product can currently be sold
    pub is_available: bool,
    /// Foreign key of the owning category
    pub category_id: i32,
}

/// Request body for create and full-replace operations
///
/// `id` is ignored on create. On replace it must equal the id in the path.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "sku is required"))]
    pub sku: String,
    #[serde(default, with = "rust_decimal::serde::float", alias = "value")]
    #[schema(value_type = f64, example = 19.99)]
    pub price: Decimal,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "description is required"))]
    pub description: String,
    #[serde(default)]
    pub is_available: bool,
    #[validate(required(message = "categoryId is required"))]
    pub category_id: Option<i32>,
}

impl Product {
    /// Build the stored entity for `id` from a validated input
    pub fn from_input(id: i32, input: ProductInput) -> Self {
        Self {
            id,
            name: input.name,
            sku: input.sku,
            price: input.price,
            description: input.description,
            is_available: input.is_available,
            category_id: input.category_id.unwrap_or_default(),
        }
    }
}
