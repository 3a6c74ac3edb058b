//! Pure validation rules for product payloads.
//!
//! Every rule is checked and every failure is reported; nothing short-circuits.

use crate::domain::{NewProduct, ProductPatch};

/// Outcome of validating a candidate product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates a product about to be added.
pub fn validate_product(product: &NewProduct, categories: &[String]) -> ValidationResult {
    let mut errors = Vec::new();

    check_name(&product.name, &mut errors);

    match product.price {
        Some(price) => check_price(price, &mut errors),
        None => errors.push(PRICE_ERROR.to_string()),
    }

    match product.stock {
        Some(stock) if stock < 0 => errors.push(STOCK_ERROR.to_string()),
        Some(stock) if stock > i64::from(u32::MAX) => {
            errors.push(format!("Stock must not exceed {}", u32::MAX))
        }
        Some(_) => {}
        None => errors.push(STOCK_ERROR.to_string()),
    }

    if let Some(category) = &product.category {
        check_category(category, categories, &mut errors);
    }

    ValidationResult { errors }
}

/// Validates the fields an update is about to overwrite.
///
/// Absent fields keep their stored values, which already passed validation.
pub fn validate_patch(patch: &ProductPatch, categories: &[String]) -> ValidationResult {
    let mut errors = Vec::new();

    if let Some(name) = &patch.name {
        check_name(name, &mut errors);
    }
    if let Some(price) = patch.price {
        check_price(price, &mut errors);
    }
    if let Some(category) = &patch.category {
        check_category(category, categories, &mut errors);
    }

    ValidationResult { errors }
}

const PRICE_ERROR: &str = "Price must be a positive number";
const STOCK_ERROR: &str = "Stock must be a non-negative number";

fn check_name(name: &str, errors: &mut Vec<String>) {
    if name.trim().is_empty() {
        errors.push("Product name is required".to_string());
    }
}

fn check_price(price: f64, errors: &mut Vec<String>) {
    if price.is_nan() || price < 0.0 {
        errors.push(PRICE_ERROR.to_string());
    }
}

fn check_category(category: &str, categories: &[String], errors: &mut Vec<String>) {
    if !categories.iter().any(|allowed| allowed == category) {
        errors.push(format!("Category must be one of: {}", categories.join(", ")));
    }
}
