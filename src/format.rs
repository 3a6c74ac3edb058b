//! Display helpers for the demo output. The catalog itself only deals in raw values.

use crate::domain::Product;

pub fn format_price(price: f64) -> String {
    format!("₹{:.2}", price)
}

pub fn format_stock(quantity: u32) -> String {
    match quantity {
        0 => "Out of Stock".to_string(),
        1..=9 => format!("Low Stock ({} left)", quantity),
        _ => format!("In Stock ({} available)", quantity),
    }
}

/// One-line summary, e.g. `[1] Mouse | ₹599.99 | In Stock (25 available) | Electronics`.
pub fn format_product(product: &Product) -> String {
    format!(
        "[{}] {} | {} | {} | {}",
        product.id,
        product.name,
        format_price(product.price),
        format_stock(product.stock),
        product.category.as_deref().unwrap_or("Uncategorized"),
    )
}
