use serde::{Deserialize, Serialize};

/// Represents a product in the catalog.
///
/// Once stored, a product is only ever replaced wholesale by an update or
/// removed by a delete; callers always receive owned copies.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub stock: u32,
    pub category: Option<String>,
}

impl Product {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        price: f64,
        stock: u32,
        category: Option<&str>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            category: category.map(str::to_string),
        }
    }
}

/// Payload for adding a product.
///
/// `price` and `stock` may be missing so that the validator can report them;
/// `stock` is signed so that a negative count can be reported rather than
/// rejected at the type level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewProduct {
    pub name: String,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category: Option<String>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64, stock: i64, category: Option<&str>) -> Self {
        Self {
            name: name.into(),
            price: Some(price),
            stock: Some(stock),
            category: category.map(str::to_string),
        }
    }

    /// Build the stored record, or `None` if a required field is missing or
    /// out of range. Run the validator first to learn which.
    pub fn into_product(self, id: u64) -> Option<Product> {
        let price = self.price?;
        let stock = u32::try_from(self.stock?).ok()?;
        Some(Product {
            id,
            name: self.name,
            price,
            stock,
            category: self.category,
        })
    }
}

/// Payload for updating an existing product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
    pub category: Option<String>,
}

impl ProductPatch {
    pub fn price(price: f64) -> Self {
        Self { price: Some(price), ..Default::default() }
    }

    pub fn stock(stock: u32) -> Self {
        Self { stock: Some(stock), ..Default::default() }
    }
}

/// Aggregate figures over the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductStats {
    pub total_products: usize,
    pub total_value: f64,
    pub average_price: f64,
    pub out_of_stock: usize,
    pub categories: Vec<String>,
}

impl ProductStats {
    pub fn from_products(products: &[Product]) -> Self {
        if products.is_empty() {
            return Self::default();
        }

        let total_value = products.iter().map(|p| p.price * f64::from(p.stock)).sum();
        let average_price =
            products.iter().map(|p| p.price).sum::<f64>() / products.len() as f64;
        let out_of_stock = products.iter().filter(|p| p.stock == 0).count();

        let mut categories: Vec<String> = Vec::new();
        for category in products.iter().filter_map(|p| p.category.as_ref()) {
            if !categories.contains(category) {
                categories.push(category.clone());
            }
        }

        Self {
            total_products: products.len(),
            total_value,
            average_price,
            out_of_stock,
            categories,
        }
    }
}
