use crate::actor_framework::Entity;
use crate::domain::{Product, ProductPatch};

impl Entity for Product {
    type Id = u64;
    type Patch = ProductPatch;

    fn id(&self) -> &u64 {
        &self.id
    }

    /// Returns a new Product with the patch applied.
    ///
    /// # Fields Updated
    /// - `name`, `price`, `stock`, `category`: replaced when present in the patch
    ///
    /// The id is never part of a patch.
    fn merged(&self, patch: ProductPatch) -> Self {
        Self {
            id: self.id,
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            price: patch.price.unwrap_or(self.price),
            stock: patch.stock.unwrap_or(self.stock),
            category: patch.category.or_else(|| self.category.clone()),
        }
    }
}
