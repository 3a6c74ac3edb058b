//! Product-specific domain logic: the store entity, validation rules and errors.

pub mod entity;
pub mod error;
pub mod validation;

pub use error::*;
pub use validation::*;

use crate::actor_framework::ResourceActor;
use crate::app_system::CatalogConfig;
use crate::clients::ProductClient;
use crate::domain::Product;

/// Creates a new Product store actor and the client that fronts it.
pub fn new(config: &CatalogConfig) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(config.buffer_size, config.store_latency());
    let client = ProductClient::new(generic_client, config.categories.clone(), config.retry_policy());

    (actor, client)
}
