//! Typed clients that front the store actors.

mod product_client;

pub use product_client::ProductClient;
