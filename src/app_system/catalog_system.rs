use tracing::{error, info, instrument};

use super::CatalogConfig;
use crate::clients::ProductClient;
use crate::product_actor;

/// The main application system that owns the product store actor.
///
/// Responsible for starting the store, handing out its client, and shutting it down.
pub struct CatalogSystem {
    pub product_client: ProductClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CatalogSystem {
    /// Create and start the store actor described by `config`.
    #[instrument(name = "catalog_system", skip(config))]
    pub fn new(config: &CatalogConfig) -> Self {
        info!(
            latency_ms = config.store_latency_ms,
            retry_attempts = config.retry_attempts,
            "Starting catalog system"
        );

        let (product_actor, product_client) = product_actor::new(config);
        let handles = vec![tokio::spawn(product_actor.run())];

        info!("Catalog system started successfully");
        Self { product_client, handles }
    }

    /// Stop the store actor and wait for it to finish.
    ///
    /// Clones of the product client stop working once this returns.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down catalog system");

        if let Err(e) = self.product_client.shutdown().await {
            error!(error = %e, "Store already stopped");
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Catalog system shutdown complete");
        Ok(())
    }
}
