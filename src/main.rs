use product_catalog::app_system::{setup_tracing, CatalogConfig, CatalogSystem};
use product_catalog::clients::ProductClient;
use product_catalog::domain::{NewProduct, Product, ProductPatch};
use product_catalog::format::{format_price, format_product};
use product_catalog::product_actor::ProductError;
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = CatalogConfig::from_env().map_err(|e| e.to_string())?;
    info!(categories = %config.categories.join(", "), "Starting product catalog");

    let system = CatalogSystem::new(&config);

    let span = tracing::info_span!("catalog_demo");
    let result = run_demo(&system.product_client).instrument(span).await;

    if let Err(e) = result {
        error!(error = %e, "Error caught");
    }

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

async fn run_demo(client: &ProductClient) -> Result<(), ProductError> {
    info!("Adding products");
    let seed = [
        NewProduct::new("Wireless Mouse", 599.99, 25, Some("Electronics")),
        NewProduct::new("JavaScript Book", 449.0, 50, Some("Books")),
        NewProduct::new("Running Shoes", 2999.5, 0, Some("Sports")),
        NewProduct::new("Cotton T-Shirt", 799.0, 8, Some("Clothing")),
    ];
    for product in seed {
        client.add_product_with_retry(product).await?;
    }

    info!("All products");
    log_products(&client.get_all_products().await?);

    info!(id = 1, "Updating product");
    let patch = ProductPatch {
        price: Some(499.99),
        stock: Some(30),
        ..Default::default()
    };
    let updated = client.update_product(1, patch).await?;
    log_products(std::slice::from_ref(&updated));

    info!(query = "book", "Searching products");
    log_products(&client.search_products("book").await?);

    let stats = client.get_statistics().await?;
    info!(
        total_products = stats.total_products,
        total_value = %format_price(stats.total_value),
        average_price = %format_price(stats.average_price),
        out_of_stock = stats.out_of_stock,
        categories = %stats.categories.join(", "),
        "Statistics"
    );
    match serde_json::to_string(&stats) {
        Ok(json) => info!(stats = %json, "Statistics as JSON"),
        Err(e) => warn!(error = %e, "Could not serialize statistics"),
    }

    let deleted = client.delete_product(3).await?;
    info!(name = %deleted.name, "Deleted product");

    info!("Remaining products");
    log_products(&client.get_all_products().await?);

    info!("Trying to add invalid product");
    client
        .add_product(NewProduct::new("", -10.0, 5, Some("InvalidCategory")))
        .await?;

    Ok(())
}

fn log_products(products: &[Product]) {
    for product in products {
        info!("  {}", format_product(product));
    }
}
