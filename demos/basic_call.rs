//! Basic example demonstrating the core Dilovod API operations.
//!
//! This example shows how to:
//! - Create a client with an API key
//! - List objects with a query
//! - Fetch a single object by ID
//! - Create objects and sale orders
//!
//! Run with: `cargo run --example basic_call`

use dilovod::{Client, Error, ObjectsQuery};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("dilovod=debug,basic_call=info")
        .init();

    // Replace with a real API key generated in the Dilovod system.
    let client = Client::new("YOUR_API_KEY")?;

    println!("=== Listing goods ===");
    let goods = client
        .get_objects(
            ObjectsQuery::new("catalogs.goods")
                .fields(["name", "price"])
                .order_by("name ASC")
                .limit(10),
        )
        .await?;
    println!("Found {} goods", goods.len());
    if let Some(first) = goods.first() {
        println!("First good: {first}");
    }
    println!();

    println!("=== Fetching one object ===");
    let good = client.get_object("SOME_PRODUCT_ID").await?;
    println!("Object: {good}");
    println!();

    println!("=== Creating a partner ===");
    let result = client
        .save_object(&json!({
            "type": "catalogs.persons",
            "name": "New Client 007",
            "is_buyer": true,
        }))
        .await?;
    println!("Saved: {result}");
    if let Some(id) = result.get("id") {
        println!("New partner id: {id}");
    }
    println!();

    println!("=== Creating a sale order ===");
    let result = client
        .sale_order_create(&json!({
            "type": "documents.saleOrder",
            "person": "PARTNER_ID",
            "goods": [{"good": "GOOD_ID", "qty": 1}],
        }))
        .await?;
    println!("Order created: {result}");

    Ok(())
}
