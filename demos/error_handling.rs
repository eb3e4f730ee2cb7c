//! Example demonstrating error handling for Dilovod API calls.
//!
//! This example shows how to:
//! - Match on the different error classes
//! - Read remote error codes
//! - Inspect raw response bodies on failures
//! - Access the underlying cause of transport failures
//!
//! Run with: `cargo run --example error_handling`

use dilovod::{Client, Error, ObjectsQuery};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("dilovod=info")
        .init();

    let client = Client::new("YOUR_API_KEY")?;

    println!("=== Example 1: Matching on error classes ===");
    match client.get_object("NO_SUCH_ID").await {
        Ok(object) => println!("Success: {object}"),
        Err(Error::Api { message, code }) => {
            println!("API error!");
            println!("  Message: {message}");
            println!("  Code: {code:?}");
        }
        Err(Error::Transport {
            message, status, ..
        }) => {
            println!("Transport error!");
            println!("  Message: {message}");
            println!("  Status: {status:?}");
        }
        Err(e) => println!("Other error: {e}"),
    }
    println!();

    println!("=== Example 2: Inspecting failures without destructuring ===");
    match client.get_objects(ObjectsQuery::new("not.a.type")).await {
        Ok(objects) => println!("Unexpected success: {} objects", objects.len()),
        Err(e) => {
            println!("Error: {e}");
            if let Some(code) = e.api_error_code() {
                println!("  API error code: {code}");
            }
            if let Some(raw) = e.raw_response() {
                println!("  Raw response: {raw}");
            }
        }
    }
    println!();

    println!("=== Example 3: Connection failures keep their cause ===");
    let unreachable = Client::builder()
        .api_key("YOUR_API_KEY")
        .base_url("http://127.0.0.1:9")?
        .build()?;

    match unreachable.get_object("1").await {
        Ok(_) => println!("Unexpected success"),
        Err(Error::Transport {
            message, source, ..
        }) => {
            println!("Transport error: {message}");
            println!("  Is timeout: {}", source.is_timeout());
            println!("  Is connect error: {}", source.is_connect());
        }
        Err(e) => println!("Other error: {e}"),
    }

    Ok(())
}
