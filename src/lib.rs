//! # Dilovod - a client for the Dilovod business-management API
//!
//! This crate is a thin, typed client for the Dilovod API, built on top of
//! `reqwest`. It authenticates with an API key, wraps each operation in the
//! API's `{action, params, key}` envelope, and maps responses and errors
//! into a single result type.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dilovod::{Client, ObjectsQuery};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dilovod::Error> {
//!     let client = Client::new("YOUR_API_KEY")?;
//!
//!     // List goods, projected to two fields and sorted by name.
//!     let goods = client
//!         .get_objects(
//!             ObjectsQuery::new("catalogs.goods")
//!                 .fields(["name", "price"])
//!                 .order_by("name ASC")
//!                 .limit(10),
//!         )
//!         .await?;
//!     println!("Found {} goods", goods.len());
//!
//!     // Fetch a single object by its identifier.
//!     let good = client.get_object("1100100000001").await?;
//!     println!("First good: {good}");
//!
//!     // Create a partner.
//!     let result = client
//!         .save_object(&json!({
//!             "type": "catalogs.persons",
//!             "name": "New Client",
//!             "is_buyer": true,
//!         }))
//!         .await?;
//!     println!("Created partner: {result}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **One round trip per call** - Every operation is a single stateless
//!   request/response exchange; no retries, no caching, no shared mutable
//!   state between calls
//! - **Opaque payloads** - Objects are handed through as `serde_json::Value`
//!   exactly as the remote returns them, with no client-side schema
//!   validation
//! - **Minimal envelopes** - Query criteria left at their defaults are
//!   stripped before transmission, so requests carry only what the caller
//!   actually set
//! - **Classified errors** - Transport failures, malformed responses,
//!   server-reported errors, and missing results each surface as their own
//!   [`Error`] variant, with raw response bodies preserved for debugging
//! - **Automatic logging** - Structured logging with `tracing` at the
//!   request choke point
//!
//! ## Error Handling
//!
//! Every failure propagates to the caller as a [`Error`]; a call either
//! fully succeeds or fully fails:
//!
//! ```no_run
//! use dilovod::{Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::new("YOUR_API_KEY")?;
//! match client.get_object("1100100000001").await {
//!     Ok(object) => println!("Success: {object}"),
//!     Err(Error::Api { message, code }) => {
//!         eprintln!("API error: {message}");
//!         if let Some(code) = code {
//!             eprintln!("  Code: {code}");
//!         }
//!     }
//!     Err(Error::Decode { reason, raw_response }) => {
//!         eprintln!("Malformed response: {reason}");
//!         eprintln!("  Raw body: {raw_response}");
//!     }
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod envelope;
mod error;

pub use client::{Client, ClientBuilder};
pub use envelope::ObjectsQuery;
pub use error::{Error, Result};
