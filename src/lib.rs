//! A small Rust client for the Snake Query API.
//!
//! Snake Query answers natural-language questions about JSON data:
//! you send a query plus either inline data or a URL the service
//! should fetch, optionally with a JSON-Schema-like shape for the
//! answer, and get the result back in one request/response exchange.
//!
//! ## Quick start
//! - Configure authentication via the `SNAKE_QUERY_API_KEY`
//!   environment variable or a `.snakequeryrc` file (supported in the
//!   current directory and in your home directory; `SNAKE_QUERY_RC`
//!   points at an explicit path).
//! - Call [`Client::query`] with a query and a [`QueryOptions`]
//!   carrying exactly one of inline data or a fetch URL.
//!
//! ```no_run
//! use serde_json::json;
//! use snakequery::{Client, QueryOptions, SchemaBuilder};
//!
//! fn main() -> snakequery::Result<()> {
//!     let client = Client::from_env()?;
//!
//!     let schema = SchemaBuilder::create()
//!         .object()
//!         .add_string_property("name")
//!         .add_number_property("price")
//!         .required(["name", "price"])
//!         .build();
//!
//!     let result = client.query(
//!         "find the cheapest product",
//!         QueryOptions::with_data(json!([
//!             { "name": "pen", "price": 2 },
//!             { "name": "book", "price": 12 }
//!         ]))
//!         .response_schema(schema),
//!     )?;
//!
//!     println!("{}", result["response"]);
//!     Ok(())
//! }
//! ```
//!
//! Failures surface as [`Error`]: argument problems are rejected
//! before any network call, everything the server or transport
//! reports arrives as an [`ApiError`] carrying the status and the
//! response body where available.

#![forbid(unsafe_code)]

mod client;
mod config;
mod error;
mod schema;
mod util;

pub use client::{Client, QueryOptions};
pub use error::{ApiError, Error, Result};
pub use schema::SchemaBuilder;
