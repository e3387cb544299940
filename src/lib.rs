//! # issuu-client - a typed client for the Issuu v2 REST API
//!
//! Every call is described by a [`Request`], sent through a shared pipeline and
//! returned as a [`Response`] envelope. The envelope carries the typed data
//! together with the status, pagination metadata, rate limit telemetry and a
//! normalized [`ApiError`] when something went wrong. Calls never return `Err`
//! for HTTP-level failures: check [`Response::is_success`] before using the data.
//!
//! ## Quick Start
//!
//! ```no_run
//! use issuu_client::{models::Draft, Client};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), issuu_client::Error> {
//!     let client = Client::builder()
//!         .token(std::env::var("ISSUU_TOKEN").unwrap_or_default())
//!         .timeout(Duration::from_secs(30))
//!         .build()?;
//!
//!     // List the second page of drafts, ten at a time
//!     let drafts = client.drafts().list(Some(2), Some(10)).await;
//!     if let Some(meta) = &drafts.meta {
//!         println!("page {} of {}", meta.page, meta.total_pages);
//!     }
//!     for document in drafts.data.unwrap_or_default() {
//!         println!("{document}");
//!     }
//!
//!     // Create a draft
//!     let created = client.drafts().create(&Draft::new().title("Catalogue")).await;
//!     match created.into_result() {
//!         Ok(document) => println!("created {:?}", document.map(|d| d.slug)),
//!         Err(error) => eprintln!("create failed: {error}"),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Uniform envelopes** - success, status, data, paging, rate limits and errors in one value
//! - **Pagination metadata** - page and page counts computed from list payloads
//! - **Normalized errors** - error bodies of any shape collapse into one [`ApiError`]
//! - **Multipart uploads** - files by path, stream or in-memory bytes
//! - **Diagnostics capture** - raw request and response bodies on demand
//! - **Cancellation** - race any call against a cancellation token, see [`with_cancellation`]
//!
//! ## Errors
//!
//! Transport failures, undecodable payloads and requests refused before
//! sending are reported with a status code of `0`:
//!
//! ```no_run
//! use issuu_client::Client;
//!
//! # async fn example(client: Client) {
//! let response = client.publications().get("my-publication").await;
//! if response.is_transport_failure() {
//!     let error = response.error.expect("failed envelopes carry an error");
//!     eprintln!("never reached the server: {error}");
//! } else if !response.is_success() {
//!     eprintln!("HTTP {}: {:?}", response.status_code(), response.error);
//! }
//! # }
//! ```

mod api;
mod cancel;
mod client;
pub mod error;
pub mod models;
pub mod pagination;
pub mod query;
pub mod rate_limit;
mod request;
mod response;
pub mod settings;
pub mod transform;

pub use api::{Drafts, Publications};
pub use cancel::{with_cancellation, Cancelled};
pub use client::{Client, ClientBuilder};
pub use error::{ApiError, Error, Result};
pub use pagination::Meta;
pub use rate_limit::RateLimit;
pub use request::{Request, Upload};
pub use response::Response;
pub use settings::Settings;
