//! Core types and reporting logic for the carbon emission ledger.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! storage backend is reached only through the [`store::EmissionStore`]
//! trait; everything else here is plain data in, data out.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod aggregate;
pub mod catalog;
pub mod category;
pub mod error;
pub mod factor;
pub mod query;
pub mod record;
pub mod report;
pub mod request;
pub mod store;

pub use error::{Classify, Error, ErrorClass, Result};
