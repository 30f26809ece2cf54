//! Typed wire structs and an async client for the Terra LCD (Light Client
//! Daemon) REST API: transaction lookup, search, broadcast and fee
//! estimation.
//!
//! The LCD speaks the Cosmos SDK's legacy amino JSON, so this crate ships
//! hand-written serde types mirroring those wire shapes alongside an
//! ergonomic `reqwest`-based client.
//!
//! # Features
//!
//! - **`types` module** — Request/response types for the transaction
//!   endpoints. Available with no additional features.
//! - **`client` module** (enabled by default) — An async LCD client built
//!   on `reqwest`.
//!
//! # Quick start
//!
//! ```no_run
//! use terra_lcd_client::{LcdClient, TxSearchRequest};
//!
//! #[tokio::main]
//! async fn main() -> terra_lcd_client::client::Result<()> {
//!     let client = LcdClient::columbus();
//!     let page = client
//!         .txs(&TxSearchRequest::new().action("send").limit(10))
//!         .await?;
//!     println!("{} of {} matching txs", page.count, page.total_count);
//!     Ok(())
//! }
//! ```

pub mod coin;
pub mod query;
pub mod types;

pub use coin::{ParseCoinError, parse_dec_coins};
pub use query::TxSearchRequest;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "client")]
pub use client::LcdClient;

pub use types::*;
