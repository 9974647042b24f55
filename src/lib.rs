//! Async client for the order-management REST API: signed token handshakes, per-session token
//! caching, and one classified error channel for transport, HTTP, and JSON failures.
//!
//! The crate is split along the same seams as the remote protocol:
//!
//! - [`executor::RequestExecutor`] performs a single HTTP exchange rooted under the configured base
//!   URL and classifies the outcome.
//! - [`provider::TokenProvider`] signs the login payload, exchanges it for a bearer token, and
//!   caches that token per session identifier until it expires.
//! - [`client::OrderClient`] pairs both so business calls carry a fresh bearer token.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod executor;
pub mod obs;
pub mod provider;
pub mod transport;

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use http;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
