//! # Ingestion
//!
//! Order data ingestion module.
//!
//! Responsibilities:
//! - Decode the CSV source with its declared text encoding
//! - Map configured headers to typed `RawOrder` rows
//! - Parse order dates and derive year / month (`OrderRecord`)
//!
//! ## Usage Example
//!
//! ```ignore
//! use contracts::SourceConfig;
//! use ingestion::OrderLoader;
//!
//! let mut source = SourceConfig::new("Sample - Superstore.csv");
//! source.encoding = "latin1".to_string();
//!
//! let records = OrderLoader::new(source)?.load()?;
//! ```

mod derive;
mod encoding;
mod error;
mod loader;

// Re-exports
pub use contracts::{OrderRecord, RawOrder};
pub use derive::{derive_calendar, DateParser};
pub use encoding::{decode_source, resolve_encoding};
pub use error::{IngestionError, Result};
pub use loader::{parse_orders, OrderLoader};
