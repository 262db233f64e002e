//! # Contracts
//!
//! Shared data structures and traits for the report pipeline.
//! All business crates depend on this crate, reverse dependencies are prohibited.
//!
//! ## Money Model
//! - Sales and profit are fixed-point [`Amount`]s (ten-thousandths of a currency unit)
//! - All sums are exact `i64` additions, so grouped totals always add up to the scalar totals

mod aggregate;
mod amount;
mod blueprint;
mod error;
mod order;
mod selection;
mod sink;

pub use aggregate::*;
pub use amount::Amount;
pub use blueprint::*;
pub use error::*;
pub use order::*;
pub use selection::*;
pub use sink::*;
