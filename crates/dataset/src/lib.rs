//! # Listing Dataset
//!
//! Produces the immutable table of simulated property listings that every
//! dashboard render pass reads from.
//!
//! - `DatasetGenerator`: draws a fixed number of listings from a seeded RNG.
//! - `Dataset`: the generated rows plus the distinct category values used as
//!   filter options.

pub mod error;
pub mod generator;

pub use error::DatasetError;
pub use generator::{Dataset, DatasetGenerator, LISTING_COUNT};
