//! Bounded worker groups and slice partitioning.
//!
//! [`RunGroup`] fans items out to a fixed number of tokio workers and stops
//! at the first handler error. [`chunk`] and [`partition`] split slices into
//! work units for it.

mod error;
mod group;
mod partition;

pub use error::{Error, Result};
pub use group::{GroupConfig, RunGroup};
pub use partition::{chunk, partition};
