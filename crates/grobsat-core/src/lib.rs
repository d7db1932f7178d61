//! # grobsat-core
//!
//! Shared infrastructure for the grobsat saturation engine.
//!
//! This crate provides:
//! - Hash-consing tables with an optional size budget
//! - Justification DAGs with union ([`DepManager`])
//! - Cooperative cancellation ([`ResLimit`])
//! - A named statistics collector

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dependency;
pub mod intern;
pub mod limit;
pub mod statistics;

pub use dependency::{Dep, DepManager};
pub use intern::InternTable;
pub use limit::ResLimit;
pub use statistics::{StatValue, Statistics};
