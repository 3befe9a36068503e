//! # Parsett CLI
//!
//! Thin command adapters around a [`parsett_core::TitleParser`]: one parses
//! a single release title, the other a batch, and both print JSON.
pub mod adapter;
pub mod args;
pub mod error;
pub mod logging;
pub mod lossy;
pub mod output;

pub use adapter::{
    BatchItem, ErrorEnvelope, Status, index_by_title, parse_batch, run_batch, run_single,
};
pub use args::{BatchArgs, SingleArgs};
pub use error::CliError;
