//! Core history types and contracts.
//!
//! This module contains the pure building blocks shared by every layer:
//! - Snapshots and immutable `past`/`present`/`future` histories
//! - The `Reducer` transition contract
//! - Amendment directives carried by actions
//! - Merge functions and history filters
//!
//! Nothing in this module performs I/O or keeps hidden state.

mod directive;
mod filter;
mod history;
mod merge;
mod reducer;

pub use directive::{Directed, Directive};
pub use filter::HistoryFilter;
pub use history::{History, Snapshot};
pub use merge::Merge;
pub use reducer::Reducer;
