//! Service alert selection.
//!
//! The `add_info` endpoint returns every current alert across the network.
//! This module narrows the feed to the operators relevant to one transport
//! mode and collapses alerts that share a heading.

mod filter;
mod types;

pub use filter::{AlertEntry, TransportMode, filter_alerts};
