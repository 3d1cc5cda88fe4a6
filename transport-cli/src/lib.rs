//! Interactive client for the Transport for NSW trip planner API.
//!
//! Type a command, get a filtered view of what the API says about stops,
//! trips and service alerts. Every raw response is archived to disk.

pub mod alerts;
pub mod api;
pub mod config;
pub mod repl;
pub mod stations;
