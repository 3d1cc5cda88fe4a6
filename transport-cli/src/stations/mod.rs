//! Station name suggestions.
//!
//! Station names come from a local JSON file loaded once at startup. They
//! only drive completion at the `trip` prompts; the API itself resolves
//! whatever text the user types.

mod error;
mod names;

pub use error::StationError;
pub use names::{DEFAULT_STATION_LIST, StationIndex};
