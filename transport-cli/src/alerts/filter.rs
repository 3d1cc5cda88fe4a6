//! Operator-based alert selection.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::api::ApiError;

use super::types::AlertItem;

/// Operators whose alerts are shown for `alert bus`.
const BUS_OPERATORS: &[&str] = &["Transit Systems NSW", "Busways R1"];

/// Operators whose alerts are shown for `alert train` (and bare `alert`).
const TRAIN_OPERATORS: &[&str] = &["Sydney Trains", "NSW TrainLink Train"];

/// Transport mode accepted by the alert listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Bus,
    Train,
}

impl TransportMode {
    /// Parse a mode argument. An empty argument means train.
    ///
    /// Returns `None` for modes without an operator allow-list.
    pub fn parse(arg: &str) -> Option<Self> {
        match arg {
            "bus" => Some(TransportMode::Bus),
            "train" | "" => Some(TransportMode::Train),
            _ => None,
        }
    }

    pub fn allowed_operators(self) -> &'static [&'static str] {
        match self {
            TransportMode::Bus => BUS_OPERATORS,
            TransportMode::Train => TRAIN_OPERATORS,
        }
    }

    fn allows(self, operator: &str) -> bool {
        self.allowed_operators().contains(&operator)
    }
}

/// An alert selected for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEntry {
    pub heading: Option<String>,
    pub speech_text: Option<String>,
    pub affected_lines: usize,
    pub affected_stops: usize,
    /// Operator of each affected line that names one, in feed order.
    pub operators: Vec<String>,
}

impl AlertEntry {
    fn from_item(item: &AlertItem) -> Self {
        let affected = item.affected.clone().unwrap_or_default();
        let lines = affected.lines.unwrap_or_default();

        Self {
            heading: item.subtitle.clone(),
            speech_text: item
                .properties
                .as_ref()
                .and_then(|p| p.speech_text.clone()),
            affected_lines: lines.len(),
            affected_stops: affected.stops.map_or(0, |s| s.len()),
            operators: lines
                .iter()
                .filter_map(|l| l.operator_name().map(str::to_string))
                .collect(),
        }
    }
}

/// Select the current alerts relevant to `mode` from an `add_info` payload.
///
/// An item is kept if any of its affected lines is run by an allowed
/// operator. Items are deduplicated by heading: once a heading has been
/// emitted, later items with the same heading are skipped even if their
/// content differs. Items without a heading share a single key. Items that
/// do not have the shape of an alert are skipped.
///
/// Unknown modes yield an empty list.
///
/// # Errors
///
/// [`ApiError::MissingField`] if `infos` is not an object or `infos.current`
/// is not an array.
pub fn filter_alerts(payload: &Value, mode: &str) -> Result<Vec<AlertEntry>, ApiError> {
    let infos = payload
        .get("infos")
        .filter(|infos| infos.is_object())
        .ok_or_else(|| ApiError::missing("infos"))?;
    let current: Vec<AlertItem> = infos
        .get("current")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::missing("infos.current"))?
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match AlertItem::deserialize(raw) {
            Ok(item) => Some(item),
            Err(e) => {
                debug!(index, error = %e, "skipping malformed alert");
                None
            }
        })
        .collect();

    let Some(mode) = TransportMode::parse(mode) else {
        debug!(mode, "no operator allow-list for mode");
        return Ok(Vec::new());
    };

    let mut seen: HashSet<Option<&str>> = HashSet::new();
    let mut entries = Vec::new();

    for item in &current {
        let heading = item.subtitle.as_deref();
        if seen.contains(&heading) {
            continue;
        }

        let matches = item
            .affected
            .as_ref()
            .and_then(|a| a.lines.as_ref())
            .is_some_and(|lines| {
                lines
                    .iter()
                    .filter_map(|l| l.operator_name())
                    .any(|op| mode.allows(op))
            });

        if matches {
            seen.insert(heading);
            entries.push(AlertEntry::from_item(item));
        }
    }

    debug!(total = current.len(), selected = entries.len(), ?mode, "filtered alerts");
    Ok(entries)
}
