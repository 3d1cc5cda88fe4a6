//! `add_info` response DTOs.
//!
//! Only the fields the alert listing reads are mapped, one item of
//! `infos.current` at a time. Everything is optional because the feed omits
//! keys rather than sending nulls, and sometimes sends nulls anyway.

use serde::Deserialize;

/// One alert publication.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertItem {
    /// Short heading shown to passengers.
    pub subtitle: Option<String>,

    pub properties: Option<AlertProperties>,

    /// Lines and stops the alert applies to.
    pub affected: Option<Affected>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertProperties {
    /// Plain text version of the alert, intended for text-to-speech.
    pub speech_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Affected {
    pub lines: Option<Vec<AffectedLine>>,
    pub stops: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AffectedLine {
    pub operator: Option<Operator>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Operator {
    pub name: Option<String>,
}

impl AffectedLine {
    /// Operator name, if the line names one.
    pub fn operator_name(&self) -> Option<&str> {
        self.operator.as_ref()?.name.as_deref()
    }
}
