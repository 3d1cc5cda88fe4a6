//! Command handlers.
//!
//! Each handler builds its query, runs it through the [`TransportClient`]
//! and writes a plain-text rendering of the result. Handlers return errors
//! for the REPL loop to report; none of them end the session.

use std::io::Write;

use chrono::{Local, NaiveDateTime};
use serde_json::Value;
use tracing::info;

use crate::alerts::filter_alerts;
use crate::api::{ApiError, QueryParams, TransportClient};

use super::command::{COMMANDS, Command};
use super::error::CommandError;
use super::input::{Completion, LineSource};

/// Station queried by `stopfinder`.
const DEMO_STOP: &str = "Circular Quay";

/// Whether the REPL should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Routes parsed commands to their handlers.
pub struct Dispatcher {
    client: TransportClient,
    clock: fn() -> NaiveDateTime,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Parameters every trip planner request carries.
fn base_params() -> QueryParams {
    QueryParams::new()
        .with("outputFormat", "rapidJSON")
        .with("coordOutputFormat", "EPSG:4326")
}

impl Dispatcher {
    pub fn new(client: TransportClient) -> Self {
        Self {
            client,
            clock: local_now,
        }
    }

    /// Replace the wall clock used for date and time parameters.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Run one command to completion.
    pub async fn dispatch<I, W>(
        &self,
        command: &Command,
        input: &mut I,
        out: &mut W,
    ) -> Result<Flow, CommandError>
    where
        I: LineSource,
        W: Write,
    {
        info!(command = command.name(), "running command");

        match command {
            Command::StopFinder => self.stop_finder(out).await?,
            Command::Alert(mode) => self.alert(mode, out).await?,
            Command::Trip => self.trip(input, out).await?,
            Command::Test => writeln!(out, "Hello, World!")?,
            Command::Help => help(out)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Fixed stop lookup; prints the raw payload.
    async fn stop_finder<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
        let params = base_params()
            .with("type_sf", "any")
            .with("name_sf", DEMO_STOP)
            .with("anyMaxSizeHitList", 10_i64);

        let (payload, _outcome) = self.client.execute("stop_finder", &params).await?;
        writeln!(out, "{payload:#}")?;
        Ok(())
    }

    /// Current alerts for a transport mode, deduplicated by heading.
    async fn alert<W: Write>(&self, mode: &str, out: &mut W) -> Result<(), CommandError> {
        let today = (self.clock)().format("%d-%m-%Y").to_string();
        let params = base_params()
            .with("filterDateValid", today)
            .with("filterPublicationStatus", "current");

        let (payload, _outcome) = self.client.execute("add_info", &params).await?;
        let entries = filter_alerts(&payload, mode)?;

        if entries.is_empty() {
            writeln!(out, "No current alerts.")?;
        }

        for entry in entries {
            // headerless alerts still get a visible first line
            writeln!(out, "{}", entry.heading.as_deref().unwrap_or("(no heading)"))?;
            writeln!(out, "{}", entry.speech_text.as_deref().unwrap_or_default())?;
            writeln!(out, "Affected Lines: {}", entry.affected_lines)?;
            writeln!(out, "Affected Stops: {}", entry.affected_stops)?;
            writeln!(out)?;
        }

        Ok(())
    }

    /// Prompt for two stations and count journeys departing now.
    async fn trip<I, W>(&self, input: &mut I, out: &mut W) -> Result<(), CommandError>
    where
        I: LineSource,
        W: Write,
    {
        let origin = prompt_station(input, "Enter origin: ")?;
        let destination = prompt_station(input, "Enter destination: ")?;

        let now = (self.clock)();
        let params = base_params()
            .with("depArrMacro", "dep")
            .with("itdDate", now.format("%Y%m%d").to_string())
            .with("itdTime", now.format("%H%M").to_string())
            .with("type_origin", "stop")
            .with("name_origin", origin.as_str())
            .with("type_destination", "stop")
            .with("name_destination", destination.as_str())
            .with("TfNSWTR", true);

        let (payload, _outcome) = self.client.execute("trip", &params).await?;

        writeln!(out, "{origin} => {destination}")?;
        let journeys = payload
            .get("journeys")
            .and_then(Value::as_array)
            .ok_or_else(|| ApiError::MissingField("journeys".to_string()))?;
        writeln!(out, "{} journey option(s)", journeys.len())?;

        Ok(())
    }
}

fn prompt_station<I: LineSource>(input: &mut I, prompt: &str) -> Result<String, CommandError> {
    input
        .read_line(prompt, Completion::Stations)?
        .map(|line| line.trim().to_string())
        .ok_or(CommandError::Cancelled("trip"))
}

fn help<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Available commands:")?;
    for (name, description) in COMMANDS {
        writeln!(out, "  {name:<12}{description}")?;
    }
    Ok(())
}
