//! Wire format of the DAW control surface.
//!
//! Everything here is pure: URLs are assembled from a base and one or more
//! commands, and reply bodies are split into lines and tab-separated tokens.
//!
//! # Batched replies
//!
//! A batch (`cmd;cmd;cmd`) answers with one line per command that *produces
//! output*. Action ids, `SET/...` and script invocations produce nothing, so
//! callers must know which positional line belongs to which query. The
//! positions used by the jobs are fixed in [`crate::jobs`].

pub mod commands;

use crate::error::protocol::ProtocolError;

use common::ErrorLocation;
use models::{PlayState, TabInfo, TransportState};

use std::panic::Location;

use log::{debug, warn};
use serde_json::Value;

const TRANSPORT_MIN_TOKENS: usize = 5;
const EXTSTATE_MIN_TOKENS: usize = 4;

/// `<base>/<command>`
pub fn build_url(base_url: &str, command: &str) -> String {
    format!("{base_url}/{command}")
}

/// `<base>/<c1>;<c2>;...`
///
/// An empty command list yields the bare base URL.
pub fn build_batch_url<S: AsRef<str>>(base_url: &str, commands: &[S]) -> String {
    if commands.is_empty() {
        return base_url.to_string();
    }

    let joined = commands
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(";");

    format!("{base_url}/{joined}")
}

/// Split a single-command reply into its tab-separated tokens.
///
/// A trailing line ending is stripped from each token and empty tokens are dropped.
pub fn parse_single(text: &str) -> Vec<String> {
    text.split('\t')
        .map(|token| {
            let token = token.strip_suffix('\n').unwrap_or(token);
            token.strip_suffix('\r').unwrap_or(token)
        })
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a batched reply into its non-empty lines.
pub fn parse_batch(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `TRANSPORT\t<state>\t<seconds>\t<repeat>\t<bars.beats>`.
#[track_caller]
pub fn try_parse_transport<S: AsRef<str>>(tokens: &[S]) -> Result<TransportState, ProtocolError> {
    if tokens.len() < TRANSPORT_MIN_TOKENS {
        return Err(ProtocolError::Shape {
            message: format!(
                "TRANSPORT reply needs {TRANSPORT_MIN_TOKENS} tokens, got {}",
                tokens.len()
            ),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    if tokens[0].as_ref() != commands::TRANSPORT {
        return Err(ProtocolError::Shape {
            message: format!("Expected TRANSPORT reply, got '{}'", tokens[0].as_ref()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let code: i32 = tokens[1]
        .as_ref()
        .trim()
        .parse()
        .map_err(|e| ProtocolError::Value {
            message: format!("Invalid play state '{}': {e}", tokens[1].as_ref()),
            location: ErrorLocation::from(Location::caller()),
        })?;
    let play_state = PlayState::try_from(code)?;

    let position_seconds: f64 =
        tokens[2]
            .as_ref()
            .trim()
            .parse()
            .map_err(|e| ProtocolError::Value {
                message: format!("Invalid position '{}': {e}", tokens[2].as_ref()),
                location: ErrorLocation::from(Location::caller()),
            })?;

    if !position_seconds.is_finite() || position_seconds < 0.0 {
        return Err(ProtocolError::Value {
            message: format!("Position must be a non-negative number, got '{}'", tokens[2].as_ref()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(TransportState {
        play_state,
        position_seconds,
        repeat_enabled: tokens[3].as_ref() == "1",
        position_bars_beats: tokens[4].as_ref().to_string(),
        success: true,
    })
}

/// Lenient form of [`try_parse_transport`]: any failure yields the default
/// (unsuccessful) state with no partial fields.
pub fn parse_transport<S: AsRef<str>>(tokens: &[S]) -> TransportState {
    try_parse_transport(tokens).unwrap_or_else(|e| {
        debug!("Discarding transport reply: {e}");
        TransportState::default()
    })
}

/// Parse the JSON tab array stored under the `tabs` key.
///
/// Entries missing `length`, `name` or `index` (or carrying the wrong JSON
/// type) are skipped, as are entries with a negative or non-finite length. Only a document that is not a JSON array is an error.
#[track_caller]
pub fn try_parse_tabs_json(json: &str) -> Result<Vec<TabInfo>, ProtocolError> {
    let document: Value = serde_json::from_str(json)?;

    let Value::Array(entries) = document else {
        return Err(ProtocolError::Json {
            message: String::from("Tab data is not a JSON array"),
            location: ErrorLocation::from(Location::caller()),
        });
    };

    let tabs: Vec<TabInfo> = entries.iter().filter_map(tab_from_value).collect();

    if tabs.len() != entries.len() {
        warn!(
            "Skipped {} tab entries with missing or invalid fields",
            entries.len() - tabs.len()
        );
    }

    debug!("Parsed {} tabs from JSON", tabs.len());
    Ok(tabs)
}

/// Lenient form of [`try_parse_tabs_json`]: malformed JSON yields an empty list.
pub fn parse_tabs_json(json: &str) -> Vec<TabInfo> {
    try_parse_tabs_json(json).unwrap_or_else(|e| {
        warn!("Failed to parse tab data: {e}");
        Vec::new()
    })
}

fn tab_from_value(value: &Value) -> Option<TabInfo> {
    let length = value
        .get("length")?
        .as_f64()
        .filter(|length| length.is_finite() && *length >= 0.0)?;
    let name = value.get("name")?.as_str()?;
    let index = value.get("index")?.as_u64()?;
    let index = u32::try_from(index).ok()?;

    Some(TabInfo::from_file_name(length as f32, name, index))
}

/// Extract the value of an `EXTSTATE\t<namespace>\t<key>\t<value>` reply.
///
/// Returns `None` when the tokens do not answer exactly `namespace/key`.
pub fn parse_ext_state<S: AsRef<str>>(tokens: &[S], namespace: &str, key: &str) -> Option<String> {
    if tokens.len() < EXTSTATE_MIN_TOKENS {
        return None;
    }

    let matches = tokens[0].as_ref() == commands::EXTSTATE
        && tokens[1].as_ref() == namespace
        && tokens[2].as_ref() == key;

    matches.then(|| tokens[3].as_ref().to_string())
}
