//! Positional decoding of the setlist batch reply.
//!
//! ChangeTab and GetStatus send
//! `[<tab action>,] SET operation, <script id>, GET tabs, GET activeIndex, TRANSPORT`.
//! Only the last three emit output, so the reply lines are fixed as below. If
//! another output-producing command is ever added to the batch these indices
//! shift and parsing fails rather than guessing.

use crate::codec::{self, commands};
use crate::error::protocol::ProtocolError;

use common::ErrorLocation;
use models::{ReaperState, TransportState};

use std::panic::Location;

pub const TABS_LINE: usize = 0;
pub const ACTIVE_INDEX_LINE: usize = 1;
pub const TRANSPORT_LINE: usize = 2;
pub const MIN_LINES: usize = 3;

/// Batch a setlist query, optionally preceded by a tab-change action.
pub fn batch_commands(tab_action: Option<&str>, script_action_id: &str) -> Vec<String> {
    tab_action
        .into_iter()
        .chain([
            commands::SET_OPERATION_GET_OPEN_TABS,
            script_action_id,
            commands::GET_TABS,
            commands::GET_ACTIVE_INDEX,
            commands::TRANSPORT,
        ])
        .map(str::to_string)
        .collect()
}

#[track_caller]
pub fn parse_reply(body: &str) -> Result<(ReaperState, TransportState), ProtocolError> {
    let lines = codec::parse_batch(body);
    if lines.len() < MIN_LINES {
        return Err(ProtocolError::Shape {
            message: format!(
                "Setlist reply needs {MIN_LINES} lines, got {}",
                lines.len()
            ),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let tabs_json = ext_state_value(&lines[TABS_LINE], commands::KEY_TABS)?;
    let tabs = codec::try_parse_tabs_json(&tabs_json)?;

    let active_index = ext_state_value(&lines[ACTIVE_INDEX_LINE], commands::KEY_ACTIVE_INDEX)?;
    let active_index: u32 = active_index
        .trim()
        .parse()
        .map_err(|e| ProtocolError::Value {
            message: format!("Invalid active index '{active_index}': {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let transport = codec::try_parse_transport(&codec::parse_single(&lines[TRANSPORT_LINE]))?;

    Ok((ReaperState::from_parsed(tabs, active_index), transport))
}

#[track_caller]
fn ext_state_value(line: &str, key: &str) -> Result<String, ProtocolError> {
    let tokens = codec::parse_single(line);
    codec::parse_ext_state(&tokens, commands::SETLIST_NAMESPACE, key).ok_or_else(|| {
        ProtocolError::Shape {
            message: format!("Expected EXTSTATE {}/{key}, got '{line}'", commands::SETLIST_NAMESPACE),
            location: ErrorLocation::from(Location::caller()),
        }
    })
}
