//! Transport (play/stop/record) state as reported by the `TRANSPORT` command.

use crate::error::model_error::ModelError;

use common::ErrorLocation;

use std::fmt;
use std::panic::Location;

use serde::{Deserialize, Serialize};

/// Play state codes the DAW reports in the second `TRANSPORT` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayState {
    #[default]
    Stopped,
    Playing,
    Paused,
    Recording,
    RecordPaused,
}

impl PlayState {
    /// Wire code of this state.
    pub fn code(self) -> i32 {
        match self {
            PlayState::Stopped => 0,
            PlayState::Playing => 1,
            PlayState::Paused => 2,
            PlayState::Recording => 5,
            PlayState::RecordPaused => 6,
        }
    }

    /// True while the playhead is moving (playing or recording).
    pub fn is_rolling(self) -> bool {
        matches!(self, PlayState::Playing | PlayState::Recording)
    }
}

impl TryFrom<i32> for PlayState {
    type Error = ModelError;

    #[track_caller]
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PlayState::Stopped),
            1 => Ok(PlayState::Playing),
            2 => Ok(PlayState::Paused),
            5 => Ok(PlayState::Recording),
            6 => Ok(PlayState::RecordPaused),
            other => Err(ModelError::UnknownPlayState {
                value: other,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl fmt::Display for PlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayState::Stopped => "stopped",
            PlayState::Playing => "playing",
            PlayState::Paused => "paused",
            PlayState::Recording => "recording",
            PlayState::RecordPaused => "record paused",
        };
        f.write_str(label)
    }
}

/// Parsed `TRANSPORT` reply.
///
/// `success` is false for the default value and for any reply that failed to
/// parse; in that case every other field is at its default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransportState {
    pub play_state: PlayState,
    pub position_seconds: f64,
    pub repeat_enabled: bool,
    pub position_bars_beats: String,
    pub success: bool,
}

impl TransportState {
    pub fn is_playing(&self) -> bool {
        self.success && self.play_state == PlayState::Playing
    }
}
