use models::{PlayState, ReaperState, TabInfo, TransportState};
use remote_core::{JobKind, JobOutput, JobResult};

pub fn result(id: u32, success: bool, output: JobOutput) -> JobResult {
    JobResult {
        id,
        kind: output.kind(),
        success,
        submitted_at_ms: 0,
        timestamp_ms: 0,
        output,
    }
}

pub fn failed(id: u32, kind: JobKind) -> JobResult {
    result(id, false, JobOutput::empty(kind))
}

pub fn setlist(active_index: u32) -> ReaperState {
    ReaperState::from_parsed(
        vec![
            TabInfo::from_file_name(200.0, "Opener.rpp", 0),
            TabInfo::from_file_name(180.0, "Ballad.rpp", 1),
            TabInfo::from_file_name(240.0, "Closer.rpp", 2),
        ],
        active_index,
    )
}

pub fn transport(play_state: PlayState) -> TransportState {
    TransportState {
        play_state,
        position_seconds: 3.5,
        repeat_enabled: false,
        position_bars_beats: "2.1.00".to_string(),
        success: true,
    }
}

pub fn status(id: u32, active_index: u32, play_state: PlayState) -> JobResult {
    result(
        id,
        true,
        JobOutput::GetStatus {
            reaper_state: setlist(active_index),
            transport: transport(play_state),
        },
    )
}
