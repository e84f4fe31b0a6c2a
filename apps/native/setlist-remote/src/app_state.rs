use models::{ReaperState, TabInfo, TransportState};
use remote_core::JobResult;

use log::info;

/// Latest known DAW state, as seen through finished jobs.
#[derive(Debug, Default)]
pub struct AppState {
    setlist: Option<ReaperState>,
    transport: TransportState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn setlist(&self) -> Option<&ReaperState> {
        self.setlist.as_ref()
    }

    pub fn transport(&self) -> &TransportState {
        &self.transport
    }

    pub fn active_song(&self) -> Option<&TabInfo> {
        self.setlist.as_ref().and_then(ReaperState::active_tab)
    }

    pub fn is_playing(&self) -> bool {
        self.transport.is_playing()
    }

    /// Take whatever state `result` carries. Failed results and unsuccessful
    /// payloads leave the previous state in place.
    pub fn apply(&mut self, result: &JobResult) {
        if !result.success {
            return;
        }

        if let Some(state) = result.reaper_state().filter(|s| s.success) {
            let previous = self.active_song().map(|tab| tab.name.clone());
            self.setlist = Some(state.clone());

            if let Some(tab) = self.active_song()
                && previous.as_deref() != Some(tab.name.as_str())
            {
                info!(
                    "Now on: {} ({}/{}, {:.0}s)",
                    tab.name,
                    tab.index + 1,
                    state.tabs.len(),
                    tab.length_seconds
                );
            }
        }

        if let Some(transport) = result.transport().filter(|t| t.success) {
            if transport.play_state != self.transport.play_state {
                info!("Transport: {}", transport.play_state);
            }
            self.transport = transport.clone();
        }
    }
}
