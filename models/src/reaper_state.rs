//! Setlist view of the DAW: open tabs plus the active one.

use crate::TabInfo;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReaperState {
    /// Tabs in the order the DAW returned them.
    pub tabs: Vec<TabInfo>,
    pub active_index: u32,
    /// Only true when `tabs` is non-empty and came from a well-formed reply.
    pub success: bool,
}

impl ReaperState {
    /// Assemble a state from a fully parsed reply, enforcing the success invariant.
    pub fn from_parsed(tabs: Vec<TabInfo>, active_index: u32) -> Self {
        let success = !tabs.is_empty();
        Self {
            tabs,
            active_index,
            success,
        }
    }

    /// The tab whose `index` matches `active_index`, if the DAW reported one.
    pub fn active_tab(&self) -> Option<&TabInfo> {
        self.tabs.iter().find(|tab| tab.index == self.active_index)
    }
}
