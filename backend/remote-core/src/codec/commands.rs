//! Command vocabulary of the DAW control surface.

use const_format::concatcp;

pub const TRANSPORT: &str = "TRANSPORT";
pub const EXTSTATE: &str = "EXTSTATE";

pub const ACTION_PLAY: &str = "1007";
pub const ACTION_STOP: &str = "1016";
pub const ACTION_NEXT_TAB: &str = "40861";
pub const ACTION_PREVIOUS_TAB: &str = "40862";

/// Extended-state namespace owned by the setlist script running inside the DAW.
pub const SETLIST_NAMESPACE: &str = "ReaperSetlist";

pub const KEY_SCRIPT_ACTION_ID: &str = "ScriptActionId";
pub const KEY_TABS: &str = "tabs";
pub const KEY_ACTIVE_INDEX: &str = "activeIndex";
pub const KEY_OPERATION: &str = "Operation";

pub const OPERATION_GET_OPEN_TABS: &str = "getOpenTabs";

pub const GET_SCRIPT_ACTION_ID: &str =
    concatcp!("GET/", EXTSTATE, "/", SETLIST_NAMESPACE, "/", KEY_SCRIPT_ACTION_ID);
pub const GET_TABS: &str = concatcp!("GET/", EXTSTATE, "/", SETLIST_NAMESPACE, "/", KEY_TABS);
pub const GET_ACTIVE_INDEX: &str =
    concatcp!("GET/", EXTSTATE, "/", SETLIST_NAMESPACE, "/", KEY_ACTIVE_INDEX);
pub const SET_OPERATION_GET_OPEN_TABS: &str = concatcp!(
    "SET/",
    EXTSTATE,
    "/",
    SETLIST_NAMESPACE,
    "/",
    KEY_OPERATION,
    "/",
    OPERATION_GET_OPEN_TABS
);

/// `GET/EXTSTATE/<namespace>/<key>`
pub fn get_ext_state(namespace: &str, key: &str) -> String {
    format!("GET/{EXTSTATE}/{namespace}/{key}")
}

/// `SET/EXTSTATE/<namespace>/<key>/<value>`
pub fn set_ext_state(namespace: &str, key: &str, value: &str) -> String {
    format!("SET/{EXTSTATE}/{namespace}/{key}/{value}")
}
