//! Network bring-up capability.
//!
//! On the handheld this is the WiFi radio. On a desktop host there is no radio
//! to drive, so [`HostNetwork`] treats "connected" as "the DAW endpoint accepts
//! TCP connections".

pub mod host;

pub use host::HostNetwork;

use common::RedactedSecret;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiCredentials {
    pub ssid: String,
    pub password: RedactedSecret,
}

impl WifiCredentials {
    pub fn new(ssid: impl Into<String>, password: RedactedSecret) -> Self {
        Self {
            ssid: ssid.into(),
            password,
        }
    }
}

pub trait NetworkLink: Send {
    /// Block until connected or the link gives up.
    fn connect(&self, credentials: &WifiCredentials) -> bool;

    fn is_connected(&self) -> bool;

    /// Local address of the link, when connected.
    fn local_ip(&self) -> Option<String>;
}
