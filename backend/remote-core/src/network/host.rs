use crate::error::network::NetworkError;
use crate::network::{NetworkLink, WifiCredentials};

use common::ErrorLocation;
use models::ReaperEndpoint;

use std::net::{IpAddr, TcpStream, ToSocketAddrs};
use std::panic::Location;
use std::sync::Mutex;
use std::thread::sleep;
use std::time::Duration;

use backoff::{ExponentialBackoff, backoff::Backoff};
use log::{debug, info, trace, warn};

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Desktop stand-in for the WiFi radio: "connect" probes the DAW endpoint over TCP.
pub struct HostNetwork {
    endpoint: ReaperEndpoint,
    connect_timeout: Duration,
    max_attempts: u32,
    local_ip: Mutex<Option<IpAddr>>,
}

impl HostNetwork {
    /// `connect_timeout` bounds the whole bring-up, across at most `max_attempts` probes.
    pub fn new(endpoint: ReaperEndpoint, connect_timeout: Duration, max_attempts: u32) -> Self {
        Self {
            endpoint,
            connect_timeout,
            max_attempts: max_attempts.max(1),
            local_ip: Mutex::new(None),
        }
    }

    #[track_caller]
    fn probe(&self) -> Result<IpAddr, NetworkError> {
        let authority = self.endpoint.authority();
        let addresses = authority
            .to_socket_addrs()
            .map_err(|e| NetworkError::Resolve {
                message: format!("{authority}: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let probe_timeout = PROBE_TIMEOUT.min(self.connect_timeout);
        let mut last_error = None;

        for address in addresses {
            trace!("Probing {address}");
            match TcpStream::connect_timeout(&address, probe_timeout) {
                Ok(stream) => return Ok(stream.local_addr()?.ip()),
                Err(e) => last_error = Some(e),
            }
        }

        Err(NetworkError::Unreachable {
            message: match last_error {
                Some(e) => format!("{authority}: {e}"),
                None => format!("{authority}: no addresses"),
            },
            location: ErrorLocation::from(Location::caller()),
        })
    }

    fn set_local_ip(&self, ip: Option<IpAddr>) {
        if let Ok(mut guard) = self.local_ip.lock() {
            *guard = ip;
        }
    }
}

impl NetworkLink for HostNetwork {
    fn connect(&self, credentials: &WifiCredentials) -> bool {
        debug!(
            "No radio on this host; treating '{}' as joined once {} answers",
            credentials.ssid,
            self.endpoint.authority()
        );

        let mut backoff = ExponentialBackoff {
            max_elapsed_time: Some(self.connect_timeout),
            ..Default::default()
        };

        for attempt in 1..=self.max_attempts {
            match self.probe() {
                Ok(ip) => {
                    info!("Reached {} from {ip}", self.endpoint.authority());
                    self.set_local_ip(Some(ip));
                    return true;
                }
                Err(e) => warn!("Probe {attempt}/{} failed: {e}", self.max_attempts),
            }

            if attempt == self.max_attempts {
                break;
            }

            match backoff.next_backoff() {
                Some(delay) => sleep(delay),
                None => {
                    debug!("Connect timeout of {:?} exhausted", self.connect_timeout);
                    break;
                }
            }
        }

        self.set_local_ip(None);
        false
    }

    fn is_connected(&self) -> bool {
        self.local_ip
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    fn local_ip(&self) -> Option<String> {
        self.local_ip
            .lock()
            .ok()
            .and_then(|guard| guard.map(|ip| ip.to_string()))
    }
}
