//! In-process fakes for the capability traits.

use crate::clock::Clock;
use crate::error::transport::TransportError;
use crate::network::{NetworkLink, WifiCredentials};
use crate::supervisor::BootstrapJobs;
use crate::transport::{HttpResponse, HttpTransport};

use common::{ErrorLocation, HttpStatusCode, RedactedSecret};

use std::panic::Location;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "http://192.168.1.100:8080/_";

type Reply = Box<dyn Fn(&str) -> Result<HttpResponse, TransportError> + Send>;

/// Answers every GET through a closure and records the requested URLs.
pub struct FakeTransport {
    reply: Reply,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeTransport {
    pub fn new<F>(reply: F) -> Self
    where
        F: Fn(&str) -> Result<HttpResponse, TransportError> + Send + 'static,
    {
        Self {
            reply: Box::new(reply),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always answer 200 with `body`.
    pub fn ok(body: &str) -> Self {
        let body = body.to_string();
        Self::new(move |_| Ok(response(200, &body)))
    }

    pub fn requests(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.requests)
    }
}

impl HttpTransport for FakeTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());
        (self.reply)(url)
    }
}

pub fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status: HttpStatusCode(status),
        body: body.to_string(),
    }
}

pub fn timeout_error() -> TransportError {
    TransportError::Timeout {
        message: "operation timed out".to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

pub struct FakeNetwork {
    pub connects: bool,
    pub ip: Option<String>,
}

impl FakeNetwork {
    pub fn up() -> Self {
        Self {
            connects: true,
            ip: Some("192.168.1.42".to_string()),
        }
    }

    pub fn down() -> Self {
        Self {
            connects: false,
            ip: None,
        }
    }
}

impl NetworkLink for FakeNetwork {
    fn connect(&self, _credentials: &WifiCredentials) -> bool {
        self.connects
    }

    fn is_connected(&self) -> bool {
        self.connects
    }

    fn local_ip(&self) -> Option<String> {
        self.ip.clone()
    }
}

pub fn credentials() -> WifiCredentials {
    WifiCredentials::new("StageNet", RedactedSecret::new("hunter22"))
}

#[derive(Default)]
pub struct FakeClock {
    now: AtomicU32,
}

impl FakeClock {
    pub fn at(now_ms: u32) -> Self {
        Self {
            now: AtomicU32::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: u32) {
        self.now.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u32 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Records supervisor submissions instead of queueing real jobs.
#[derive(Default)]
pub struct FakeBootstrap {
    pub next_id: u32,
    pub reject: bool,
    pub wifi_submissions: Vec<u32>,
    pub script_id_submissions: Vec<u32>,
    pub wifi_connected: bool,
    pub script_action_id: String,
}

impl FakeBootstrap {
    fn next(&mut self) -> u32 {
        if self.reject {
            return 0;
        }
        self.next_id += 1;
        self.next_id
    }
}

impl BootstrapJobs for FakeBootstrap {
    fn submit_connect_wifi(&mut self) -> u32 {
        let id = self.next();
        if id != 0 {
            self.wifi_submissions.push(id);
        }
        id
    }

    fn submit_get_script_action_id(&mut self) -> u32 {
        let id = self.next();
        if id != 0 {
            self.script_id_submissions.push(id);
        }
        id
    }

    fn set_wifi_connected(&mut self, connected: bool) {
        self.wifi_connected = connected;
    }

    fn set_script_action_id(&mut self, script_action_id: String) {
        self.script_action_id = script_action_id;
    }
}
