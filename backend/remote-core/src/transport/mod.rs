//! Blocking HTTP GET capability used by the worker.

use crate::error::transport::TransportError;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;
use std::time::Duration;

use log::trace;
use reqwest::blocking::Client;
use url::Url;

/// Connect timeout for the DAW control surface.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Total request timeout. This also bounds how long shutdown can wait on an in-flight job.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: HttpStatusCode,
    pub body: String,
}

/// Performs a single blocking GET with its own connect and total timeouts.
///
/// Implementations return `Ok` for any response that arrived, whatever its
/// status. `Err` is reserved for requests that never produced a response.
pub trait HttpTransport: Send {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// GET `url` and return the body of a 2xx response.
#[track_caller]
pub fn fetch_text(http: &dyn HttpTransport, url: &str) -> Result<String, TransportError> {
    trace!("GET {url}");
    let response = http.get(url)?;

    if !response.status.is_success() {
        return Err(TransportError::Status {
            status: response.status,
            message: format!("GET {url}"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(response.body)
}

/// [`HttpTransport`] backed by a blocking reqwest client.
///
/// The blocking client must not be created or dropped inside an async runtime,
/// so it is built before the runtime starts and lives on the worker thread.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let url = Url::parse(url)?;
        let response = self.client.get(url).send()?;
        let status = HttpStatusCode(response.status().as_u16());
        let body = response.text()?;

        Ok(HttpResponse { status, body })
    }
}
