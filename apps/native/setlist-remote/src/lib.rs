// Library exports for testing
// The binary (main.rs) imports these as well

pub mod app_state;
pub mod error;
pub mod logger;
pub mod poller;
pub mod session;

#[cfg(test)]
mod tests;
