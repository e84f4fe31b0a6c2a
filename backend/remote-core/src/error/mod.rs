pub mod channel;
pub mod config;
pub mod manager;
pub mod network;
pub mod protocol;
pub mod transport;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Transport(#[from] transport::TransportError),

    #[error(transparent)]
    Protocol(#[from] protocol::ProtocolError),

    #[error(transparent)]
    Channel(#[from] channel::ChannelError),

    #[error(transparent)]
    Manager(#[from] manager::ManagerError),

    #[error(transparent)]
    Network(#[from] network::NetworkError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
