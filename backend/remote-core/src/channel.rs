//! Bounded one-directional queue shared by the interactive side and the worker.

use crate::error::channel::ChannelError;

use common::ErrorLocation;

use std::panic::Location;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, SendTimeoutError, Sender, TrySendError, bounded};

/// Cloning yields another handle to the same queue.
#[derive(Debug)]
pub struct Channel<T> {
    sender: Sender<T>,
    receiver: Receiver<T>,
    capacity: usize,
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
            capacity: self.capacity,
        }
    }
}

impl<T> Channel<T> {
    /// A zero capacity is raised to one; a rendezvous queue would make every submit fail.
    pub fn bounded(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Enqueue without blocking. The item is dropped if the queue is full.
    #[track_caller]
    pub fn submit(&self, item: T) -> Result<(), ChannelError> {
        self.sender.try_send(item).map_err(|e| match e {
            TrySendError::Full(_) => ChannelError::Full {
                capacity: self.capacity,
                location: ErrorLocation::from(Location::caller()),
            },
            TrySendError::Disconnected(_) => ChannelError::Disconnected {
                message: String::from("receiver dropped"),
                location: ErrorLocation::from(Location::caller()),
            },
        })
    }

    /// Enqueue, waiting up to `timeout` for space. On timeout the item is handed back.
    pub fn submit_timeout(&self, item: T, timeout: Duration) -> Result<(), T> {
        self.sender
            .send_timeout(item, timeout)
            .map_err(|e| match e {
                SendTimeoutError::Timeout(item) | SendTimeoutError::Disconnected(item) => item,
            })
    }

    /// Drain everything currently queued without blocking.
    pub fn try_receive_all(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }

    /// Wait up to `timeout` for one item.
    pub fn receive_timeout(&self, timeout: Duration) -> Option<T> {
        match self.receiver.recv_timeout(timeout) {
            Ok(item) => Some(item),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
