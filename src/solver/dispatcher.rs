//! Background submission of solve requests.
//!
//! Every [`Ticket`] runs on its own short-lived thread; completions come back
//! over a channel that the UI loop drains between frames. The dispatcher does
//! not decide which completion is current: it reports every one with the
//! sequence number it was issued under and the session discards stale ones.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use super::client::SolveTransport;
use super::errors::SolveError;
use super::request::SolveRequest;
use super::response::SolveReply;

/// A request tagged with the sequence number it was issued under
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub sequence: u64,
    pub request: SolveRequest,
}

/// The reply to a [`Ticket`]
#[derive(Debug)]
pub struct Completion {
    pub sequence: u64,
    pub reply: Result<SolveReply, SolveError>,
}

pub struct Dispatcher {
    transport: Arc<dyn SolveTransport>,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn SolveTransport>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Dispatcher {
            transport,
            sender,
            receiver,
        }
    }

    /// Start the request in the background
    pub fn submit(&self, ticket: Ticket) {
        let transport = Arc::clone(&self.transport);
        let sender = self.sender.clone();
        let sequence = ticket.sequence;
        debug!(sequence, endpoint = ?ticket.request.endpoint(), "submitting");

        let spawned = thread::Builder::new()
            .name(format!("solve-{}", sequence))
            .spawn(move || {
                let reply = transport.post(&ticket.request);
                if sender.send(Completion { sequence, reply }).is_err() {
                    debug!(sequence, "completion dropped, dispatcher is gone");
                }
            });

        if let Err(e) = spawned {
            warn!(sequence, error = %e, "could not spawn solve thread");
            let failed = Completion {
                sequence,
                reply: Err(SolveError::Network(e.to_string())),
            };
            // The receiver lives in `self`, so this send cannot fail
            let _ = self.sender.send(failed);
        }
    }

    /// Next finished completion, if any, without blocking
    pub fn try_next(&self) -> Option<Completion> {
        self.receiver.try_recv().ok()
    }

    /// Block up to `timeout` for the next completion
    pub fn wait(&self, timeout: Duration) -> Option<Completion> {
        match self.receiver.recv_timeout(timeout) {
            Ok(completion) => Some(completion),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
