//! Everything between a filled-in field and a [`SolveResult`].
//!
//! - [`request`]: tabs/modes, endpoint selection and the [`SolveRequest`] payloads
//! - [`response`]: result shapes and classification of a 2xx body
//! - [`client`]: the [`SolveTransport`] seam and its `reqwest` implementation
//! - [`dispatcher`]: background submission tagged with sequence numbers
//! - [`errors`]: transport-level [`SolveError`]

pub mod client;
pub mod dispatcher;
pub mod errors;
pub mod request;
pub mod response;

pub use client::{HttpTransport, SolveTransport};
pub use dispatcher::{Completion, Dispatcher, Ticket};
pub use errors::SolveError;
pub use request::{Endpoint, Quadrant, SolveRequest, Tab, TrigFunc, TrigMode};
pub use response::{SolveReply, SolveResult};
