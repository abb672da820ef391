//! Core of `ocpatch`: apply a single JSON patch operation to an OpenShift API
//! object and classify what happened.
//!
//! The HTTP layer is abstracted behind [`transport::Transport`]; everything
//! else in this crate is deterministic and free of I/O.

pub mod classify;
pub mod endpoint;
pub mod error;
pub mod gate;
pub mod operation;
pub mod outcome;
pub mod params;
pub mod patch;
pub mod pointer;
pub mod request;
pub mod run;
pub mod transport;

pub use endpoint::Endpoint;
pub use error::{ConfigError, Error};
pub use operation::OperationKind;
pub use outcome::{Outcome, Terminal};
pub use params::{ObjectParams, Params};
pub use pointer::{Pointer, Resolution};
pub use request::{Invocation, PatchRequest};
pub use run::run;
pub use transport::{Headers, Response, Transport};
