//! Local pre-flight check that decides whether a mutating call is needed.

use crate::{operation::OperationKind, pointer::Resolution};

pub const PATH_MISSING_USE_ADD: &str =
    "NO CHANGE: Path does not already exist, consider using add method";
pub const PATH_EXISTS_USE_REPLACE: &str =
    "NO CHANGE: Path already exists, consider using replace method.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    /// Do not contact the server; the invocation fails with this message.
    ShortCircuit(&'static str),
}

/// `current` is the value at the request path in the object as last fetched.
///
/// The server does not reliably distinguish `add` from `replace`, so the
/// distinction is enforced here.
pub fn decide(operation: OperationKind, current: &Resolution<'_>) -> Decision {
    match (operation, current) {
        (OperationKind::Replace, Resolution::Absent) => Decision::ShortCircuit(PATH_MISSING_USE_ADD),
        (OperationKind::Add, Resolution::Found(_)) => {
            Decision::ShortCircuit(PATH_EXISTS_USE_REPLACE)
        }
        _ => Decision::Proceed,
    }
}
