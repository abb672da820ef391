use json_patch::{
    AddOperation, MoveOperation, Patch, PatchOperation, RemoveOperation, ReplaceOperation,
    TestOperation,
};

use crate::{
    error::ConfigError,
    operation::OperationKind,
    pointer::Pointer,
    request::PatchRequest,
};

/// Build the single-operation patch document sent to the server.
///
/// Serializes as `[{"op": ..., "path": ..., "value"|"from": ...}]`.
pub fn build_patch(request: &PatchRequest) -> Result<Patch, ConfigError> {
    let path = wire_pointer(request.path.wire_path(), &request.path)?;
    let value = || {
        request
            .value
            .clone()
            .ok_or(ConfigError::MissingValue(request.operation))
    };

    let op = match request.operation {
        OperationKind::Replace => PatchOperation::Replace(ReplaceOperation {
            path,
            value: value()?,
        }),
        OperationKind::Add => PatchOperation::Add(AddOperation {
            path,
            value: value()?,
        }),
        OperationKind::Test => PatchOperation::Test(TestOperation {
            path,
            value: value()?,
        }),
        OperationKind::Remove => PatchOperation::Remove(RemoveOperation { path }),
        OperationKind::Move => {
            let from = request.from.as_ref().ok_or(ConfigError::MissingFrom)?;
            PatchOperation::Move(MoveOperation {
                from: wire_pointer(from.as_str(), from)?,
                path,
            })
        }
        OperationKind::Get => return Err(ConfigError::NotAPatch(OperationKind::Get)),
    };
    Ok(Patch(vec![op]))
}

/// `from` is sent as given; only `path` loses its trailing slashes.
fn wire_pointer<P: std::str::FromStr>(wire: &str, pointer: &Pointer) -> Result<P, ConfigError>
where
    P::Err: std::fmt::Display,
{
    wire.parse()
        .map_err(|e: P::Err| ConfigError::InvalidPointer {
            path: pointer.as_str().to_string(),
            reason: e.to_string(),
        })
}
