use std::fmt;

use serde_json::Value;

use crate::{
    endpoint::Endpoint, error::ConfigError, operation::OperationKind, params::Params,
    pointer::Pointer,
};

/// A validated operation. Constructed once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchRequest {
    pub operation: OperationKind,
    pub path: Pointer,
    /// Present exactly when the operation requires a value.
    pub value: Option<Value>,
    /// Present exactly for `move`.
    pub from: Option<Pointer>,
}

impl PatchRequest {
    pub fn new(
        operation: OperationKind,
        path: Option<&str>,
        value: Option<Value>,
        from: Option<&str>,
    ) -> Result<PatchRequest, ConfigError> {
        let path = match (operation, path) {
            (OperationKind::Get, p) => Pointer::lenient(p.unwrap_or("")),
            (_, Some(p)) => Pointer::parse(p)?,
            (op, None) => return Err(ConfigError::MissingPath(op)),
        };

        let value = if operation.requires_value() {
            Some(value.ok_or(ConfigError::MissingValue(operation))?)
        } else {
            None
        };

        let from = if operation == OperationKind::Move {
            Some(Pointer::parse(from.ok_or(ConfigError::MissingFrom)?)?)
        } else {
            None
        };

        Ok(PatchRequest {
            operation,
            path,
            value,
            from,
        })
    }
}

/// Everything needed to run one operation.
#[derive(Clone, PartialEq)]
pub struct Invocation {
    pub token: String,
    pub endpoint: Endpoint,
    pub request: PatchRequest,
}

impl Invocation {
    pub fn from_params(params: Params) -> Result<Invocation, ConfigError> {
        let object = params.object;
        let operation: OperationKind = object.operation.parse()?;
        let request = PatchRequest::new(
            operation,
            object.path.as_deref(),
            object.value,
            object.from.as_deref(),
        )?;
        Ok(Invocation {
            token: params.token,
            endpoint: Endpoint {
                host: params.host,
                port: params.port,
                namespace: params.namespace,
                resource_kind: object.type_,
                resource_name: object.name,
            },
            request,
        })
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("token", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("request", &self.request)
            .finish()
    }
}
