use tracing::{debug, info, instrument, warn};

use crate::{
    classify::{classify, API_CALL_FAILED},
    error::Error,
    gate::{self, Decision},
    operation::OperationKind,
    outcome::Outcome,
    patch::build_patch,
    pointer::PathError,
    request::Invocation,
    transport::{Headers, Transport},
};

/// Run one invocation: fetch the object, then, for mutating operations,
/// check idempotency and send at most one patch.
///
/// Configuration errors are detected before the patch is sent. Server-side
/// failures are reported in the [`Outcome`], not as `Err`.
#[instrument(
    skip_all,
    fields(
        operation = %invocation.request.operation,
        object = %invocation.endpoint.resource_name,
    )
)]
pub async fn run<T: Transport + ?Sized>(
    transport: &T,
    invocation: &Invocation,
) -> Result<Outcome, Error> {
    let url = invocation.endpoint.url();
    let request = &invocation.request;

    info!(url = %url, "fetching object");
    let current = transport
        .get(&url, &Headers::for_get(&invocation.token))
        .await
        .map_err(|source| Error::Transport {
            context: format!("GET {} failed; check credentials and API URL", url),
            source,
        })?;
    debug!(status = current.status, "fetched object");

    if request.operation == OperationKind::Get {
        let outcome = classify(request, &current, &current.body)?;
        log_outcome(&outcome);
        return Ok(outcome);
    }

    if !current.is_success() {
        warn!(
            status = current.status,
            "GET returned status {}; continuing with the returned body, \
             a NO CHANGE result may be caused by it",
            current.status
        );
    }

    let prior = match request.path.resolve(&current.body) {
        Err(PathError::NotADocument { found }) => {
            warn!(status = current.status, found, "fetched body is not a JSON object");
            let outcome = Outcome::failure(API_CALL_FAILED, current.status, current.body.clone());
            log_outcome(&outcome);
            return Ok(outcome);
        }
        prior => prior?,
    };
    if let Decision::ShortCircuit(message) = gate::decide(request.operation, &prior) {
        info!(
            path = %request.path,
            get_status = current.status,
            "not sending patch: {}",
            message
        );
        return Ok(Outcome::short_circuit(message, current.body.clone()));
    }

    let patch = build_patch(request)?;
    debug!(
        payload = %serde_json::to_string(&patch).unwrap_or_default(),
        "sending patch"
    );
    let response = transport
        .patch(&url, &Headers::for_patch(&invocation.token), &patch)
        .await
        .map_err(|source| Error::Transport {
            context: format!("PATCH {} failed; check credentials and API URL", url),
            source,
        })?;

    let outcome = classify(request, &response, &current.body)?;
    log_outcome(&outcome);
    Ok(outcome)
}

fn log_outcome(outcome: &Outcome) {
    info!(
        changed = outcome.changed,
        failed = outcome.is_failure(),
        status = ?outcome.status_code,
        "{}",
        outcome.message
    );
}
