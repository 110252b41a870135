use crate::context::RequestContext;

use super::classify::{classify_with_message, describe_cause};
use super::{render, ErrorResponse};

/// Turns any error into a status and body, logging exactly one entry.
///
/// The log entry carries the request id, method, path, kind, status and the
/// underlying cause when there is one. The cause never reaches the body.
/// This function cannot fail: the worst case is a generic 500.
pub fn handle_as_response(
    ctx: &RequestContext,
    err: &anyhow::Error,
    method: &str,
    path: &str,
) -> ErrorResponse {
    let (kind, message) = classify_with_message(err);
    let cause = describe_cause(err);

    let mut response = render(kind, &message);
    response.body.request_id = Some(ctx.request_id.to_string());

    if response.status >= 500 {
        tracing::error!(
            request_id = %ctx.request_id,
            method,
            path,
            kind = kind.as_str(),
            status = response.status,
            cause = cause.as_deref(),
            "request failed"
        );
    } else {
        tracing::warn!(
            request_id = %ctx.request_id,
            method,
            path,
            kind = kind.as_str(),
            status = response.status,
            cause = cause.as_deref(),
            "request rejected"
        );
    }

    response
}
