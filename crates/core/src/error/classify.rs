use crate::cache::CacheError;

use super::{DomainError, ErrorKind};

/// Returns the kind an error belongs to.
///
/// The outermost [`DomainError`] in the chain wins, so an already-typed error
/// is never re-classified. A bare [`CacheError`] is classified the same way
/// `From<CacheError> for DomainError` does. Anything else is `Internal`.
pub fn classify(err: &anyhow::Error) -> ErrorKind {
    classify_with_message(err).0
}

/// Returns the kind together with the message that is safe to show.
pub(crate) fn classify_with_message(err: &anyhow::Error) -> (ErrorKind, String) {
    for cause in err.chain() {
        if let Some(domain) = cause.downcast_ref::<DomainError>() {
            return (domain.kind(), domain.message().to_string());
        }
        if let Some(cache) = cause.downcast_ref::<CacheError>() {
            let domain = DomainError::from(cache.clone());
            return (domain.kind(), domain.message().to_string());
        }
    }
    (
        ErrorKind::Internal,
        ErrorKind::Internal.default_message().to_string(),
    )
}

/// Describes the underlying cause for logging, if there is one.
///
/// For a top-level [`DomainError`] this is everything below it in the chain;
/// for any other error it is the whole chain.
pub(crate) fn describe_cause(err: &anyhow::Error) -> Option<String> {
    let mut chain = err.chain();
    let first = chain.next()?;
    if first.is::<DomainError>() {
        let rest: Vec<String> = chain.map(|cause| cause.to_string()).collect();
        if rest.is_empty() {
            None
        } else {
            Some(rest.join(": "))
        }
    } else {
        Some(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_domain_error_kind_is_kept() {
        let err = anyhow::Error::new(DomainError::not_found("venue not found"));
        assert_eq!(classify(&err), ErrorKind::NotFound);
    }

    #[test]
    fn test_domain_error_under_context_is_found() {
        let result: anyhow::Result<()> =
            Err(DomainError::unauthorized("missing credentials").into());
        let err = result.context("while loading venue").unwrap_err();
        assert_eq!(classify(&err), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_outermost_domain_error_wins() {
        let inner = DomainError::not_found("inner");
        let outer = DomainError::upstream_unavailable("outer").with_source(inner);
        let err = anyhow::Error::new(outer);
        let (kind, message) = classify_with_message(&err);
        assert_eq!(kind, ErrorKind::UpstreamUnavailable);
        assert_eq!(message, "outer");
    }

    #[test]
    fn test_bare_cache_error_is_classified() {
        let err = anyhow::Error::new(CacheError::Unavailable("timeout".to_string()));
        assert_eq!(classify(&err), ErrorKind::UpstreamUnavailable);
    }

    #[test]
    fn test_untyped_error_is_internal() {
        let err = anyhow::anyhow!("pq: password authentication failed");
        let (kind, message) = classify_with_message(&err);
        assert_eq!(kind, ErrorKind::Internal);
        assert_eq!(message, "internal server error");
    }

    #[test]
    fn test_io_error_is_internal() {
        let err = anyhow::Error::new(std::io::Error::other("disk full"));
        assert_eq!(classify(&err), ErrorKind::Internal);
    }

    #[test]
    fn test_describe_cause_domain_without_source() {
        let err = anyhow::Error::new(DomainError::invalid_input("bad id"));
        assert_eq!(describe_cause(&err), None);
    }

    #[test]
    fn test_describe_cause_domain_with_source() {
        let err = anyhow::Error::new(
            DomainError::not_found("venue not found").with_source(std::io::Error::other("row missing")),
        );
        assert_eq!(describe_cause(&err).as_deref(), Some("row missing"));
    }

    #[test]
    fn test_describe_cause_untyped_is_full_chain() {
        let err = anyhow::anyhow!("socket closed").context("query failed");
        assert_eq!(
            describe_cause(&err).as_deref(),
            Some("query failed: socket closed")
        );
    }
}
