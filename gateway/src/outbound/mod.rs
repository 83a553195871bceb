//! Outbound adapters implementing domain ports.
//!
//! - **introspection**: RFC 7662 token introspection over reqwest
//! - **backend**: bearer-token passthrough calls over reqwest
//! - **metrics**: Prometheus-backed outcome counters (feature-gated)
//!
//! Adapters translate between domain types and the wire. They contain no
//! business logic.

pub mod backend;
pub mod introspection;
#[cfg(feature = "metrics")]
pub mod metrics;

use std::error::Error as StdError;

/// Render `error` followed by each distinct underlying cause, joined by `: `.
///
/// reqwest's top-level message names the URL only; the connect or I/O cause
/// lives further down the source chain.
pub(crate) fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct Refused;

    #[derive(Debug, thiserror::Error)]
    #[error("tcp connect error")]
    struct Connect(#[source] Refused);

    #[derive(Debug, thiserror::Error)]
    #[error("error sending request")]
    struct SendFailed(#[source] Connect);

    #[derive(Debug, thiserror::Error)]
    #[error("error sending request: tcp connect error")]
    struct Repeating(#[source] Connect);

    #[test]
    fn causes_are_appended_in_order() {
        assert_eq!(
            error_chain(&SendFailed(Connect(Refused))),
            "error sending request: tcp connect error: connection refused"
        );
    }

    #[test]
    fn causes_already_in_the_message_are_not_repeated() {
        assert_eq!(
            error_chain(&Repeating(Connect(Refused))),
            "error sending request: tcp connect error: connection refused"
        );
    }

    #[test]
    fn errors_without_a_source_render_as_is() {
        assert_eq!(error_chain(&Refused), "connection refused");
    }
}
