// ptu-dispatch: latency-bounded retry/fallback dispatch for dual deployments

pub mod dispatcher;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod util;

// --- Curated re-exports from ptu-dispatch-types ---
// We avoid `pub use ptu_dispatch_types::*` to keep the public API surface
// intentional.
pub use ptu_dispatch_types::{
    // Type aliases
    BoxFuture,
    // Response
    Completion,
    // Result tagging
    DispatchResult,
    DispatchTarget,
    // Config
    DispatcherConfig,
    DispatcherConfigBuilder,
    // Errors
    Error,
    ErrorKind,
    FinishReason,
    // Messages
    Message,
    Role,
    ServedBy,
    // Transport seam
    Transport,
    Usage,
};

// --- Core dispatcher at crate root ---
pub use dispatcher::Dispatcher;

// Retry-hint parsing at crate root.
pub use util::hint::parse_retry_hint;

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify the curated re-exports cover the essential public types.
    #[test]
    fn test_curated_reexports_available() {
        let _ = Role::User;
        let _ = Message::user("test");
        let _ = ErrorKind::RateLimit;
        let _ = ServedBy::Primary;
        let _ = DispatchTarget::new("gpt-4o-ptu");
        let _: fn() -> DispatcherConfigBuilder = DispatcherConfig::builder;
    }

    #[test]
    fn test_parse_retry_hint_reexported_at_crate_root() {
        let headers = reqwest::header::HeaderMap::new();
        assert_eq!(parse_retry_hint(&headers), None);
    }
}
