// Transport trait — the network capability the dispatcher delegates to.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::completion::Completion;
use crate::error::Error;
use crate::message::Message;
use crate::target::DispatchTarget;

/// A boxed future that is Send.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The capability that performs the actual network call against one
/// deployment. The dispatcher treats it as opaque: it only reacts to the
/// shape of the success/failure it returns.
///
/// Uses an explicit BoxFuture return type instead of the `async-trait`
/// macro for two reasons:
/// 1. No hidden heap allocations from macro expansion
/// 2. Explicit control over lifetime bounds
///
/// Implementations must support concurrent independent use (typical of
/// pooled HTTP clients). Credentials and the base address live in the
/// transport, not in `DispatchTarget`.
pub trait Transport: Send + Sync {
    /// Send one conversation to the given deployment. Returns the completed
    /// response, a `RateLimit` failure carrying the server's retry hint, or
    /// any other failure untouched.
    fn send<'a>(
        &'a self,
        target: &'a DispatchTarget,
        conversation: &'a [Message],
    ) -> BoxFuture<'a, Result<Completion, Error>>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send<'a>(
        &'a self,
        target: &'a DispatchTarget,
        conversation: &'a [Message],
    ) -> BoxFuture<'a, Result<Completion, Error>> {
        (**self).send(target, conversation)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send<'a>(
        &'a self,
        target: &'a DispatchTarget,
        conversation: &'a [Message],
    ) -> BoxFuture<'a, Result<Completion, Error>> {
        (**self).send(target, conversation)
    }
}
