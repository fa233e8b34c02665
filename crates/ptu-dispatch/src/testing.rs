// MockTransport — testing utility for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use ptu_dispatch_types::{
    BoxFuture, Completion, DispatchTarget, Error, FinishReason, Message, Transport, Usage,
};

/// Create a minimal test Completion with the given text.
pub fn make_test_completion(text: &str) -> Completion {
    Completion {
        id: "cmpl_test".into(),
        model: "test-model".into(),
        message: Message::assistant(text),
        finish_reason: FinishReason::stop(),
        usage: Usage::default(),
        raw: None,
    }
}

/// A mock transport for testing. Returns pre-configured responses or errors
/// per deployment, in the order they were queued (FIFO per target).
#[derive(Default)]
pub struct MockTransport {
    /// Per-deployment queues: Ok(Completion) or Err(Error), consumed in
    /// insertion order.
    actions: Mutex<HashMap<String, Vec<Result<Completion, Error>>>>,
    /// Every (deployment, conversation) pair seen by `send`.
    recorded: Mutex<Vec<(String, Vec<Message>)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion for the given deployment.
    pub fn with_completion(self, deployment: &str, completion: Completion) -> Self {
        self.actions
            .lock()
            .unwrap()
            .entry(deployment.to_string())
            .or_default()
            .push(Ok(completion));
        self
    }

    /// Queue an error for the given deployment.
    pub fn with_error(self, deployment: &str, error: Error) -> Self {
        self.actions
            .lock()
            .unwrap()
            .entry(deployment.to_string())
            .or_default()
            .push(Err(error));
        self
    }

    /// Number of `send` calls made against the given deployment.
    pub fn call_count(&self, deployment: &str) -> usize {
        self.recorded
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == deployment)
            .count()
    }

    /// All (deployment, conversation) pairs recorded by `send` calls.
    pub fn recorded_sends(&self) -> Vec<(String, Vec<Message>)> {
        self.recorded.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn send<'a>(
        &'a self,
        target: &'a DispatchTarget,
        conversation: &'a [Message],
    ) -> BoxFuture<'a, Result<Completion, Error>> {
        self.recorded
            .lock()
            .unwrap()
            .push((target.deployment.clone(), conversation.to_vec()));
        Box::pin(async {
            let mut actions = self.actions.lock().unwrap();
            if let Some(queue) = actions.get_mut(&target.deployment) {
                if !queue.is_empty() {
                    return queue.remove(0);
                }
            }
            Err(Error::configuration(format!(
                "MockTransport: no actions queued for '{}'",
                target.deployment
            )))
        })
    }
}
