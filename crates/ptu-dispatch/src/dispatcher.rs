// Dispatcher — latency-bounded retry/fallback across two deployments.

use tokio::time::Instant;

use ptu_dispatch_types::{
    DispatchResult, DispatcherConfig, Error, ErrorKind, Message, ServedBy, Transport,
};

/// Routes one conversation to the reserved deployment, honoring server retry
/// hints on rate limiting, and redirects to the pay-as-you-go deployment once
/// the projected wait would breach the latency budget.
///
/// Stateless between calls: each `dispatch` owns its clock and wait-cycle
/// counter, so concurrent calls proceed independently. The two targets are
/// read-only and safely shared.
pub struct Dispatcher<T> {
    transport: T,
    config: DispatcherConfig,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T, config: DispatcherConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Dispatch one conversation. Returns the response tagged with the
    /// deployment that served it, or the first non-recoverable failure.
    ///
    /// ## Retry behavior
    /// - Success on primary returns immediately, tagged `Primary`.
    /// - A rate-limit failure must carry a retry hint; a missing hint is a
    ///   `Protocol` error (the dispatcher never guesses a wait).
    /// - While `elapsed + hint` stays within the latency budget, the call
    ///   suspends for exactly the hinted duration and retries primary. The
    ///   comparison tightens monotonically as elapsed time grows; a
    ///   wait-cycle cap additionally bounds degenerate hint sequences.
    /// - The first hint that would breach the budget redirects to fallback
    ///   with no additional wait. Primary is never retried afterwards.
    /// - Any other failure, and any fallback failure, propagates unchanged.
    pub async fn dispatch(&self, conversation: &[Message]) -> Result<DispatchResult, Error> {
        if conversation.is_empty() {
            return Err(Error::configuration("conversation must not be empty"));
        }

        let started = Instant::now();
        let mut wait_cycles = 0u32;

        loop {
            tracing::debug!(deployment = %self.config.primary, "attempting reserved deployment");
            match self.transport.send(&self.config.primary, conversation).await {
                Ok(completion) => {
                    tracing::info!(
                        deployment = %self.config.primary,
                        served_by = %ServedBy::Primary,
                        "completion served"
                    );
                    return Ok(DispatchResult {
                        completion,
                        served_by: ServedBy::Primary,
                    });
                }
                Err(err) if err.kind == ErrorKind::RateLimit => {
                    let hint = err.retry_after.ok_or_else(|| {
                        Error::protocol("rate-limit response carried no retry hint")
                    })?;
                    let elapsed = started.elapsed();

                    if elapsed + hint > self.config.latency_budget {
                        tracing::info!(
                            elapsed_ms = elapsed.as_millis() as u64,
                            hint_ms = hint.as_millis() as u64,
                            budget_ms = self.config.latency_budget.as_millis() as u64,
                            "projected wait exceeds latency budget, redirecting to fallback"
                        );
                        return self.dispatch_fallback(conversation).await;
                    }
                    if wait_cycles >= self.config.max_wait_cycles {
                        tracing::warn!(
                            wait_cycles,
                            "wait-cycle cap reached, redirecting to fallback"
                        );
                        return self.dispatch_fallback(conversation).await;
                    }

                    wait_cycles += 1;
                    tracing::info!(
                        deployment = %self.config.primary,
                        wait_ms = hint.as_millis() as u64,
                        "rate limited, retrying after hinted wait"
                    );
                    tokio::time::sleep(hint).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn dispatch_fallback(&self, conversation: &[Message]) -> Result<DispatchResult, Error> {
        tracing::debug!(deployment = %self.config.fallback, "attempting pay-as-you-go deployment");
        let completion = self
            .transport
            .send(&self.config.fallback, conversation)
            .await?;
        tracing::info!(
            deployment = %self.config.fallback,
            served_by = %ServedBy::Fallback,
            "completion served"
        );
        Ok(DispatchResult {
            completion,
            served_by: ServedBy::Fallback,
        })
    }
}
