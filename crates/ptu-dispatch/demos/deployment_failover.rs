/// Deployment failover demo.
///
/// Simulates a reserved deployment that rate-limits twice: the dispatcher
/// waits out the first hint, then redirects to the pay-as-you-go deployment
/// once the projected wait would breach the latency budget.
///
/// Run with `cargo run --example deployment_failover`.
use std::sync::Mutex;
use std::time::{Duration, Instant};

use ptu_dispatch::{
    BoxFuture, Completion, DispatchTarget, Dispatcher, DispatcherConfig, Error, FinishReason,
    Message, Transport, Usage,
};

/// Pretends to be the network: the reserved deployment answers 429 for each
/// queued hint, the pay-as-you-go deployment always succeeds.
struct SimulatedTransport {
    primary_hints: Mutex<Vec<Duration>>,
}

impl Transport for SimulatedTransport {
    fn send<'a>(
        &'a self,
        target: &'a DispatchTarget,
        _conversation: &'a [Message],
    ) -> BoxFuture<'a, Result<Completion, Error>> {
        Box::pin(async move {
            if target.deployment == "gpt-4o-ptu" {
                let mut hints = self.primary_hints.lock().unwrap();
                if !hints.is_empty() {
                    return Err(Error::rate_limited(&target.deployment, Some(hints.remove(0))));
                }
            }
            Ok(Completion {
                id: "cmpl_demo".into(),
                model: target.deployment.clone(),
                message: Message::assistant(format!("Hello from {}!", target.deployment)),
                finish_reason: FinishReason::stop(),
                usage: Usage::default(),
                raw: None,
            })
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let transport = SimulatedTransport {
        primary_hints: Mutex::new(vec![
            Duration::from_millis(1_500),
            Duration::from_millis(3_000),
        ]),
    };
    let config = DispatcherConfig::builder()
        .primary(DispatchTarget::new("gpt-4o-ptu"))
        .fallback(DispatchTarget::new("gpt-4o-paygo"))
        .latency_budget(Duration::from_millis(4_000))
        .build()?;
    let dispatcher = Dispatcher::new(transport, config);

    let conversation = vec![
        Message::system("You are a helpful assistant."),
        Message::user("Does the reserved deployment support failover?"),
    ];

    println!("budget:    {:?}", dispatcher.config().latency_budget);

    let started = Instant::now();
    let result = dispatcher.dispatch(&conversation).await?;

    println!("served_by: {}", result.served_by);
    println!("response:  {}", result.completion.text());
    println!("latency:   {:?}", started.elapsed());
    Ok(())
}
