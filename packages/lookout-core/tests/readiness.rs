use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::{Duration, Instant},
};

use lookout_config::ChainId;
use lookout_core::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// A scripted sequence of query outcomes. Each call consumes one step;
/// the final step repeats forever, so "stays open" and "never opens" are
/// both single trailing steps.
struct Script<T> {
    steps: Mutex<VecDeque<Result<T, String>>>,
    calls: AtomicUsize,
}

impl<T: Clone> Script<T> {
    fn new(steps: impl IntoIterator<Item = Result<T, String>>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    fn next(&self) -> anyhow::Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut steps = self.steps.lock().unwrap();
        let step = if steps.len() > 1 {
            steps.pop_front().unwrap()
        } else {
            steps.front().cloned().expect("script exhausted")
        };
        step.map_err(|e| anyhow::anyhow!(e))
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<T: Clone> Default for Script<T> {
    fn default() -> Self {
        Self::new([Err("query not scripted for this test".to_string())])
    }
}

struct FakeChain {
    chain_id: ChainId,
    connections: Script<Vec<ConnectionState>>,
    channel: Script<ChannelState>,
    height: Script<u64>,
}

impl FakeChain {
    fn new(chain_id: &str) -> Self {
        Self {
            chain_id: ChainId::new(chain_id),
            connections: Script::default(),
            channel: Script::default(),
            height: Script::default(),
        }
    }
}

impl StateSource for FakeChain {
    fn chain_id(&self) -> &ChainId {
        &self.chain_id
    }

    async fn connection_states(&self) -> anyhow::Result<Vec<ConnectionState>> {
        self.connections.next()
    }

    async fn channel_state(
        &self,
        _channel_id: &IbcChannelId,
        _port_id: &IbcPortId,
    ) -> anyhow::Result<ChannelState> {
        self.channel.next()
    }

    async fn current_height(&self) -> anyhow::Result<u64> {
        self.height.next()
    }
}

fn fast_policy() -> PollPolicy {
    PollPolicy::new(Duration::from_millis(100)).with_interval(Duration::from_millis(20))
}

#[tokio::test]
async fn connection_probe_succeeds_once_open_and_stops_polling() {
    init_tracing();

    let mut chain = FakeChain::new("secretdev-1");
    chain.connections = Script::new([
        Ok(vec![ConnectionState::Init]),
        Ok(vec![ConnectionState::TryOpen]),
        Ok(vec![ConnectionState::TryOpen, ConnectionState::Open]),
    ]);

    wait_for_connection_open(&chain, fast_policy()).await.unwrap();

    // success on the third query, and not one query more
    assert_eq!(chain.connections.calls(), 3);
}

#[tokio::test]
async fn connection_probe_swallows_transient_errors() {
    init_tracing();

    let mut chain = FakeChain::new("secretdev-1");
    chain.connections = Script::new([
        Err("connection refused".to_string()),
        Err("connection refused".to_string()),
        Ok(vec![ConnectionState::Open]),
    ]);

    wait_for_connection_open(&chain, fast_policy()).await.unwrap();
    assert_eq!(chain.connections.calls(), 3);
}

#[tokio::test]
async fn connection_probe_reports_empty_connection_list() {
    let mut chain = FakeChain::new("secretdev-1");
    chain.connections = Script::new([Ok(vec![])]);

    let err = wait_for_connection_open(&chain, fast_policy())
        .await
        .unwrap_err();

    assert_eq!(err.last_observed, Observed::NoConnections);
}

#[tokio::test]
async fn channel_probe_times_out_with_last_observed_state() {
    init_tracing();

    let chain_id = "secretdev-2";
    let mut chain = FakeChain::new(chain_id);
    chain.channel = Script::new([Ok(ChannelState::Init), Ok(ChannelState::TryOpen)]);

    let policy = fast_policy();
    let started = Instant::now();
    let err = wait_for_channel_open(
        &chain,
        &IbcChannelId::new("channel-0"),
        &IbcPortId::new("transfer"),
        policy,
    )
    .await
    .unwrap_err();

    assert_eq!(err.chain_id, ChainId::new(chain_id));
    assert_eq!(err.last_observed, Observed::Channel(ChannelState::TryOpen));

    // overshoot is bounded by a single poll interval
    assert!(err.waited >= policy.timeout);
    assert!(err.waited < policy.timeout + policy.interval);
    assert!(started.elapsed() < Duration::from_millis(500));
}

#[tokio::test]
async fn closed_channel_keeps_polling_until_the_deadline() {
    let mut chain = FakeChain::new("secretdev-2");
    chain.channel = Script::new([Ok(ChannelState::Closed)]);

    let err = wait_for_channel_open(
        &chain,
        &IbcChannelId::new("channel-0"),
        &IbcPortId::new("transfer"),
        fast_policy(),
    )
    .await
    .unwrap_err();

    // CLOSED is not treated as terminal, but it is diagnosable
    assert!(chain.channel.calls() > 1);
    assert_eq!(err.last_observed, Observed::Channel(ChannelState::Closed));
}

#[tokio::test]
async fn erroring_endpoint_times_out_as_unreachable() {
    let mut chain = FakeChain::new("secretdev-1");
    chain.height = Script::new([Err("tcp connect error".to_string())]);

    let err = wait_until_block_height(&chain, 10, fast_policy())
        .await
        .unwrap_err();

    assert_eq!(err.last_observed, Observed::Unreachable);
}

#[tokio::test]
async fn height_waiter_succeeds_at_target() {
    let mut chain = FakeChain::new("secretdev-1");
    chain.height = Script::new([Ok(5), Ok(6), Ok(7), Ok(8)]);

    wait_until_block_height(&chain, 8, fast_policy()).await.unwrap();
    assert_eq!(chain.height.calls(), 4);
}

#[tokio::test]
async fn height_waiter_reports_last_height_on_timeout() {
    let mut chain = FakeChain::new("secretdev-1");
    chain.height = Script::new([Ok(5), Ok(6)]);

    let err = wait_until_block_height(&chain, 100, fast_policy())
        .await
        .unwrap_err();

    assert_eq!(err.last_observed, Observed::Height(6));
}

#[tokio::test]
async fn wait_blocks_counts_from_first_readable_height() {
    let mut chain = FakeChain::new("secretdev-1");
    chain.height = Script::new([Ok(10), Ok(10), Ok(11), Ok(12)]);

    // target becomes 10 + 2 = 12
    wait_blocks(&chain, 2, fast_policy()).await.unwrap();
    assert_eq!(chain.height.calls(), 4);
}

#[tokio::test]
async fn wait_blocks_retries_the_initial_height_read() {
    let mut chain = FakeChain::new("secretdev-1");
    chain.height = Script::new([
        Err("node not started".to_string()),
        Err("node not started".to_string()),
        Ok(5),
        Ok(6),
        Ok(7),
    ]);

    wait_blocks(&chain, 2, fast_policy()).await.unwrap();
    assert_eq!(chain.height.calls(), 5);
}

#[tokio::test]
async fn independent_probes_converge_concurrently() {
    let mut chain_1 = FakeChain::new("secretdev-1");
    chain_1.connections = Script::new([
        Ok(vec![ConnectionState::Init]),
        Ok(vec![ConnectionState::Open]),
    ]);

    let mut chain_2 = FakeChain::new("secretdev-2");
    chain_2.connections = Script::new([
        Ok(vec![ConnectionState::TryOpen]),
        Ok(vec![ConnectionState::Open]),
    ]);

    let (first, second) = futures::join!(
        wait_for_connection_open(&chain_1, fast_policy()),
        wait_for_connection_open(&chain_2, fast_policy()),
    );

    first.unwrap();
    second.unwrap();
}
