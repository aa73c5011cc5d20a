use std::{future::Future, time::Duration};

use rand::Rng;

use crate::{
    error::TimeoutError,
    ibc_types::{ChannelState, ConnectionState, IbcChannelId, IbcPortId},
    prelude::*,
};

/// Read-only view of the chain state the readiness probes poll.
///
/// `QueryClient` is the production implementation; tests substitute
/// in-memory fakes.
pub trait StateSource {
    fn chain_id(&self) -> &ChainId;

    /// States of every connection currently known to the chain.
    fn connection_states(&self) -> impl Future<Output = Result<Vec<ConnectionState>>>;

    fn channel_state(
        &self,
        channel_id: &IbcChannelId,
        port_id: &IbcPortId,
    ) -> impl Future<Output = Result<ChannelState>>;

    fn current_height(&self) -> impl Future<Output = Result<u64>>;
}

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// How a probe spends its budget: one state query per `interval`, up to
/// `timeout` of accumulated sleeping. Jitter adds up to a quarter interval
/// per sleep so many probes against one endpoint don't fire in lockstep.
#[derive(Clone, Copy, Debug)]
pub struct PollPolicy {
    pub interval: Duration,
    pub timeout: Duration,
    pub jitter: bool,
}

impl PollPolicy {
    pub fn new(timeout: Duration) -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout,
            jitter: false,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_jitter(mut self) -> Self {
        self.jitter = true;
        self
    }

    fn sleep_duration(&self) -> Duration {
        if self.jitter {
            let max_extra_millis = (self.interval.as_millis() / 4) as u64;
            if max_extra_millis > 0 {
                let extra = rand::rng().random_range(0..=max_extra_millis);
                return self.interval + Duration::from_millis(extra);
            }
        }
        self.interval
    }
}

/// What the last successful query reported before a probe gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observed {
    /// every query so far failed (endpoint may not be serving yet)
    Unreachable,
    /// the chain answered but has no connections at all
    NoConnections,
    Connection(ConnectionState),
    Channel(ChannelState),
    Height(u64),
    Balance(u128),
}

impl std::fmt::Display for Observed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Observed::Unreachable => write!(f, "endpoint unreachable"),
            Observed::NoConnections => write!(f, "no connections exist yet"),
            Observed::Connection(state) => write!(f, "connection state {}", state),
            Observed::Channel(state) => write!(f, "channel state {}", state),
            Observed::Height(height) => write!(f, "block height {}", height),
            Observed::Balance(amount) => write!(f, "balance {}", amount),
        }
    }
}

pub(crate) enum Probe<T> {
    Ready(T),
    Pending(Observed),
}

/// The polling loop every waiter shares: query, check, sleep, re-query.
///
/// Query errors are swallowed and retried since the endpoint routinely
/// doesn't exist until the chain has progressed past genesis; only the
/// deadline turns them into a failure. On success, also reports how much
/// budget was spent so multi-phase waits can share one deadline.
pub(crate) async fn poll_until<T, F, Fut>(
    chain_id: &ChainId,
    policy: PollPolicy,
    mut probe: F,
) -> Result<(T, Duration), TimeoutError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Probe<T>>>,
{
    let mut waited = Duration::ZERO;
    let mut last_observed = Observed::Unreachable;

    loop {
        match probe().await {
            Ok(Probe::Ready(value)) => return Ok((value, waited)),
            Ok(Probe::Pending(observed)) => last_observed = observed,
            Err(e) => {
                tracing::debug!(%chain_id, "state query failed, treating as not ready: {e:?}");
                last_observed = Observed::Unreachable;
            }
        }

        if waited >= policy.timeout {
            return Err(TimeoutError {
                chain_id: chain_id.clone(),
                waited,
                last_observed,
            });
        }

        let sleep = policy.sleep_duration();
        futures_timer::Delay::new(sleep).await;
        waited += sleep;
    }
}

/// Waits until any IBC connection on the chain reports OPEN.
///
/// Succeeds on the first open connection seen and never polls again after
/// that; relayer setup decides which connection that is, not us.
pub async fn wait_for_connection_open<S: StateSource>(
    source: &S,
    policy: PollPolicy,
) -> Result<(), TimeoutError> {
    poll_until(source.chain_id(), policy, move || async move {
        let states = source.connection_states().await?;
        if states.iter().any(|state| state.is_open()) {
            return Ok(Probe::Ready(()));
        }
        Ok(Probe::Pending(match states.first() {
            Some(state) => Observed::Connection(*state),
            None => Observed::NoConnections,
        }))
    })
    .await
    .map(|(ready, _)| ready)
}

/// Waits until the named channel reports OPEN.
///
/// A CLOSED channel keeps being polled: during setup races CLOSED can be
/// transient, and if it isn't, the timeout error names it.
pub async fn wait_for_channel_open<S: StateSource>(
    source: &S,
    channel_id: &IbcChannelId,
    port_id: &IbcPortId,
    policy: PollPolicy,
) -> Result<(), TimeoutError> {
    poll_until(source.chain_id(), policy, move || async move {
        let state = source.channel_state(channel_id, port_id).await?;
        if state.is_open() {
            Ok(Probe::Ready(()))
        } else {
            Ok(Probe::Pending(Observed::Channel(state)))
        }
    })
    .await
    .map(|(ready, _)| ready)
}

/// Waits until the chain reaches at least `target_height`.
pub async fn wait_until_block_height<S: StateSource>(
    source: &S,
    target_height: u64,
    policy: PollPolicy,
) -> Result<(), TimeoutError> {
    poll_until(source.chain_id(), policy, move || async move {
        let height = source.current_height().await?;
        if height >= target_height {
            Ok(Probe::Ready(()))
        } else {
            Ok(Probe::Pending(Observed::Height(height)))
        }
    })
    .await
    .map(|(ready, _)| ready)
}

/// Waits for the chain to produce `n_blocks` more blocks, counting from
/// the first height it manages to read. Both phases draw on the same
/// budget, so the initial read failing until the node is up costs the
/// wait, not the caller's deadline math.
pub async fn wait_blocks<S: StateSource>(
    source: &S,
    n_blocks: u64,
    policy: PollPolicy,
) -> Result<(), TimeoutError> {
    let (current, waited) = poll_until(source.chain_id(), policy, move || async move {
        source.current_height().await.map(Probe::Ready)
    })
    .await?;

    let remaining = PollPolicy {
        timeout: policy.timeout.saturating_sub(waited),
        ..policy
    };
    wait_until_block_height(source, current + n_blocks, remaining).await
}
