pub mod basic;
pub mod ibc;
pub mod tx;

use std::{future::Future, time::Duration};

use crate::{
    ibc_types::{ChannelState, ConnectionState, IbcChannelId, IbcPortId},
    prelude::*,
    readiness::{self, poll_until, Observed, PollPolicy, Probe, StateSource},
};

/// Read-only gRPC client for one chain. Cheap to clone; clones share the
/// underlying channel.
#[derive(Clone)]
pub struct QueryClient {
    pub chain_config: ChainConfig,
    pub retry: RetryPolicy,
    grpc_channel: tonic::transport::Channel,
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("chain_id", &self.chain_config.chain_id)
            .finish()
    }
}

/// One self-contained query against the chain. Implementations carry
/// their own parameters so a request value can be retried as-is.
pub trait QueryRequest: Clone + std::fmt::Debug + Send {
    type QueryResponse: std::fmt::Debug + Send;

    fn request(&self, client: QueryClient) -> impl Future<Output = Result<Self::QueryResponse>>;
}

/// Exponential backoff for one-shot queries. This is for flaky transport,
/// not for waiting on chain state; the readiness loops do their own
/// polling and bypass it.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(100),
        }
    }
}

impl QueryClient {
    pub fn new(chain_config: ChainConfig) -> Result<Self> {
        let grpc_channel = crate::network::get_grpc_channel(&chain_config)?;

        Ok(Self {
            chain_config,
            retry: RetryPolicy::default(),
            grpc_channel,
        })
    }

    pub(crate) fn grpc_channel(&self) -> tonic::transport::Channel {
        self.grpc_channel.clone()
    }

    pub async fn run_with_retry<REQ: QueryRequest>(&self, req: REQ) -> Result<REQ::QueryResponse> {
        let mut attempts = 0;
        let mut backoff = self.retry.backoff;

        loop {
            attempts += 1;
            match req.request(self.clone()).await {
                Ok(resp) => return Ok(resp),
                Err(err) => {
                    if attempts < self.retry.max_attempts {
                        futures_timer::Delay::new(backoff).await;
                        backoff *= 2;
                    } else {
                        return Err(err);
                    }
                }
            }
        }
    }

    // readiness conveniences; the retry policy does not apply inside these,
    // the polling loop is itself the retry mechanism
    pub async fn wait_for_ibc_connection(
        &self,
        policy: PollPolicy,
    ) -> Result<(), TimeoutError> {
        readiness::wait_for_connection_open(self, policy).await
    }

    pub async fn wait_for_ibc_channel(
        &self,
        channel_id: &IbcChannelId,
        port_id: &IbcPortId,
        policy: PollPolicy,
    ) -> Result<(), TimeoutError> {
        readiness::wait_for_channel_open(self, channel_id, port_id, policy).await
    }

    pub async fn wait_until_block_height(
        &self,
        target_height: u64,
        policy: PollPolicy,
    ) -> Result<(), TimeoutError> {
        readiness::wait_until_block_height(self, target_height, policy).await
    }

    pub async fn wait_blocks(
        &self,
        n_blocks: u64,
        policy: PollPolicy,
    ) -> Result<(), TimeoutError> {
        readiness::wait_blocks(self, n_blocks, policy).await
    }

    /// Waits until `address` holds at least `minimum` of `denom`. This is
    /// how a cross-chain transfer is confirmed from the destination side:
    /// the voucher balance converges some blocks after the send.
    pub async fn wait_for_balance(
        &self,
        address: &str,
        denom: &str,
        minimum: u128,
        policy: PollPolicy,
    ) -> Result<(), TimeoutError> {
        poll_until(&self.chain_config.chain_id, policy, move || async move {
            let amount = self
                .balance(address, Some(denom.to_string()))
                .await?
                .unwrap_or_default();
            if amount >= minimum {
                Ok(Probe::Ready(()))
            } else {
                Ok(Probe::Pending(Observed::Balance(amount)))
            }
        })
        .await
        .map(|(ready, _)| ready)
    }
}

impl StateSource for QueryClient {
    fn chain_id(&self) -> &ChainId {
        &self.chain_config.chain_id
    }

    async fn connection_states(&self) -> Result<Vec<ConnectionState>> {
        Ok(self
            .ibc_connections()
            .await?
            .into_iter()
            .map(|(_, state)| state)
            .collect())
    }

    async fn channel_state(
        &self,
        channel_id: &IbcChannelId,
        port_id: &IbcPortId,
    ) -> Result<ChannelState> {
        self.ibc_channel_state(channel_id, port_id).await
    }

    async fn current_height(&self) -> Result<u64> {
        self.block_height().await
    }
}
