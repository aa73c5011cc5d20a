// tx lookups don't go through the retry policy: the interesting "failure"
// is NotFound while the node's indexer catches up, and that wants the
// polling treatment, not blind retries

use std::time::Duration;

use crate::{events::TxEvents, prelude::*};

impl QueryClient {
    /// Fetches a transaction by hash, polling while the node hasn't
    /// indexed it yet. A broadcast commonly returns before the tx is
    /// queryable, so NotFound is "not yet", every other error is real.
    #[tracing::instrument]
    pub async fn poll_until_tx_ready(
        &self,
        tx_hash: String,
        sleep_duration: Duration,
        timeout_duration: Duration,
    ) -> Result<PollTxResponse> {
        let mut total_duration = Duration::default();

        let mut query_client =
            lookout_proto::tx::service_client::ServiceClient::new(self.grpc_channel());

        loop {
            let req = lookout_proto::tx::GetTxRequest {
                hash: tx_hash.clone(),
            };

            let response = match query_client.get_tx(req).await {
                Ok(res) => {
                    let inner = res.into_inner();
                    Some((inner.tx, inner.tx_response))
                }
                Err(e) => {
                    if e.code() == tonic::Code::Ok || e.code() == tonic::Code::NotFound {
                        None
                    } else {
                        tracing::debug!(
                            "failed grpc GetTxRequest [code: {}]. Full error: {:?}",
                            e.code(),
                            e
                        );
                        return Err(e.into());
                    }
                }
            };

            if let Some((tx, Some(tx_response))) = response {
                return Ok(PollTxResponse { tx, tx_response });
            }

            futures_timer::Delay::new(sleep_duration).await;
            total_duration += sleep_duration;
            if total_duration >= timeout_duration {
                return Err(anyhow!("timeout waiting for tx {}", tx_hash));
            }
        }
    }
}

pub struct PollTxResponse {
    pub tx: Option<lookout_proto::tx::Tx>,
    pub tx_response: lookout_proto::abci::TxResponse,
}

impl PollTxResponse {
    pub fn code(&self) -> u32 {
        self.tx_response.code
    }

    pub fn raw_log(&self) -> &str {
        &self.tx_response.raw_log
    }

    /// The decoded event log, ready for per-message assertions.
    pub fn events(&self) -> TxEvents {
        TxEvents::from(&self.tx_response)
    }
}
