use tracing::instrument;

use crate::prelude::*;

impl QueryClient {
    /// Balance of `addr` in `denom`, `None` if the account has never held
    /// the denom. Defaults to the chain's gas denom.
    #[instrument]
    pub async fn balance(&self, addr: &str, denom: Option<String>) -> Result<Option<u128>> {
        self.run_with_retry(BalanceReq {
            addr: addr.to_string(),
            denom,
        })
        .await
    }

    #[instrument]
    pub async fn block_height(&self) -> Result<u64> {
        self.run_with_retry(BlockHeightReq {}).await
    }
}

#[derive(Clone, Debug)]
pub struct BalanceReq {
    pub addr: String,
    pub denom: Option<String>,
}

impl QueryRequest for BalanceReq {
    type QueryResponse = Option<u128>;

    async fn request(&self, client: QueryClient) -> Result<Self::QueryResponse> {
        let mut query_client =
            lookout_proto::bank::query_client::QueryClient::new(client.grpc_channel());

        let denom = self
            .denom
            .clone()
            .unwrap_or(client.chain_config.gas_denom.clone());

        let coin = query_client
            .balance(lookout_proto::bank::QueryBalanceRequest {
                address: self.addr.clone(),
                denom,
            })
            .await
            .map(|res| res.into_inner().balance)?;

        match coin {
            None => Ok(None),
            Some(coin) => {
                let amount = coin
                    .amount
                    .parse::<u128>()
                    .context("couldn't parse amount")?;
                Ok(Some(amount))
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct BlockHeightReq {}

impl QueryRequest for BlockHeightReq {
    type QueryResponse = u64;

    async fn request(&self, client: QueryClient) -> Result<u64> {
        let mut query_client =
            lookout_proto::tendermint::service_client::ServiceClient::new(client.grpc_channel());

        let res = query_client
            .get_latest_block(lookout_proto::tendermint::GetLatestBlockRequest {})
            .await
            .map(|res| res.into_inner())
            .context("couldn't get latest block")?;

        // newer nodes return sdk_block, older ones only the tendermint block
        let height = match (res.sdk_block, res.block) {
            (Some(block), _) => block.header.context("no header found")?.height,
            (None, Some(block)) => block.header.context("no header found")?.height,
            (None, None) => bail!("no latest block found"),
        };

        Ok(height.try_into()?)
    }
}
