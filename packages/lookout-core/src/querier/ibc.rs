use tracing::instrument;

use crate::{
    ibc_types::{ChannelState, ConnectionState, IbcChannelId, IbcConnectionId, IbcPortId},
    prelude::*,
};

impl QueryClient {
    /// Every connection the chain knows about, with its handshake state.
    /// First page only; readiness checks want "is anything open", and a
    /// freshly started devnet has a handful of connections at most.
    #[instrument]
    pub async fn ibc_connections(&self) -> Result<Vec<(IbcConnectionId, ConnectionState)>> {
        self.run_with_retry(ConnectionsReq {}).await
    }

    #[instrument]
    pub async fn ibc_channel_state(
        &self,
        channel_id: &IbcChannelId,
        port_id: &IbcPortId,
    ) -> Result<ChannelState> {
        self.run_with_retry(ChannelReq {
            channel_id: channel_id.clone(),
            port_id: port_id.clone(),
        })
        .await
    }
}

#[derive(Clone, Debug)]
pub struct ConnectionsReq {}

impl QueryRequest for ConnectionsReq {
    type QueryResponse = Vec<(IbcConnectionId, ConnectionState)>;

    async fn request(&self, client: QueryClient) -> Result<Self::QueryResponse> {
        let mut query_client =
            lookout_proto::ibc::connection::query_client::QueryClient::new(client.grpc_channel());

        let resp = query_client
            .connections(lookout_proto::ibc::connection::QueryConnectionsRequest {
                pagination: None,
            })
            .await
            .map(|res| res.into_inner())
            .context("couldn't get connections")?;

        Ok(resp
            .connections
            .into_iter()
            .map(|connection| {
                let state = connection_state_from_proto(connection.state());
                (IbcConnectionId::new(connection.id), state)
            })
            .collect())
    }
}

#[derive(Clone, Debug)]
pub struct ChannelReq {
    pub channel_id: IbcChannelId,
    pub port_id: IbcPortId,
}

impl QueryRequest for ChannelReq {
    type QueryResponse = ChannelState;

    async fn request(&self, client: QueryClient) -> Result<ChannelState> {
        let mut query_client =
            lookout_proto::ibc::channel::query_client::QueryClient::new(client.grpc_channel());

        let channel = query_client
            .channel(lookout_proto::ibc::channel::QueryChannelRequest {
                channel_id: self.channel_id.to_string(),
                port_id: self.port_id.to_string(),
            })
            .await
            .map(|res| res.into_inner())
            .context("couldn't get channel")?
            .channel
            .context("missing channel")?;

        Ok(channel_state_from_proto(channel.state()))
    }
}

fn connection_state_from_proto(state: lookout_proto::ibc::connection::State) -> ConnectionState {
    use lookout_proto::ibc::connection::State as Proto;

    match state {
        Proto::Init => ConnectionState::Init,
        Proto::Tryopen => ConnectionState::TryOpen,
        Proto::Open => ConnectionState::Open,
        _ => ConnectionState::Uninitialized,
    }
}

fn channel_state_from_proto(state: lookout_proto::ibc::channel::State) -> ChannelState {
    use lookout_proto::ibc::channel::State as Proto;

    match state {
        Proto::Init => ChannelState::Init,
        Proto::Tryopen => ChannelState::TryOpen,
        Proto::Open => ChannelState::Open,
        Proto::Closed => ChannelState::Closed,
        // upgrade-flush states still route packets but aren't settled;
        // readiness shouldn't treat them as open
        _ => ChannelState::Uninitialized,
    }
}
