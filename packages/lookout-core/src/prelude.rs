// local "prelude" that isn't exported
// some of these may be exported in the main prelude
pub(crate) use anyhow::{anyhow, bail, Context, Result};
pub(crate) use lookout_config::{ChainConfig, ChainId};

// common types
pub use crate::{
    denom::{ibc_denom, ChannelHop},
    error::{
        AttributeNotFound, EventNotFound, InvalidPathError, LookoutError, TimeoutError,
    },
    events::{TxAttribute, TxEvent, TxEvents, TxLogEntry},
    ibc_types::{ChannelState, ConnectionState, IbcChannelId, IbcConnectionId, IbcPortId},
    querier::{QueryClient, QueryRequest, RetryPolicy},
    readiness::{
        wait_blocks, wait_for_channel_open, wait_for_connection_open, wait_until_block_height,
        Observed, PollPolicy, StateSource, DEFAULT_POLL_INTERVAL,
    },
};
