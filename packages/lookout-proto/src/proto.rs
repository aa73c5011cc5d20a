// Only the SDK namespaces this toolkit actually queries are aliased here.
// Everything is re-exported under one short module per concern so the rest
// of the workspace never has to remember which upstream crate a type
// lives in.

/// Tendermint service (blocks, node info) plus the event types that
/// appear on transaction results.
pub mod tendermint {
    pub use cosmos_sdk_proto::cosmos::base::tendermint::v1beta1::*;
    pub use cosmos_sdk_proto::tendermint::abci::{Event, EventAttribute};
}

/// Balances.
pub mod bank {
    pub use cosmos_sdk_proto::cosmos::bank::v1beta1::*;
}

/// Application BlockChain Interface (ABCI) result types, including the
/// per-message transaction logs.
pub mod abci {
    pub use cosmos_sdk_proto::cosmos::base::abci::v1beta1::*;
}

/// Transaction lookup service.
pub mod tx {
    pub use cosmos_sdk_proto::cosmos::tx::v1beta1::*;
}

/// IBC core handshake state.
pub mod ibc {
    pub use ibc_proto::ibc::core::channel::v1 as channel;
    pub use ibc_proto::ibc::core::connection::v1 as connection;
}
