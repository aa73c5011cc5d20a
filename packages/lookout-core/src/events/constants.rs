// bank/staking events: https://github.com/cosmos/cosmos-sdk/blob/main/x/bank/types/events.go
// and x/staking/types/events.go

// event types
pub const EVENT_TYPE_COIN_SPENT: &str = "coin_spent";
pub const EVENT_TYPE_COIN_RECEIVED: &str = "coin_received";
pub const EVENT_TYPE_STAKING_DELEGATE: &str = "delegate";
pub const EVENT_TYPE_STAKING_UNBOND: &str = "unbond";
pub const EVENT_TYPE_CONTRACT_STORE_CODE: &str = "store_code";
pub const EVENT_TYPE_CONTRACT_INSTANTIATE: &str = "instantiate";

// event attribute keys
pub const EVENT_ATTR_SPENDER: &str = "spender";
pub const EVENT_ATTR_RECEIVER: &str = "receiver";
pub const EVENT_ATTR_AMOUNT: &str = "amount";
pub const EVENT_ATTR_VALIDATOR: &str = "validator";
pub const EVENT_ATTR_STORE_CODE_ID: &str = "code_id";
pub const EVENT_ATTR_INSTANTIATE_CONTRACT_ADDRESS_V1: &str = "_contract_address";
pub const EVENT_ATTR_INSTANTIATE_CONTRACT_ADDRESS_V2: &str = "contract_address";

// SDK >= 0.50 stamps this on every event in the flat tx-result list;
// it's the only message-boundary information left there
pub const EVENT_ATTR_MSG_INDEX: &str = "msg_index";
