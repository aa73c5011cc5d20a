pub mod denom;
pub mod error;
pub mod events;
pub mod ibc_types;
pub mod network;
pub mod prelude;
pub mod querier;
pub mod readiness;
