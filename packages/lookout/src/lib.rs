pub mod prelude;

pub use lookout_core::{
    // listed manually so we can exclude the core prelude (re-exported in the
    // prelude module here, along with config) and not confuse ide's with
    // multiple preludes
    denom,
    error,
    events,
    ibc_types,
    network,
    querier,
    readiness,
};

// in case anyone wants to use the protobufs directly
pub mod proto {
    pub use lookout_proto::*;
}
