pub use lookout_config::{ChainConfig, ChainId, LookoutConfigError};
pub use lookout_core::prelude::*;
