use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{
    error::InvalidPathError,
    ibc_types::{IbcChannelId, IbcPortId},
};

/// One hop of an IBC transfer path, in traversal order
/// (source chain first).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelHop {
    pub port_id: IbcPortId,
    pub channel_id: IbcChannelId,
}

impl ChannelHop {
    pub fn new(port_id: impl ToString, channel_id: impl ToString) -> Self {
        Self {
            port_id: IbcPortId::new(port_id),
            channel_id: IbcChannelId::new(channel_id),
        }
    }
}

/// Derives the voucher denom a chain assigns to a token that reached it
/// over `path`.
///
/// The result is used as a literal store lookup key on the destination
/// chain, so the trace string and its rendering have to match the SDK's
/// `DenomTrace.IBCDenom()` byte for byte: `port/channel` pairs joined in
/// path order, then the base denom, SHA-256'd and rendered as uppercase
/// hex behind an `ibc/` prefix.
///
/// An empty path is the native denom, returned unchanged.
pub fn ibc_denom(path: &[ChannelHop], base_denom: &str) -> Result<String, InvalidPathError> {
    if path.is_empty() {
        return Ok(base_denom.to_string());
    }

    let mut trace = String::new();
    for (index, hop) in path.iter().enumerate() {
        if hop.port_id.as_str().is_empty() {
            return Err(InvalidPathError::EmptyPortId { index });
        }
        if hop.channel_id.as_str().is_empty() {
            return Err(InvalidPathError::EmptyChannelId { index });
        }
        trace.push_str(hop.port_id.as_str());
        trace.push('/');
        trace.push_str(hop.channel_id.as_str());
        trace.push('/');
    }
    trace.push_str(base_denom);

    let digest = Sha256::digest(trace.as_bytes());

    Ok(format!("ibc/{}", hex::encode_upper(digest)))
}
