use std::{
    collections::HashMap,
    sync::{LazyLock, Mutex},
};

use tonic::transport::{Channel, ClientTlsConfig};

use crate::prelude::*;

static GRPC_CHANNEL_CACHE: LazyLock<GrpcChannelCache> = LazyLock::new(GrpcChannelCache::new);

// internal cache so probing the same chain from many scenarios doesn't
// open a connection per probe
struct GrpcChannelCache {
    channels: Mutex<HashMap<String, Channel>>,
}

impl GrpcChannelCache {
    fn new() -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
        }
    }
}

pub fn get_grpc_channel(config: &ChainConfig) -> Result<Channel> {
    let channel = {
        // give the lock its own scope so it's dropped before any await
        let lock = GRPC_CHANNEL_CACHE.channels.lock().unwrap();
        lock.get(&config.grpc_endpoint).cloned()
    };

    match channel {
        Some(channel) => Ok(channel),
        None => {
            let endpoint_uri = config.grpc_endpoint.parse::<tonic::transport::Uri>()?;

            let endpoint = tonic::transport::Endpoint::new(endpoint_uri)
                .map_err(|err| anyhow!("{}", err))?
                .tls_config(ClientTlsConfig::new().with_enabled_roots())?;

            // lazy: readiness probes start polling before the chain's
            // endpoint exists, so connection failures must surface per-query
            let channel = endpoint.connect_lazy();

            GRPC_CHANNEL_CACHE
                .channels
                .lock()
                .unwrap()
                .insert(config.grpc_endpoint.clone(), channel.clone());

            Ok(channel)
        }
    }
}
