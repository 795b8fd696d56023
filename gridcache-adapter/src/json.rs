use alloc::string::{String, ToString};

use gridcache::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Inbound, Outbound};

/// Decodes one inbound JSON frame.
///
/// Anything that does not match the [`Inbound`] shape (unknown `type`, `items` that is not an
/// array of items, wrong field types) is reported as [`Error::MalformedPayload`].
pub fn decode_inbound<K, T>(frame: &str) -> Result<Inbound<K, T>>
where
    K: DeserializeOwned,
    T: DeserializeOwned,
{
    serde_json::from_str(frame).map_err(|err| {
        #[cfg(feature = "tracing")]
        tracing::warn!(target: "gridcache_adapter", error = %err, "decode_inbound: malformed frame");
        Error::malformed(err.to_string())
    })
}

pub fn encode_outbound<K: Serialize>(message: &Outbound<K>) -> Result<String> {
    serde_json::to_string(message).map_err(|err| Error::malformed(err.to_string()))
}
