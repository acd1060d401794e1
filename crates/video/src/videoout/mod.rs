//! Built-in recording backends.

use crate::*;

pub mod null;
pub mod pvn;

pub use null::{NullConfig, NullSink, NullStream};
pub use pvn::{PvnSink, PvnSinkConfig, PvnStream};

pub(crate) fn register_builtin(registry: &mut SinkRegistry) {
    registry
        .register_terminal("null", |uri| {
            Ok(Box::new(NullSink::new(NullConfig::from_uri(uri)?)?))
        })
        .register_terminal("pvn", |uri| {
            Ok(Box::new(PvnSink::new(PvnSinkConfig::from_uri(uri)?)?))
        });
}
