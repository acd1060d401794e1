//! Built-in capture backends.

use crate::*;

pub mod convert;
pub mod files;
pub mod pvn;
pub mod thread;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use convert::{ConvertConfig, ConvertVideo};
pub use files::{FilesConfig, FilesVideo};
pub use pvn::{PvnConfig, PvnVideo};
pub use test::{TestConfig, TestVideo};
pub use thread::{ThreadConfig, ThreadVideo};

#[cfg(feature = "v4l2")]
pub use v4l2::{V4l2Config, V4l2Video};

pub(crate) fn register_builtin(registry: &mut SourceRegistry) {
    registry
        .register_terminal("test", |uri| {
            Ok(Box::new(TestVideo::new(TestConfig::from_uri(uri)?)?))
        })
        .register_terminal("files", |uri| {
            Ok(Box::new(FilesVideo::new(FilesConfig::from_uri(uri)?)?))
        })
        .register_terminal("pvn", |uri| {
            Ok(Box::new(PvnVideo::new(PvnConfig::from_uri(uri)?)?))
        })
        .register_compositional("convert", |uri, inner| {
            Ok(Box::new(ConvertVideo::new(inner, ConvertConfig::from_uri(uri)?)?))
        })
        .register_compositional("thread", |uri, inner| {
            Ok(Box::new(ThreadVideo::new(inner, ThreadConfig::from_uri(uri)?)))
        });

    #[cfg(feature = "v4l2")]
    registry.register_terminal("v4l", |uri| {
        Ok(Box::new(V4l2Video::new(V4l2Config::from_uri(uri)?)?))
    });
}
