//! slsgen core library — parameter model, defaults, errors.
//!
//! Public API surface:
//! - [`config`] — newtypes, [`RawParams`], [`GeneratorConfig`], default constants
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;

pub use config::{
    AppId, DatabaseConfig, GeneratorConfig, RawParams, Runtime, DEFAULT_OUTPUT_PATH,
    DEFAULT_RUNTIME, LEGACY_RUNTIME,
};
pub use error::ConfigError;
