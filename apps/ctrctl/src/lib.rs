//! # ctrctl
//!
//! Library half of the ctrctl binary: everything the CLI needs that touches
//! the outside world, kept here so integration tests can drive it.
//!
//! - `config` - layered configuration (defaults, TOML, environment, flags)
//! - `probe` - the gateway contract and its HTTP implementation
//! - `host` - local host fact detection
//! - `builder` - concurrent, deadline-bound status report building
//! - `render` - text and JSON output

pub mod builder;
pub mod config;
pub mod host;
pub mod probe;
pub mod render;
