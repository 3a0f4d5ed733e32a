//! # Capability Module
//!
//! - `table` - the static capability catalog
//! - `mask` - the 64-bit capability bitmap
//! - `resolver` - add/drop directive resolution
//! - `status` - `/proc/<pid>/status` bitmap and seccomp mode parsing

mod mask;
mod resolver;
mod status;
mod table;

pub use mask::CapabilityMask;
pub use resolver::{CapAction, CapDirective, CapTarget, resolve, resolve_named};
pub use status::{CapabilitySets, SeccompMode, parse_effective, parse_seccomp_mode, parse_status};
pub use table::{CAPABILITIES, Capability};
