//! Transient presentation state: what the user is looking at, not what the devices are.

pub mod filter;
pub mod selection;
