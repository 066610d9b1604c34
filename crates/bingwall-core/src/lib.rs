//! bingwall-core: pipeline logic independent of the OS (archive codec, topology, apply).

pub mod apply;
pub mod archive;
pub mod desktop;
pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod fake;
pub mod model;
pub mod resolution;
pub mod settings;
pub mod topology;
pub mod xrandr;
