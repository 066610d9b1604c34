//! bingwall-infra: OS adapters (xrandr/xfconf session, HTTP, image cache) and the run pipeline.

pub mod archive;
pub mod cache;
pub mod config;
pub mod http;
pub mod pipeline;
pub mod process_runner;
pub mod xfce;

#[cfg(test)]
mod test_support;
