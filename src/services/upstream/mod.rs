pub mod client;
pub mod http;

pub use client::{Forwarder, UpstreamError, UpstreamResult};
pub use http::HttpForwarder;
