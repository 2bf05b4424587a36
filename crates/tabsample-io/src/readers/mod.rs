//! Streaming record readers over downloaded object bodies.

pub mod delimited;
