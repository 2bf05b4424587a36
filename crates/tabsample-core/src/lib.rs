#![forbid(unsafe_code)]
//! tabsample-core: schema types, datasource configuration, and hashing.
//!
//! Everything here is pure data. Object storage and record parsing live in
//! `tabsample-io`; the sampling engine lives in `tabsample-sampler`.

pub mod config;
pub mod datasource;
pub mod error;
pub mod hash;
pub mod prelude;
pub mod schema;
