//! hellok8s
//!
//! Creates the `hellok8s` Pod through the dynamic (untyped) Kubernetes API,
//! waits for the operator to press Return, then lists Pods matching a label
//! selector and prints their names.

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod manifest;
pub mod prompt;

pub use app::run;
pub use client::{ClusterClient, DynamicResourceClient, GroupVersionResource};
pub use error::{Error, Result};
