//! node process runner for `vue-template-compiler`.
//!
//! A [`NodeWorker`] keeps one node process alive and implements
//! [`vue_injector::Toolchain`] over a line-delimited JSON protocol. The
//! compiler packages are resolved from the workspace the worker runs in.

mod error;
mod protocol;
mod runner;
mod worker;

pub use error::NodeError;
pub use runner::NodeRunner;
pub use worker::NodeWorker;
