//! # spellgate-server
//!
//! HTTP front end for a single, non-reentrant spelling engine.
//!
//! - [`gate`]: first-come-first-served exclusive access to the engine
//! - [`checker`]: tokenize a request and classify every segment under one lease
//! - [`handlers`]: request validation and response encoding
//! - [`server`]: router, listener and shutdown
//! - [`config`], [`telemetry`]: environment configuration and logging

pub mod checker;
pub mod config;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod server;
pub mod telemetry;

pub use checker::{CheckError, SpellChecker};
pub use config::ServerConfig;
pub use error::ApiError;
pub use gate::{EngineGate, EngineLease};
pub use server::SpellServer;
