// src/core/mod.rs
//! Shared services: configuration, the LLM gateway client and request fencing

pub mod config_manager;
pub mod gateway_client;
pub mod sequencer;

pub use config_manager::{ConfigManager, GatewayConfig};
pub use gateway_client::{CompletionBackend, GatewayClient, GatewayError};
pub use sequencer::{RequestSequencer, RequestTicket};
