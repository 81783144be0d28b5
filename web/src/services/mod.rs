//! Wallet services: event bus, provider bridge, node calls

pub mod events;
pub mod rpc;
pub mod wallet;
