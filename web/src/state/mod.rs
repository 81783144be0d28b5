//! Reactive state shared between components

pub mod connection;
pub mod wallet;
