//! SSM Parameter Store adapter

pub mod client;

pub use client::SsmParameterStore;
