//! Data models for the KYC pipeline.

pub mod config;
pub mod record;
