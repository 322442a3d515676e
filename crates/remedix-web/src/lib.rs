//! remedix-web — HTTP front for the Remedix services.
//! Provides:
//!   - Plastic identification from spectral bands, with a per-sample report
//!   - Microbe recommendation for a plastic type
//!   - Degradation progress monitoring
//!   - Health / readiness status

pub mod config;
pub mod handlers;
pub mod report;
pub mod router;
pub mod state;
