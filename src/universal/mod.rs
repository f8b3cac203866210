pub mod attestation;
pub mod bridge;
pub mod fees;
pub mod guard;
pub mod latency;
pub mod metrics;
pub mod mev;
pub mod models;
