//! Observability for the PERT engine.
//! `tracing` with an `EnvFilter` read from `PERT_LOG`.

pub mod events;
pub mod setup;

pub use setup::init_tracing;
