//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (state, tx_hash, sender)
//!
//! Consumers:
//!     → stderr/stdout via tracing-subscriber (pretty or JSON)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Secrets (private key, signed bytes) are never recorded

pub mod logging;
