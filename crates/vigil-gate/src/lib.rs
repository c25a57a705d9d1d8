//! Identity and consent admission gate.
//!
//! `vigil-gate` decides whether an operator may use a gated tool, based on
//! two hand-written declaration files: an identity declaration and a
//! consent declaration.
//!
//! The pipeline has two stages:
//! 1. **Parse**: permissive `key: value` extraction ([`document`])
//! 2. **Verify**: strict per-field and cross-document rules, with every
//!    violation collected into one ordered [`AdmissionResult`] ([`verify`])

pub mod config;
pub mod document;
pub mod error;
pub mod finding;
pub mod gate;
pub mod policy;
pub mod summary;
pub mod verify;

// Re-export primary types for convenience.
pub use config::GateConfig;
pub use document::{AttestationDocument, DocumentKind, Field};
pub use error::{ConfigError, DocumentError};
pub use finding::{AcceptedField, AdmissionResult, Finding, FindingKind, Rejection, Severity, Subject};
pub use gate::{Admission, Gate, GateRequest};
pub use policy::GatePolicy;
pub use verify::Verifier;
