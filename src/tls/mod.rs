//! TLS certificate management with auto-generation.
//!
//! This module provides automatic local certificate generation similar to Caddy/mkcert,
//! allowing HTTPS to work locally without manual certificate setup.

mod bootstrap;
mod provider;
mod trust;

pub use bootstrap::{ensure_material, material_status, remove_material, MaterialStatus};
pub use provider::{CertProvider, CertSubject, RcgenProvider};
pub use trust::print_trust_instructions;
