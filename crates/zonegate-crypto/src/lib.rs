//! Pluggable crypto algebra for encrypting TSIG key material at rest.
//!
//! This crate is a pure leaf in the zonegate dependency graph: it has no
//! dependency on the authentication or zone-domain crates, only on
//! [`zonegate_core`] for the shared infrastructural error type.
//!
//! # Modules
//!
//! - [`algebra`] — the [`CryptoAlgebra`] trait and [`NoopCryptoAlgebra`]
//! - [`aesgcm`] — [`AesGcmCryptoAlgebra`], a production-grade implementation
//! - [`selection`] — [`CryptoSelection`], the configuration-driven factory
//! - [`error`] — [`CryptoError`]

mod aesgcm;
mod algebra;
mod error;
mod selection;

pub use aesgcm::AesGcmCryptoAlgebra;
pub use algebra::{CryptoAlgebra, NoopCryptoAlgebra};
pub use error::CryptoError;
pub use selection::CryptoSelection;
