//! Non-interactive FRI polynomial commitment scheme.
//!
//! The crate is organised bottom-up:
//!
//! * [`field`] – prime field arithmetic and dense polynomials.
//! * [`fft`] – radix-2 evaluation and interpolation over two-adic subgroups.
//! * [`hash`] – the hash back-ends everything else is generic over.
//! * [`merkle`] – binary Merkle commitments to vectors of field elements.
//! * [`transcript`] – the Fiat-Shamir transcript with phase checking.
//! * [`fri`] – prover, verifier, proof format and parameter derivation.
//! * [`ser`] – canonical big-endian proof encoding.
//! * [`config`] – serde configuration and named profiles.
//!
//! The common path is covered by [`prove`] and [`verify`]:
//!
//! ```
//! use fri_pcs::fft::EvaluationDomain;
//! use fri_pcs::field::{Polynomial, F97};
//!
//! let domain = EvaluationDomain::<F97>::new(8)?;
//! let evaluations = Polynomial::<F97>::from_u64s(&[3, 5, 2, 1]).evaluate_over(&domain)?;
//! let proof = fri_pcs::prove(&evaluations, &domain, 4, 4)?;
//! assert!(fri_pcs::verify(&proof, 8, 4, 4)?.is_accept());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod fft;
pub mod field;
pub mod fri;
pub mod hash;
pub mod merkle;
pub mod ser;
pub mod transcript;
pub mod utils;

pub use config::{ConfigError, FriConfig};
pub use field::{FieldElement, Fp};
pub use fri::{prove, verify, FriError, FriProof, FriProver, FriVerifier, Verdict};
