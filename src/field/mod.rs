//! Field arithmetic primitives for the FRI commitment scheme.
//! Contains the prime field implementation and dense polynomial utilities.

pub mod polynomial;
pub mod prime_field;

pub use polynomial::Polynomial;
pub use prime_field::{FieldError, FieldParams, Fp, Goldilocks, F97};

/// Field element over the default Goldilocks prime.
pub type FieldElement = Fp<Goldilocks>;
