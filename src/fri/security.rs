//! Query-count and security-level estimates.
//!
//! Uses the conjectured list-decoding bound: every query contributes
//! `log2(1/ρ)` bits, where the rate `ρ` is the folded degree bound over the
//! domain size.  Both are powers of two, so `log2(1/ρ)` is an integer.
//! Degree bounds are validated exactly as [`super::FriParameters::derive`]
//! validates them.

use crate::field::FieldParams;

use super::params::tested_degree_bound;
use super::types::FriError;

/// `log2(domain_size / max(degree_bound, 1))`.
fn log_blowup(domain_size: usize, degree_bound: usize) -> Result<u32, FriError> {
    if domain_size == 0 || !domain_size.is_power_of_two() {
        return Err(FriError::InvalidDomainSize { size: domain_size });
    }
    let bound = tested_degree_bound(domain_size, degree_bound)?;
    Ok(domain_size.trailing_zeros() - bound.trailing_zeros())
}

/// Conjectured bits of security of `query_count` queries, capped by the size
/// of the field.
pub fn estimate_security_bits<P: FieldParams>(
    domain_size: usize,
    degree_bound: usize,
    query_count: usize,
) -> Result<u32, FriError> {
    let per_query = log_blowup(domain_size, degree_bound)?;
    let field_bits = u64::BITS - 1 - P::MODULUS.leading_zeros();
    let total = (query_count as u64).saturating_mul(u64::from(per_query));
    Ok(total.min(u64::from(field_bits)) as u32)
}

/// Smallest query count reaching `security_bits`, capped at
/// `domain_size - 1`.
pub fn queries_for_security(
    security_bits: u32,
    domain_size: usize,
    degree_bound: usize,
) -> Result<usize, FriError> {
    let per_query = log_blowup(domain_size, degree_bound)?;
    let queries = security_bits.div_ceil(per_query).max(1) as usize;
    Ok(queries.min(domain_size - 1))
}
