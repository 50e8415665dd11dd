use crate::field::FieldParams;

use super::types::{FriError, FriOptions};

/// Public parameters shared by prover and verifier.
///
/// Derived identically on both sides from the public statement, so any
/// disagreement about the folding schedule is impossible by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FriParameters {
    /// Size `n` of the initial evaluation domain.
    pub domain_size: usize,
    /// Exclusive degree bound of the committed polynomial.
    pub degree_bound: usize,
    /// Number of query repetitions `Q`.
    pub query_count: usize,
    /// Size of the last committed layer.
    pub final_layer_size: usize,
    /// Number of fold rounds `R = log2(n) - log2(final_layer_size)`.
    pub rounds: usize,
}

/// Degree bound the fold schedule can test exactly: `max(degree_bound, 1)`,
/// which must be a power of two strictly below `domain_size`.
pub(crate) fn tested_degree_bound(domain_size: usize, degree_bound: usize) -> Result<usize, FriError> {
    let bound = degree_bound.max(1);
    if !bound.is_power_of_two() || bound >= domain_size {
        return Err(FriError::DegreeTooLarge {
            degree_bound,
            domain_size,
            rounds: 0,
        });
    }
    Ok(bound)
}

impl FriParameters {
    /// Validates the statement and fixes the folding schedule.
    pub fn derive<P: FieldParams>(
        domain_size: usize,
        degree_bound: usize,
        query_count: usize,
        options: &FriOptions,
    ) -> Result<Self, FriError> {
        if domain_size == 0
            || !domain_size.is_power_of_two()
            || domain_size.trailing_zeros() > P::TWO_ADICITY
        {
            return Err(FriError::InvalidDomainSize { size: domain_size });
        }
        if query_count == 0 {
            return Err(FriError::InvalidQueryCount);
        }

        let folded = tested_degree_bound(domain_size, degree_bound)?;

        let final_layer_size = match options.final_layer_size {
            Some(size) => {
                if size == 0 || !size.is_power_of_two() || size > domain_size {
                    return Err(FriError::InvalidDomainSize { size });
                }
                size
            }
            None => domain_size / folded,
        };
        let rounds = (domain_size.trailing_zeros() - final_layer_size.trailing_zeros()) as usize;
        // The final layer is a constant, so the schedule only tests the bound
        // when exactly log2(bound) folds are run.
        if folded != 1usize << rounds {
            return Err(FriError::DegreeTooLarge {
                degree_bound,
                domain_size,
                rounds,
            });
        }

        Ok(Self {
            domain_size,
            degree_bound,
            query_count,
            final_layer_size,
            rounds,
        })
    }

    /// Size of layer `index`.
    pub fn layer_size(&self, index: usize) -> usize {
        self.domain_size >> index
    }

    /// Canonical encoding of the public statement absorbed first into the
    /// transcript.
    pub fn instance_bytes<P: FieldParams>(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(5 * 8);
        for word in [
            P::MODULUS,
            self.domain_size as u64,
            self.degree_bound as u64,
            self.query_count as u64,
            self.final_layer_size as u64,
        ] {
            out.extend_from_slice(&word.to_be_bytes());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Goldilocks, F97};

    #[test]
    fn small_field_scenario_folds_twice() {
        let params = FriParameters::derive::<F97>(8, 4, 4, &FriOptions::default()).expect("params");
        assert_eq!(params.final_layer_size, 2);
        assert_eq!(params.rounds, 2);
        assert_eq!(params.layer_size(1), 4);
    }

    #[test]
    fn explicit_final_layer_size() {
        let params =
            FriParameters::derive::<Goldilocks>(64, 16, 8, &FriOptions::with_final_layer_size(4))
                .expect("params");
        assert_eq!(params.rounds, 4);
        assert_eq!(
            params,
            FriParameters::derive::<Goldilocks>(64, 16, 8, &FriOptions::default()).expect("params")
        );

        // Folding past the bound would only test `deg < 16`.
        assert_eq!(
            FriParameters::derive::<Goldilocks>(64, 4, 8, &FriOptions::with_final_layer_size(4)),
            Err(FriError::DegreeTooLarge {
                degree_bound: 4,
                domain_size: 64,
                rounds: 4
            })
        );

        assert_eq!(
            FriParameters::derive::<Goldilocks>(64, 32, 8, &FriOptions::with_final_layer_size(8)),
            Err(FriError::DegreeTooLarge {
                degree_bound: 32,
                domain_size: 64,
                rounds: 3
            })
        );
        assert_eq!(
            FriParameters::derive::<Goldilocks>(64, 4, 8, &FriOptions::with_final_layer_size(3)),
            Err(FriError::InvalidDomainSize { size: 3 })
        );
    }

    #[test]
    fn rejects_invalid_statements() {
        let options = FriOptions::default();
        assert_eq!(
            FriParameters::derive::<F97>(12, 4, 4, &options),
            Err(FriError::InvalidDomainSize { size: 12 })
        );
        assert_eq!(
            FriParameters::derive::<F97>(64, 4, 4, &options),
            Err(FriError::InvalidDomainSize { size: 64 })
        );
        assert_eq!(
            FriParameters::derive::<F97>(8, 4, 0, &options),
            Err(FriError::InvalidQueryCount)
        );
        assert!(matches!(
            FriParameters::derive::<F97>(8, 8, 4, &options),
            Err(FriError::DegreeTooLarge { .. })
        ));
        assert!(matches!(
            FriParameters::derive::<F97>(8, 5, 4, &options),
            Err(FriError::DegreeTooLarge { .. })
        ));
    }

    #[test]
    fn degree_bounds_must_be_powers_of_two() {
        let options = FriOptions::default();
        for degree_bound in [3, 5, 9, 12, 33] {
            assert_eq!(
                FriParameters::derive::<Goldilocks>(128, degree_bound, 8, &options),
                Err(FriError::DegreeTooLarge {
                    degree_bound,
                    domain_size: 128,
                    rounds: 0
                })
            );
        }
        for degree_bound in [0, 1, 2, 4, 64] {
            let params =
                FriParameters::derive::<Goldilocks>(128, degree_bound, 8, &options).expect("params");
            assert_eq!(1usize << params.rounds, degree_bound.max(1));
        }
    }

    #[test]
    fn zero_degree_bound_cannot_fold() {
        assert!(matches!(
            FriParameters::derive::<F97>(8, 0, 2, &FriOptions::with_final_layer_size(4)),
            Err(FriError::DegreeTooLarge { rounds: 1, .. })
        ));
    }

    #[test]
    fn zero_degree_bound_folds_to_single_point() {
        let params = FriParameters::derive::<F97>(8, 0, 2, &FriOptions::default()).expect("params");
        assert_eq!(params.final_layer_size, 8);
        assert_eq!(params.rounds, 0);
    }
}
