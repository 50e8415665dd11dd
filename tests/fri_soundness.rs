//! Empirical rejection rates for inputs far from any low-degree polynomial.

use fri_pcs::fft::EvaluationDomain;
use fri_pcs::field::{FieldElement, Goldilocks, Polynomial};
use fri_pcs::fri::{self, Verdict};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DOMAIN_SIZE: usize = 64;
const DEGREE_BOUND: usize = 8;
const TRIALS: usize = 40;

fn random_vector(rng: &mut StdRng) -> Vec<FieldElement> {
    (0..DOMAIN_SIZE).map(|_| FieldElement::new(rng.gen())).collect()
}

/// Low-degree codeword with `corrupted` positions overwritten by noise.
fn perturbed_codeword(rng: &mut StdRng, domain: &EvaluationDomain<Goldilocks>, corrupted: usize) -> Vec<FieldElement> {
    let coefficients = (0..DEGREE_BOUND).map(|_| FieldElement::new(rng.gen())).collect();
    let mut evaluations = Polynomial::new(coefficients)
        .evaluate_over(domain)
        .expect("evaluations");
    for _ in 0..corrupted {
        let position = rng.gen_range(0..DOMAIN_SIZE);
        evaluations[position] += FieldElement::new(rng.gen_range(1..u64::MAX));
    }
    evaluations
}

fn rejections(inputs: &[Vec<FieldElement>], domain: &EvaluationDomain<Goldilocks>, queries: usize) -> usize {
    inputs
        .iter()
        .filter(|evaluations| {
            let proof = fri::prove(evaluations.as_slice(), domain, DEGREE_BOUND, queries).expect("proof");
            fri::verify(&proof, DOMAIN_SIZE, DEGREE_BOUND, queries).expect("verify") == Verdict::Reject
        })
        .count()
}

#[test]
fn random_functions_are_rejected_geometrically_in_queries() {
    let domain = EvaluationDomain::<Goldilocks>::new(DOMAIN_SIZE).expect("domain");
    let mut rng = StdRng::seed_from_u64(0xf41_50d);
    let inputs: Vec<_> = (0..TRIALS).map(|_| random_vector(&mut rng)).collect();

    // A random function folds to a random final layer of 8 entries; each
    // query survives with probability about 1/8.
    let single = rejections(&inputs, &domain, 1);
    let double = rejections(&inputs, &domain, 2);
    let many = rejections(&inputs, &domain, 8);

    assert!(single >= TRIALS * 6 / 10, "Q=1 rejected {single}/{TRIALS}");
    assert!(double >= TRIALS * 8 / 10, "Q=2 rejected {double}/{TRIALS}");
    assert!(many >= TRIALS - 1, "Q=8 rejected {many}/{TRIALS}");
}

#[test]
fn heavily_perturbed_codewords_are_rejected() {
    let domain = EvaluationDomain::<Goldilocks>::new(DOMAIN_SIZE).expect("domain");
    let mut rng = StdRng::seed_from_u64(0xc0de);
    let inputs: Vec<_> = (0..TRIALS)
        .map(|_| perturbed_codeword(&mut rng, &domain, DOMAIN_SIZE / 2))
        .collect();
    let rejected = rejections(&inputs, &domain, 16);
    assert!(rejected >= TRIALS - 2, "rejected {rejected}/{TRIALS}");
}

#[test]
fn unperturbed_codewords_always_accept() {
    let domain = EvaluationDomain::<Goldilocks>::new(DOMAIN_SIZE).expect("domain");
    let mut rng = StdRng::seed_from_u64(7);
    let inputs: Vec<_> = (0..8).map(|_| perturbed_codeword(&mut rng, &domain, 0)).collect();
    assert_eq!(rejections(&inputs, &domain, 16), 0);
}
