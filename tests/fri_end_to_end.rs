use std::sync::atomic::AtomicBool;

use fri_pcs::fft::EvaluationDomain;
use fri_pcs::field::{FieldElement, Fp, Goldilocks, Polynomial, F97};
use fri_pcs::fri::{self, FriError, FriOptions, FriProof, FriProver, FriVerifier, Verdict};
use fri_pcs::hash::{Blake2s, Blake3};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

const SCENARIO_QUERIES: usize = 4;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn scenario_domain() -> EvaluationDomain<F97> {
    EvaluationDomain::new(8).expect("domain")
}

/// Evaluations of `3 + 5x + 2x^2 + x^3` over the 8th roots of unity mod 97.
fn scenario_evaluations() -> Vec<Fp<F97>> {
    Polynomial::<F97>::from_u64s(&[3, 5, 2, 1])
        .evaluate_over(&scenario_domain())
        .expect("evaluations")
}

fn goldilocks_evaluations(domain: &EvaluationDomain<Goldilocks>, degree_bound: usize, seed: u64) -> Vec<FieldElement> {
    let mut rng = StdRng::seed_from_u64(seed);
    let coefficients: Vec<FieldElement> = (0..degree_bound)
        .map(|_| FieldElement::new(rng.gen()))
        .collect();
    Polynomial::new(coefficients)
        .evaluate_over(domain)
        .expect("evaluations")
}

#[test]
fn small_field_scenario_accepts() {
    init_tracing();
    let domain = scenario_domain();
    let proof = fri::prove(&scenario_evaluations(), &domain, 4, SCENARIO_QUERIES).expect("proof");

    assert_eq!(proof.roots.len(), 3, "layers of size 8, 4 and 2");
    assert_eq!(proof.queries.len(), SCENARIO_QUERIES);
    assert!(proof.queries.iter().all(|query| query.layers.len() == 3));
    assert_eq!(
        fri::verify(&proof, 8, 4, SCENARIO_QUERIES).expect("verify"),
        Verdict::Accept
    );
}

// Corrupts committed evaluations: a corrupted coefficient would still be a
// low-degree polynomial and rightly verify.
#[test]
fn small_field_scenario_rejects_corrupted_evaluations() {
    init_tracing();
    let domain = scenario_domain();
    let mut rng = StdRng::seed_from_u64(0x5eed_f41);
    let trials = 20;
    let mut rejected = 0;
    for _ in 0..trials {
        let mut evaluations = scenario_evaluations();
        let position = rng.gen_range(0..evaluations.len());
        evaluations[position] += Fp::new(rng.gen_range(1..97));

        let proof = fri::prove(&evaluations, &domain, 4, SCENARIO_QUERIES).expect("proof");
        if fri::verify(&proof, 8, 4, SCENARIO_QUERIES).expect("verify") == Verdict::Reject {
            rejected += 1;
        }
    }
    assert!(rejected >= trials / 2, "only {rejected} of {trials} corrupted proofs rejected");
}

#[test]
fn proving_is_deterministic() {
    let domain = scenario_domain();
    let first = fri::prove(&scenario_evaluations(), &domain, 4, SCENARIO_QUERIES).expect("proof");
    let second = fri::prove(&scenario_evaluations(), &domain, 4, SCENARIO_QUERIES).expect("proof");
    assert_eq!(first, second);
    assert_eq!(first.to_bytes().expect("bytes"), second.to_bytes().expect("bytes"));
}

#[test]
fn verification_is_repeatable() {
    let domain = scenario_domain();
    let proof = fri::prove(&scenario_evaluations(), &domain, 4, SCENARIO_QUERIES).expect("proof");
    for _ in 0..3 {
        assert!(fri::verify(&proof, 8, 4, SCENARIO_QUERIES).expect("verify").is_accept());
    }
}

#[test]
fn tampered_final_value_rejects() {
    let domain = scenario_domain();
    let mut proof = fri::prove(&scenario_evaluations(), &domain, 4, SCENARIO_QUERIES).expect("proof");
    proof.final_value += Fp::ONE;
    assert_eq!(
        fri::verify(&proof, 8, 4, SCENARIO_QUERIES).expect("verify"),
        Verdict::Reject
    );
}

#[test]
fn tampered_root_rejects() {
    let domain = EvaluationDomain::<Goldilocks>::new(256).expect("domain");
    let evaluations = goldilocks_evaluations(&domain, 32, 1);
    let mut proof = fri::prove(&evaluations, &domain, 32, 16).expect("proof");
    let mut bytes = proof.roots[1].into_bytes();
    bytes[0] ^= 1;
    proof.roots[1] = bytes.into();
    assert_eq!(fri::verify(&proof, 256, 32, 16).expect("verify"), Verdict::Reject);
}

#[test]
fn tampered_opening_rejects() {
    let domain = EvaluationDomain::<Goldilocks>::new(256).expect("domain");
    let evaluations = goldilocks_evaluations(&domain, 32, 2);
    let proof = fri::prove(&evaluations, &domain, 32, 16).expect("proof");

    for layer in 0..proof.layer_count() {
        let mut tampered = proof.clone();
        tampered.queries[3].layers[layer].value += FieldElement::ONE;
        assert_eq!(
            fri::verify(&tampered, 256, 32, 16).expect("verify"),
            Verdict::Reject,
            "layer {layer}"
        );
    }
}

#[test]
fn mismatched_statement_rejects() {
    let domain = EvaluationDomain::<Goldilocks>::new(128).expect("domain");
    let evaluations = goldilocks_evaluations(&domain, 16, 3);
    let proof = fri::prove(&evaluations, &domain, 16, 8).expect("proof");
    assert!(fri::verify(&proof, 128, 16, 8).expect("verify").is_accept());
    assert!(matches!(
        fri::verify(&proof, 128, 9, 8),
        Err(FriError::DegreeTooLarge { degree_bound: 9, .. })
    ));
    assert_eq!(
        fri::verify(&proof, 128, 16, 9),
        Err(FriError::MalformedProof("query-count"))
    );
    assert_eq!(
        fri::verify(&proof, 128, 32, 8),
        Err(FriError::MalformedProof("root-count"))
    );
    assert_eq!(
        fri::verify(&proof, 256, 16, 8),
        Err(FriError::MalformedProof("domain-size"))
    );
}

#[test]
fn high_degree_input_rejects() {
    let domain = EvaluationDomain::<Goldilocks>::new(256).expect("domain");
    let evaluations = goldilocks_evaluations(&domain, 256, 4);
    let proof = fri::prove(&evaluations, &domain, 16, 32).expect("proof");
    assert_eq!(fri::verify(&proof, 256, 16, 32).expect("verify"), Verdict::Reject);
}

#[test]
fn non_power_of_two_degree_bounds_are_refused() {
    let domain = EvaluationDomain::<Goldilocks>::new(128).expect("domain");
    let coefficients: Vec<u64> = (1..=16).collect();
    let evaluations = Polynomial::<Goldilocks>::from_u64s(&coefficients)
        .evaluate_over(&domain)
        .expect("evaluations");

    // A degree-15 polynomial must not pass as `deg < 9`.
    assert!(matches!(
        fri::prove(&evaluations, &domain, 9, 32),
        Err(FriError::DegreeTooLarge { degree_bound: 9, .. })
    ));
    let proof = fri::prove(&evaluations, &domain, 16, 32).expect("proof");
    assert!(fri::verify(&proof, 128, 16, 32).expect("verify").is_accept());
    assert!(matches!(
        fri::verify(&proof, 128, 9, 32),
        Err(FriError::DegreeTooLarge { degree_bound: 9, .. })
    ));
}

#[test]
fn polynomial_of_degree_equal_to_bound_rejects() {
    let domain = EvaluationDomain::<Goldilocks>::new(128).expect("domain");
    for degree_bound in [1usize, 2, 8, 16, 32] {
        let coefficients: Vec<u64> = (1..=degree_bound as u64 + 1).collect();
        let evaluations = Polynomial::<Goldilocks>::from_u64s(&coefficients)
            .evaluate_over(&domain)
            .expect("evaluations");
        let proof = fri::prove(&evaluations, &domain, degree_bound, 32).expect("proof");
        assert_eq!(
            fri::verify(&proof, 128, degree_bound, 32).expect("verify"),
            Verdict::Reject,
            "degree {degree_bound} passed as deg < {degree_bound}"
        );
    }
}

#[test]
fn zero_polynomial_with_zero_degree_bound() {
    let domain = scenario_domain();
    let zeros = vec![Fp::<F97>::ZERO; 8];
    let proof = fri::prove(&zeros, &domain, 0, 3).expect("proof");
    assert_eq!(proof.roots.len(), 1);
    assert!(fri::verify(&proof, 8, 0, 3).expect("verify").is_accept());

    let constant = vec![Fp::<F97>::new(5); 8];
    let proof = fri::prove(&constant, &domain, 0, 3).expect("proof");
    assert_eq!(fri::verify(&proof, 8, 0, 3).expect("verify"), Verdict::Reject);
    assert!(fri::verify(&proof, 8, 1, 3).expect("verify").is_accept());
}

#[test]
fn explicit_final_layer_size_must_match_degree_bound() {
    let domain = EvaluationDomain::<Goldilocks>::new(64).expect("domain");
    let evaluations = goldilocks_evaluations(&domain, 4, 5);
    let options = FriOptions::with_final_layer_size(16);
    let proof = FriProver::<Goldilocks, Blake2s>::new(options)
        .prove(&evaluations, &domain, 4, 10)
        .expect("proof");
    assert_eq!(proof.roots.len(), 3);
    assert_eq!(proof, fri::prove(&evaluations, &domain, 4, 10).expect("proof"));

    let verdict = FriVerifier::<Goldilocks, Blake2s>::new(options)
        .verify(&proof, 64, 4, 10)
        .expect("verify");
    assert!(verdict.is_accept());

    // Two more folds would only certify `deg < 16`.
    let deeper = FriOptions::with_final_layer_size(4);
    assert!(matches!(
        FriProver::<Goldilocks, Blake2s>::new(deeper).prove(&evaluations, &domain, 4, 10),
        Err(FriError::DegreeTooLarge { rounds: 4, .. })
    ));
    assert!(matches!(
        FriVerifier::<Goldilocks, Blake2s>::new(deeper).verify(&proof, 64, 4, 10),
        Err(FriError::DegreeTooLarge { rounds: 4, .. })
    ));
}

#[test]
fn blake3_proofs_do_not_verify_under_blake2s() {
    let domain = EvaluationDomain::<Goldilocks>::new(64).expect("domain");
    let evaluations = goldilocks_evaluations(&domain, 8, 6);
    let options = FriOptions::default();
    let proof = FriProver::<Goldilocks, Blake3>::new(options)
        .prove(&evaluations, &domain, 8, 8)
        .expect("proof");
    assert!(FriVerifier::<Goldilocks, Blake3>::new(options)
        .verify(&proof, 64, 8, 8)
        .expect("verify")
        .is_accept());
    assert_eq!(
        FriVerifier::<Goldilocks, Blake2s>::new(options)
            .verify(&proof, 64, 8, 8)
            .expect("verify"),
        Verdict::Reject
    );
}

#[test]
fn construction_errors() {
    let domain = scenario_domain();
    let evaluations = scenario_evaluations();
    assert_eq!(
        fri::prove(&evaluations, &domain, 4, 0),
        Err(FriError::InvalidQueryCount)
    );
    assert!(matches!(
        fri::prove(&evaluations, &domain, 8, 4),
        Err(FriError::DegreeTooLarge { .. })
    ));
    assert!(matches!(
        fri::prove(&evaluations, &domain, 9, 4),
        Err(FriError::DegreeTooLarge { .. })
    ));
    assert_eq!(
        fri::prove(&evaluations[..6], &domain, 4, 4),
        Err(FriError::InvalidInputLength {
            expected: 8,
            actual: 6
        })
    );
    assert_eq!(
        fri::verify(&FriProof::<F97> {
            domain_size: 12,
            roots: Vec::new(),
            final_value: Fp::ZERO,
            queries: Vec::new(),
        }, 12, 4, 4),
        Err(FriError::InvalidDomainSize { size: 12 })
    );
}

#[test]
fn cancellation_aborts_proving() {
    let domain = scenario_domain();
    let cancel = AtomicBool::new(true);
    assert_eq!(
        FriProver::<F97, Blake2s>::new(FriOptions::default()).prove_cancellable(
            &scenario_evaluations(),
            &domain,
            4,
            SCENARIO_QUERIES,
            &cancel
        ),
        Err(FriError::Aborted)
    );

    let idle = AtomicBool::new(false);
    let proof = FriProver::<F97, Blake2s>::new(FriOptions::default())
        .prove_cancellable(&scenario_evaluations(), &domain, 4, SCENARIO_QUERIES, &idle)
        .expect("proof");
    assert!(fri::verify(&proof, 8, 4, SCENARIO_QUERIES).expect("verify").is_accept());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn honest_goldilocks_proofs_accept(
        log_size in 3u32..10,
        log_blowup in 1u32..4,
        queries in 1usize..24,
        seed in any::<u64>(),
    ) {
        let size = 1usize << log_size;
        let degree_bound = size >> log_blowup.min(log_size);
        let domain = EvaluationDomain::<Goldilocks>::new(size).expect("domain");
        let evaluations = goldilocks_evaluations(&domain, degree_bound, seed);
        let proof = fri::prove(&evaluations, &domain, degree_bound, queries).expect("proof");
        prop_assert!(fri::verify(&proof, size, degree_bound, queries).expect("verify").is_accept());
    }
}
