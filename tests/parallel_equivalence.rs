#![cfg(feature = "parallel")]

use fri_pcs::fft::{forward, inverse, EvaluationDomain};
use fri_pcs::field::{FieldElement, Goldilocks, Polynomial};
use fri_pcs::fri::{self, fold_layer, Verdict};
use fri_pcs::hash::Blake2s;
use fri_pcs::merkle::MerkleTree;
use fri_pcs::utils::set_parallelism;

fn sample_vector(len: usize) -> Vec<FieldElement> {
    (0..len as u64)
        .map(|i| FieldElement::new(i.wrapping_mul(0x9e37_79b9_7f4a_7c15) ^ 0x5851))
        .collect()
}

#[test]
fn fft_parallel_matches_sequential() {
    let domain = EvaluationDomain::<Goldilocks>::new(1 << 12).expect("domain");
    let input = sample_vector(domain.size());
    let baseline = {
        let _guard = set_parallelism(false);
        forward(&input, &domain).expect("forward")
    };
    assert_eq!(forward(&input, &domain).expect("forward"), baseline);

    let inverse_baseline = {
        let _guard = set_parallelism(false);
        inverse(&baseline, &domain).expect("inverse")
    };
    assert_eq!(inverse(&baseline, &domain).expect("inverse"), inverse_baseline);
}

#[test]
fn merkle_parallel_matches_sequential() {
    let leaves = sample_vector(1 << 10);
    let baseline = {
        let _guard = set_parallelism(false);
        MerkleTree::<_, Blake2s>::commit(leaves.clone()).expect("sequential commit").1
    };
    let (_, root) = MerkleTree::<_, Blake2s>::commit(leaves).expect("parallel commit");
    assert_eq!(baseline, root);
}

#[test]
fn folding_parallel_matches_sequential() {
    let domain = EvaluationDomain::<Goldilocks>::new(1 << 11).expect("domain");
    let values = sample_vector(domain.size());
    let beta = FieldElement::new(0xdead_beef);
    let baseline = {
        let _guard = set_parallelism(false);
        fold_layer(&values, beta, &domain).expect("fold")
    };
    assert_eq!(fold_layer(&values, beta, &domain).expect("fold"), baseline);
}

#[test]
fn proofs_and_verdicts_match_across_modes() {
    let domain = EvaluationDomain::<Goldilocks>::new(1 << 10).expect("domain");
    let evaluations = Polynomial::new(sample_vector(64))
        .evaluate_over(&domain)
        .expect("evaluations");

    let (baseline, sequential_verdict) = {
        let _guard = set_parallelism(false);
        let proof = fri::prove(&evaluations, &domain, 64, 32).expect("proof");
        let verdict = fri::verify(&proof, 1 << 10, 64, 32).expect("verify");
        (proof, verdict)
    };
    let proof = fri::prove(&evaluations, &domain, 64, 32).expect("proof");
    assert_eq!(proof, baseline);
    assert_eq!(sequential_verdict, Verdict::Accept);
    assert_eq!(fri::verify(&proof, 1 << 10, 64, 32).expect("verify"), Verdict::Accept);
}
