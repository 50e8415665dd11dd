//! Binary FRI low-degree test used as a polynomial commitment.
//!
//! The prover commits to the evaluations of `f_0` over a two-adic domain of
//! size `n`, then repeatedly folds with transcript challenges until the
//! layer has `final_layer_size` entries, committing to every layer.  Honest
//! folding of a polynomial of degree `< degree_bound` ends in a constant.
//!
//! Degree bounds are powers of two (`0` and `1` both mean a constant) and the
//! schedule runs exactly `log2(degree_bound)` folds, so a constant final
//! layer certifies the declared bound and nothing weaker.
//!
//! Conventions shared by prover and verifier:
//!
//! * Layer `i` has size `N_i = n / 2^i` and is stored in natural order over
//!   the subgroup generated by `ω_{N_i}`.
//! * A top-level query index `j` maps to position `j mod N_i` in layer `i`.
//!   Its fold partner is `(j mod N_i + N_i/2) mod N_i`, the position of
//!   `-ω_{N_i}^{j}`.  Both land on position `j mod N_{i+1}` after folding.
//! * Transcript order: public instance, root 0, then per round the fold
//!   challenge followed by the new root, then the final constant, then the
//!   query indices.
//!
//! Verification failures produce [`Verdict::Reject`]; only malformed proofs
//! and invalid statements produce a [`FriError`].

mod folding;
mod layer;
mod params;
mod proof;
mod prover;
mod security;
mod types;
mod verifier;

pub use folding::{fold_layer, fold_pair};
pub use layer::FriLayer;
pub use params::FriParameters;
pub use proof::{Decommitment, FriProof, LayerOpening, QueryOpening, PROOF_VERSION};
pub use prover::{prove, FriCommitment, FriProver};
pub use security::{estimate_security_bits, queries_for_security};
pub use types::{FriError, FriOptions, Verdict, PROTOCOL_LABEL};
pub use verifier::{verify, FriVerifier};
