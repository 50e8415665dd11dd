use serde::{Deserialize, Serialize};

use crate::field::{FieldParams, Fp};
use crate::hash::{Digest, DIGEST_SIZE};
use crate::merkle::MerkleProof;
use crate::ser::{
    ensure_consumed, read_digest, read_felt, read_option, read_u64, read_u8, read_vec,
    write_digest, write_felt, write_option, write_u64, write_u8, write_vec, ByteReader, SerError,
    SerKind, SerResult,
};

/// Current version of the proof byte layout.
pub const PROOF_VERSION: u8 = 1;

/// Non-interactive FRI proof.
///
/// Carries one root per committed layer, the constant the last layer folds
/// to, and one opening per query index.  Query indices are not stored; the
/// verifier re-derives them from the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct FriProof<P: FieldParams> {
    /// Size of the initial evaluation domain.
    pub domain_size: usize,
    /// Roots of layers `0..=R`.
    pub roots: Vec<Digest>,
    /// Constant value of the final layer.
    pub final_value: Fp<P>,
    /// Openings in query order.
    pub queries: Vec<QueryOpening<P>>,
}

/// Cross-layer opening for one query index, ordered by layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct QueryOpening<P: FieldParams> {
    pub layers: Vec<LayerOpening<P>>,
}

/// Opening of one layer at the queried position.
///
/// Every layer but the last also opens the sibling position `k ± N/2`
/// needed to check the fold into the next layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct LayerOpening<P: FieldParams> {
    pub value: Fp<P>,
    pub path: MerkleProof,
    pub sibling: Option<Decommitment<P>>,
}

/// A committed value together with its authentication path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Decommitment<P: FieldParams> {
    pub value: Fp<P>,
    pub path: MerkleProof,
}

impl<P: FieldParams> FriProof<P> {
    /// Number of committed layers.
    pub fn layer_count(&self) -> usize {
        self.roots.len()
    }

    /// Encodes the proof into its canonical big-endian byte layout.
    pub fn to_bytes(&self) -> SerResult<Vec<u8>> {
        let mut out = Vec::new();
        write_u8(&mut out, PROOF_VERSION);
        write_u64(&mut out, self.domain_size as u64);
        write_vec(&mut out, &self.roots, SerKind::Proof, "roots", |out, root| {
            write_digest(out, root);
            Ok(())
        })?;
        write_felt(&mut out, &self.final_value);
        write_vec(&mut out, &self.queries, SerKind::Proof, "queries", write_query)?;
        Ok(out)
    }

    /// Decodes a proof, rejecting truncated input, non-canonical field
    /// elements, unknown versions and trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> SerResult<Self> {
        let mut cursor = ByteReader::new(bytes);
        let version = read_u8(&mut cursor, SerKind::Proof, "version")?;
        if version != PROOF_VERSION {
            return Err(SerError::invalid_value(SerKind::Proof, "version"));
        }
        let domain_size = usize::try_from(read_u64(&mut cursor, SerKind::Proof, "domain_size")?)
            .map_err(|_| SerError::invalid_value(SerKind::Proof, "domain_size"))?;
        let roots = read_vec(&mut cursor, SerKind::Proof, "roots", DIGEST_SIZE, |cursor| {
            read_digest(cursor, SerKind::Proof, "root")
        })?;
        let final_value = read_felt(&mut cursor, SerKind::Proof, "final_value")?;
        let queries = read_vec(&mut cursor, SerKind::Proof, "queries", 4, read_query)?;
        ensure_consumed(&cursor, SerKind::Proof)?;
        Ok(Self {
            domain_size,
            roots,
            final_value,
            queries,
        })
    }
}

fn write_query<P: FieldParams>(out: &mut Vec<u8>, query: &QueryOpening<P>) -> SerResult<()> {
    write_vec(out, &query.layers, SerKind::Query, "layers", write_layer)
}

fn write_layer<P: FieldParams>(out: &mut Vec<u8>, layer: &LayerOpening<P>) -> SerResult<()> {
    write_felt(out, &layer.value);
    write_path(out, &layer.path)?;
    write_option(out, &layer.sibling, |out, sibling| {
        write_felt(out, &sibling.value);
        write_path(out, &sibling.path)
    })
}

fn write_path(out: &mut Vec<u8>, path: &MerkleProof) -> SerResult<()> {
    write_vec(out, &path.siblings, SerKind::Path, "siblings", |out, digest| {
        write_digest(out, digest);
        Ok(())
    })
}

fn read_query<P: FieldParams>(cursor: &mut ByteReader<'_>) -> SerResult<QueryOpening<P>> {
    // value (8) + path count (4) + sibling flag (1)
    let layers = read_vec(cursor, SerKind::Query, "layers", 13, read_layer)?;
    Ok(QueryOpening { layers })
}

fn read_layer<P: FieldParams>(cursor: &mut ByteReader<'_>) -> SerResult<LayerOpening<P>> {
    let value = read_felt(cursor, SerKind::Layer, "value")?;
    let path = read_path(cursor)?;
    let sibling = read_option(cursor, SerKind::Layer, "sibling", |cursor| {
        let value = read_felt(cursor, SerKind::Layer, "sibling_value")?;
        let path = read_path(cursor)?;
        Ok(Decommitment { value, path })
    })?;
    Ok(LayerOpening {
        value,
        path,
        sibling,
    })
}

fn read_path(cursor: &mut ByteReader<'_>) -> SerResult<MerkleProof> {
    let siblings = read_vec(cursor, SerKind::Path, "siblings", DIGEST_SIZE, |cursor| {
        read_digest(cursor, SerKind::Path, "sibling")
    })?;
    Ok(MerkleProof::new(siblings))
}
