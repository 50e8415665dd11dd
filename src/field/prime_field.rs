//! Prime field arithmetic over moduli that fit in a `u64`.
//!
//! The field is selected at the type level through [`FieldParams`], which lets
//! the production Goldilocks field and small test fields share one
//! implementation.
//!
//! # Representation
//!
//! * [`Fp`] stores the canonical representative in `[0, MODULUS)`.  Every
//!   constructor reduces its input, so equality is plain integer equality.
//! * Products are computed over `u128` and reduced once, which is exact for
//!   any modulus below `2^64`.
//! * Serialization uses fixed-width **big-endian** encoding of the canonical
//!   representative.  Decoding rejects values `>= MODULUS`.

use core::fmt;
use core::hash::Hash;
use core::iter::{Product, Sum};
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors raised by field arithmetic and canonical decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Attempted to invert the additive identity.
    #[error("division by zero")]
    DivisionByZero,
    /// Encoded integer was not reduced modulo the field prime.
    #[error("field element deserialization failed: non-canonical input")]
    NonCanonical,
}

/// Compile-time description of a prime field.
pub trait FieldParams:
    'static + Copy + Clone + fmt::Debug + Default + PartialEq + Eq + Hash + Send + Sync
{
    /// Prime modulus `p`.
    const MODULUS: u64;
    /// Generator of the full multiplicative group of order `p - 1`.
    const GENERATOR: u64;
    /// Largest `k` such that `2^k` divides `p - 1`.
    const TWO_ADICITY: u32;
    /// Human readable field name used in logs.
    const NAME: &'static str;
}

/// The Goldilocks prime `2^64 - 2^32 + 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Goldilocks;

impl FieldParams for Goldilocks {
    const MODULUS: u64 = 0xffff_ffff_0000_0001;
    const GENERATOR: u64 = 7;
    const TWO_ADICITY: u32 = 32;
    const NAME: &'static str = "goldilocks";
}

/// The prime field of order 97, small enough to check protocol runs by hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct F97;

impl FieldParams for F97 {
    const MODULUS: u64 = 97;
    const GENERATOR: u64 = 5;
    const TWO_ADICITY: u32 = 5;
    const NAME: &'static str = "f97";
}

/// Canonical element of the prime field described by `P`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fp<P: FieldParams> {
    value: u64,
    _params: PhantomData<P>,
}

impl<P: FieldParams> Fp<P> {
    /// Additive identity.
    pub const ZERO: Self = Self::from_canonical(0);
    /// Multiplicative identity.
    pub const ONE: Self = Self::from_canonical(1);
    /// Width in bytes of the canonical encoding.
    pub const ENCODED_LEN: usize = 8;

    const fn from_canonical(value: u64) -> Self {
        Self {
            value,
            _params: PhantomData,
        }
    }

    /// Reduces an arbitrary integer into the field.
    pub const fn new(value: u64) -> Self {
        Self::from_canonical(value % P::MODULUS)
    }

    /// Generator of the multiplicative group.
    pub const fn generator() -> Self {
        Self::new(P::GENERATOR)
    }

    /// Returns the canonical representative.
    pub const fn as_u64(&self) -> u64 {
        self.value
    }

    /// Returns `true` for the additive identity.
    pub const fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Squares the element.
    pub fn square(self) -> Self {
        self * self
    }

    /// Doubles the element.
    pub fn double(self) -> Self {
        self + self
    }

    /// Raises the element to `exponent` by square-and-multiply.
    pub fn pow(self, mut exponent: u64) -> Self {
        let mut base = self;
        let mut acc = Self::ONE;
        while exponent > 0 {
            if exponent & 1 == 1 {
                acc *= base;
            }
            base = base.square();
            exponent >>= 1;
        }
        acc
    }

    /// Multiplicative inverse via Fermat's little theorem.
    pub fn inv(self) -> Result<Self, FieldError> {
        if self.is_zero() {
            return Err(FieldError::DivisionByZero);
        }
        Ok(self.pow(P::MODULUS - 2))
    }

    /// Divides by `rhs`, failing when `rhs` is zero.
    pub fn try_div(self, rhs: Self) -> Result<Self, FieldError> {
        Ok(self * rhs.inv()?)
    }

    /// Inverts every element of `values` with a single field inversion.
    pub fn batch_inverse(values: &[Self]) -> Result<Vec<Self>, FieldError> {
        let mut prefix = Vec::with_capacity(values.len());
        let mut acc = Self::ONE;
        for value in values {
            if value.is_zero() {
                return Err(FieldError::DivisionByZero);
            }
            prefix.push(acc);
            acc *= *value;
        }
        let mut inv_acc = acc.inv()?;
        let mut out = vec![Self::ZERO; values.len()];
        for (index, value) in values.iter().enumerate().rev() {
            out[index] = inv_acc * prefix[index];
            inv_acc *= *value;
        }
        Ok(out)
    }

    /// Encodes the canonical representative as 8 big-endian bytes.
    pub fn to_bytes_be(&self) -> [u8; 8] {
        self.value.to_be_bytes()
    }

    /// Decodes 8 big-endian bytes, rejecting non-canonical integers.
    pub fn from_bytes_be(bytes: &[u8; 8]) -> Result<Self, FieldError> {
        let value = u64::from_be_bytes(*bytes);
        if value >= P::MODULUS {
            return Err(FieldError::NonCanonical);
        }
        Ok(Self::from_canonical(value))
    }

    /// Maps 16 uniformly distributed bytes onto the field.
    ///
    /// The bytes are read as a big-endian `u128` and reduced, so the bias is
    /// at most `p / 2^128`.
    pub fn from_uniform_bytes(bytes: &[u8; 16]) -> Self {
        let wide = u128::from_be_bytes(*bytes);
        Self::from_canonical((wide % P::MODULUS as u128) as u64)
    }
}

impl<P: FieldParams> From<u64> for Fp<P> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<P: FieldParams> fmt::Debug for Fp<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fp<{}>({})", P::NAME, self.value)
    }
}

impl<P: FieldParams> fmt::Display for Fp<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<P: FieldParams> Add for Fp<P> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let sum = self.value as u128 + rhs.value as u128;
        Self::from_canonical((sum % P::MODULUS as u128) as u64)
    }
}

impl<P: FieldParams> Sub for Fp<P> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        if self.value >= rhs.value {
            Self::from_canonical(self.value - rhs.value)
        } else {
            Self::from_canonical(P::MODULUS - (rhs.value - self.value))
        }
    }
}

impl<P: FieldParams> Mul for Fp<P> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let product = self.value as u128 * rhs.value as u128;
        Self::from_canonical((product % P::MODULUS as u128) as u64)
    }
}

impl<P: FieldParams> Neg for Fp<P> {
    type Output = Self;

    fn neg(self) -> Self {
        if self.value == 0 {
            self
        } else {
            Self::from_canonical(P::MODULUS - self.value)
        }
    }
}

impl<P: FieldParams> AddAssign for Fp<P> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: FieldParams> SubAssign for Fp<P> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: FieldParams> MulAssign for Fp<P> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<P: FieldParams> Sum for Fp<P> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, value| acc + value)
    }
}

impl<P: FieldParams> Product for Fp<P> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, value| acc * value)
    }
}

impl<P: FieldParams> Serialize for Fp<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.value)
    }
}

impl<'de, P: FieldParams> Deserialize<'de> for Fp<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u64::deserialize(deserializer)?;
        if value >= P::MODULUS {
            return Err(serde::de::Error::custom(FieldError::NonCanonical));
        }
        Ok(Self::from_canonical(value))
    }
}
