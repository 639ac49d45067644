use crate::error::MathError;
use alloy_primitives::U256;
use alloy_primitives::aliases::{I512, U512};

const U256_TEN: U256 = U256::from_limbs([10, 0, 0, 0]);
const U512_ONE: U512 = U512::from_limbs([1, 0, 0, 0, 0, 0, 0, 0]);
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// Zero-extends a `U256` into the 512‑bit intermediate width.
#[inline(always)]
pub fn widen(value: U256) -> U512 {
    let limbs = value.as_limbs();
    U512::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3], 0, 0, 0, 0])
}

/// Narrows a 512‑bit intermediate back to `U256`, returning
/// `MathError::Overflow` if any of the upper limbs are set.
#[inline(always)]
pub fn narrow(value: U512) -> Result<U256, MathError> {
    let limbs = value.as_limbs();
    if limbs[4..].iter().any(|&limb| limb != 0) {
        return Err(MathError::Overflow);
    }
    Ok(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

fn product_wide(factors: &[U256]) -> Result<U512, MathError> {
    factors.iter().try_fold(U512_ONE, |acc, &factor| {
        acc.checked_mul(widen(factor)).ok_or(MathError::Overflow)
    })
}

/// Computes `a * b / denominator` with full precision, returning a
/// `MathError` on overflow or division by zero.
///
/// Same contract as Solidity's `FullMath.mulDiv`: the product is never
/// truncated, only the final quotient has to fit in 256 bits.
#[inline(always)]
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    narrow(widen(a) * widen(b) / widen(denominator))
}

/// Computes `floor(n0 * n1 * ... / (d0 * d1 * ...))` with a single
/// floor division over 512‑bit products.
///
/// The liquidity formulas multiply up to three Q64.96 quantities before
/// dividing; doing it in one step keeps the result exact instead of
/// compounding one truncation per intermediate division.
pub fn mul_div_wide(numerator: &[U256], denominator: &[U256]) -> Result<U256, MathError> {
    let denominator = product_wide(denominator)?;
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    narrow(product_wide(numerator)? / denominator)
}

/// Returns `10^exp`, or `MathError::Overflow` past `10^77`.
pub fn pow10(exp: u8) -> Result<U256, MathError> {
    (0..exp).try_fold(U256::ONE, |acc, _| {
        acc.checked_mul(U256_TEN).ok_or(MathError::Overflow)
    })
}

macro_rules! newton_isqrt {
    ($(#[$doc:meta])* $name:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name(value: $ty) -> $ty {
            if value <= <$ty>::from(1u64) {
                return value;
            }
            // 2^(ceil(bits / 2)) is always >= sqrt(value), so the
            // iteration decreases monotonically onto the floor root.
            let mut x = <$ty>::from(1u64) << value.bit_len().div_ceil(2);
            loop {
                let y = (x + value / x) >> 1;
                if y >= x {
                    return x;
                }
                x = y;
            }
        }
    };
}

newton_isqrt!(
    /// Floor square root of a `U256` using Newton's method.
    isqrt,
    U256
);

newton_isqrt!(
    /// Floor square root of a 512‑bit intermediate (e.g. a Q192 ratio
    /// scaled by token decimals).
    isqrt_512,
    U512
);

/// Floor square root of a signed big integer.
///
/// The input is 512 bits wide so every non-negative value up to and past
/// `2^256` is accepted. Zero and negative inputs return zero rather than
/// an error.
pub fn sqrt_big_int(value: I512) -> U256 {
    if value.is_negative() || value.is_zero() {
        return U256::ZERO;
    }
    // the root of anything below 2^511 fits in 256 bits
    narrow(isqrt_512(value.into_raw())).unwrap_or(U256::MAX)
}

/// Lossy conversion to `f64` for display paths only.
pub fn u256_to_f64(value: U256) -> f64 {
    value
        .as_limbs()
        .iter()
        .rev()
        .fold(0.0, |acc, &limb| acc * TWO_POW_64 + limb as f64)
}

/// Truncating conversion from a non-negative finite `f64` into `U256`.
///
/// Returns `None` for NaN, infinities, negative values, and values that
/// do not fit in 256 bits.
pub fn f64_to_u256_floor(value: f64) -> Option<U256> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let bits = value.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32;
    if exponent == 0 {
        // zero or subnormal, both below one
        return Some(U256::ZERO);
    }
    let mantissa = (bits & ((1u64 << 52) - 1)) | (1u64 << 52);
    let shift = exponent - 1075;
    if shift >= 0 {
        if shift > 256 - 53 {
            return None;
        }
        Some(U256::from(mantissa) << shift as usize)
    } else if shift <= -64 {
        Some(U256::ZERO)
    } else {
        Some(U256::from(mantissa >> (-shift) as u32))
    }
}
