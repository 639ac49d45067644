use crate::error::{QuoteError, StateError};
use alloy_primitives::U256;
use tracing::debug;

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = -MIN_TICK;

pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4295128739, 0, 0, 0]);
pub const MAX_SQRT_RATIO: U256 =
    U256::from_limbs([6743328256752651558, 17280870778742802505, 4294805859, 0]);

/// Returns the sqrt price (Q64.96 fixed‑point) at a given tick index,
/// or `StateError::TickOutOfBounds` if the tick is invalid.
///
/// This is the bit‑exact on‑chain algorithm. Anything that ends up as a
/// transaction parameter should be derived from here rather than from
/// the floating point conversions in `price_math`.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, StateError> {
    let abs_tick = tick.unsigned_abs();

    if abs_tick > MAX_TICK as u32 {
        return Err(StateError::TickOutOfBounds);
    }

    let mut ratio = if abs_tick & 1 != 0 {
        U256::from_limbs([12262481743371124737, 18445821805675392311, 0, 0])
    } else {
        U256::from_limbs([0, 0, 1, 0])
    };

    // each factor is 1/sqrt(1.0001)^(2^i) as a Q128.128
    const FACTORS: [(u32, u64, u64); 19] = [
        (0x2, 6459403834229662010, 18444899583751176498),
        (0x4, 17226890335427755468, 18443055278223354162),
        (0x8, 2032852871939366096, 18439367220385604838),
        (0x10, 14545316742740207172, 18431993317065449817),
        (0x20, 5129152022828963008, 18417254355718160513),
        (0x40, 4894419605888772193, 18387811781193591352),
        (0x80, 1280255884321894483, 18329067761203520168),
        (0x100, 15924666964335305636, 18212142134806087854),
        (0x200, 8010504389359918676, 17980523815641551639),
        (0x400, 10668036004952895731, 17526086738831147013),
        (0x800, 4878133418470705625, 16651378430235024244),
        (0x1000, 9537173718739605541, 15030750278693429944),
        (0x2000, 9972618978014552549, 12247334978882834399),
        (0x4000, 10428997489610666743, 8131365268884726200),
        (0x8000, 9305304367709015974, 3584323654723342297),
        (0x10000, 14301143598189091785, 696457651847595233),
        (0x20000, 7393154844743099908, 26294789957452057),
        (0x40000, 2209338891292245656, 37481735321082),
        (0x80000, 10518117631919034274, 76158723),
    ];

    for (bit, low, high) in FACTORS {
        if abs_tick & bit != 0 {
            ratio = ratio.wrapping_mul(U256::from_limbs([low, high, 0, 0])) >> 128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    let lower_32_bits = (ratio.as_limbs()[0] & 0xFFFF_FFFF) as u32;
    Ok((ratio >> 32) + U256::from((lower_32_bits != 0) as u64))
}

/// Rejects non-positive tick spacings and spacings wider than the
/// whole tick space.
pub fn check_tick_spacing(tick_spacing: i32) -> Result<(), QuoteError> {
    if tick_spacing <= 0 || tick_spacing > MAX_TICK {
        return Err(QuoteError::InvalidTickSpacing(tick_spacing));
    }
    Ok(())
}

/// Tick spacing of the standard fee tiers (fee in hundredths of a bip).
pub fn tick_spacing_for_fee(fee: u32) -> Option<i32> {
    match fee {
        100 => Some(1),
        500 => Some(10),
        3000 => Some(60),
        10000 => Some(200),
        _ => None,
    }
}

/// Lowest tick that is a multiple of `tick_spacing`.
pub fn min_usable_tick(tick_spacing: i32) -> Result<i32, QuoteError> {
    check_tick_spacing(tick_spacing)?;
    Ok((MIN_TICK / tick_spacing) * tick_spacing)
}

/// Highest tick that is a multiple of `tick_spacing`.
pub fn max_usable_tick(tick_spacing: i32) -> Result<i32, QuoteError> {
    check_tick_spacing(tick_spacing)?;
    Ok((MAX_TICK / tick_spacing) * tick_spacing)
}

/// Bounds of a full range position for the given spacing.
pub fn full_range_ticks(tick_spacing: i32) -> Result<(i32, i32), QuoteError> {
    Ok((min_usable_tick(tick_spacing)?, max_usable_tick(tick_spacing)?))
}

// ticks recovered through ln() land a few ulps off the integer they
// came from; snap those before rounding onto the spacing grid
const TICK_SNAP_EPSILON: f64 = 1e-6;

fn snap_tick(tick: f64) -> f64 {
    let nearest = tick.round();
    if (tick - nearest).abs() < TICK_SNAP_EPSILON {
        nearest
    } else {
        tick
    }
}

/// Rounds a continuous tick down to a multiple of `tick_spacing`,
/// clamped to the usable range.
pub fn floor_to_spacing(tick: f64, tick_spacing: i32) -> Result<i32, QuoteError> {
    let spacing = tick_spacing as f64;
    clamp_usable((snap_tick(tick) / spacing).floor() * spacing, tick_spacing)
}

/// Rounds a continuous tick up to a multiple of `tick_spacing`,
/// clamped to the usable range.
pub fn ceil_to_spacing(tick: f64, tick_spacing: i32) -> Result<i32, QuoteError> {
    let spacing = tick_spacing as f64;
    clamp_usable((snap_tick(tick) / spacing).ceil() * spacing, tick_spacing)
}

/// Nearest multiple of `tick_spacing`, ties away from zero.
pub fn nearest_usable_tick(tick: i32, tick_spacing: i32) -> Result<i32, QuoteError> {
    let spacing = tick_spacing as f64;
    clamp_usable((tick as f64 / spacing).round() * spacing, tick_spacing)
}

fn clamp_usable(rounded: f64, tick_spacing: i32) -> Result<i32, QuoteError> {
    let (min, max) = full_range_ticks(tick_spacing)?;
    if rounded.is_nan() {
        return Ok(min);
    }
    // saturating float to int cast, then clamp onto the spacing grid
    Ok((rounded as i32).clamp(min, max))
}

/// Turns two continuous ticks into a usable `(lower, upper)` pair: the
/// lower bound rounds down, the upper bound rounds up.
///
/// Bounds may be given in either order. When both round onto the same
/// multiple (or past each other after clamping) the range is rejected
/// with `QuoteError::RangeTooNarrow`.
pub fn align_range(tick_a: f64, tick_b: f64, tick_spacing: i32) -> Result<(i32, i32), QuoteError> {
    let (low, high) = if tick_a <= tick_b {
        (tick_a, tick_b)
    } else {
        (tick_b, tick_a)
    };
    let lower = floor_to_spacing(low, tick_spacing)?;
    let upper = ceil_to_spacing(high, tick_spacing)?;
    if lower >= upper {
        debug!(lower, upper, tick_spacing, "range collapsed after spacing rounding");
        return Err(QuoteError::RangeTooNarrow { lower, upper });
    }
    Ok((lower, upper))
}
