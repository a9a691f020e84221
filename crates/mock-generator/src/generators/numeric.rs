//! Numeric value generators.
//!
//! Ranges are inclusive. An empty or inverted range yields its minimum.

use mock_core::MockValue;
use rand::Rng;
use rust_decimal::Decimal;

/// Generate a random 16-bit integer in the given range.
pub fn generate_short_range<R: Rng>(rng: &mut R, min: i16, max: i16) -> MockValue {
    if min >= max {
        return MockValue::Int16(min);
    }
    MockValue::Int16(rng.random_range(min..=max))
}

/// Generate a random 32-bit integer in the given range.
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i32, max: i32) -> MockValue {
    if min >= max {
        return MockValue::Int32(min);
    }
    MockValue::Int32(rng.random_range(min..=max))
}

/// Generate a random 64-bit integer in the given range.
pub fn generate_long_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> MockValue {
    if min >= max {
        return MockValue::Int64(min);
    }
    MockValue::Int64(rng.random_range(min..=max))
}

/// Generate a random float in the given range.
pub fn generate_float_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> MockValue {
    MockValue::Float64(random_f64(rng, min, max))
}

/// Generate a random 32-bit float in the given range.
pub fn generate_float32_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> MockValue {
    MockValue::Float32(random_f64(rng, min, max) as f32)
}

/// Generate a random decimal in the given range, rounded to 2 places.
pub fn generate_decimal_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> MockValue {
    let value = random_f64(rng, min, max);
    let decimal = Decimal::try_from(value).unwrap_or_default();
    MockValue::Decimal(decimal.round_dp(2))
}

fn random_f64<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    if min >= max {
        return min;
    }
    rng.random_range(min..=max)
}
