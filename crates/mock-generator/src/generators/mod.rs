//! Primitive synthesizer and the individual value generators it uses.
//!
//! Every scalar kind maps to exactly one generator; ranges come from
//! [`MockConfig`]. Enums pick a uniformly random variant.

pub mod numeric;
pub mod pattern;
pub mod text;
pub mod timestamp;
pub mod uuid;

use crate::config::MockConfig;
use mock_core::{EnumDescriptor, MockValue, ScalarKind};
use rand::Rng;

/// Produce a plausible value for a scalar kind.
pub fn synthesize_primitive<R: Rng>(kind: ScalarKind, rng: &mut R, config: &MockConfig) -> MockValue {
    match kind {
        ScalarKind::Bool => MockValue::Bool(rng.random()),
        ScalarKind::Int16 => {
            numeric::generate_short_range(rng, config.short_range.min, config.short_range.max)
        }
        ScalarKind::Int32 => {
            numeric::generate_int_range(rng, config.int_range.min, config.int_range.max)
        }
        ScalarKind::Int64 => {
            numeric::generate_long_range(rng, config.long_range.min, config.long_range.max)
        }
        ScalarKind::Float32 => {
            numeric::generate_float32_range(rng, config.float_range.min, config.float_range.max)
        }
        ScalarKind::Float64 => {
            numeric::generate_float_range(rng, config.float_range.min, config.float_range.max)
        }
        ScalarKind::Decimal => {
            numeric::generate_decimal_range(rng, config.float_range.min, config.float_range.max)
        }
        ScalarKind::Char => MockValue::Char(text::letter(rng)),
        ScalarKind::String => MockValue::String(text::word(rng)),
        ScalarKind::Uuid => uuid::generate_uuid_v4(rng),
        ScalarKind::DateTime => timestamp::generate_recent_timestamp(rng, config.date_window_days),
        ScalarKind::Date => timestamp::generate_recent_date(rng, config.date_window_days),
    }
}

/// Pick a uniformly random variant, or `Null` for an enum without variants.
pub fn synthesize_enum<R: Rng>(descriptor: &EnumDescriptor, rng: &mut R) -> MockValue {
    if descriptor.variants.is_empty() {
        return MockValue::Null;
    }
    let idx = rng.random_range(0..descriptor.variants.len());
    MockValue::Enum(descriptor.variants[idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ALL_KINDS: [ScalarKind; 12] = [
        ScalarKind::Bool,
        ScalarKind::Int16,
        ScalarKind::Int32,
        ScalarKind::Int64,
        ScalarKind::Float32,
        ScalarKind::Float64,
        ScalarKind::Decimal,
        ScalarKind::Char,
        ScalarKind::String,
        ScalarKind::Uuid,
        ScalarKind::DateTime,
        ScalarKind::Date,
    ];

    #[test]
    fn test_every_kind_produces_matching_value() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = MockConfig::default();

        for kind in ALL_KINDS {
            let value = synthesize_primitive(kind, &mut rng, &config);
            assert!(kind.accepts(&value), "{} produced {:?}", kind.name(), value);
        }
    }

    #[test]
    fn test_int_uses_configured_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = MockConfig::default();

        for _ in 0..100 {
            let value = synthesize_primitive(ScalarKind::Int32, &mut rng, &config);
            let v = value.as_i64().unwrap();
            assert!((0..=100).contains(&v));
        }
    }

    #[test]
    fn test_enum_picks_declared_variant() {
        let mut rng = StdRng::seed_from_u64(42);
        let descriptor = EnumDescriptor::new("RoomType", vec!["Single", "Double", "Suite"]);

        for _ in 0..20 {
            if let MockValue::Enum(v) = synthesize_enum(&descriptor, &mut rng) {
                assert!(descriptor.variants.contains(&v));
            } else {
                panic!("Expected Enum value");
            }
        }

        let empty = EnumDescriptor::new("Never", vec![]);
        assert_eq!(synthesize_enum(&empty, &mut rng), MockValue::Null);
    }
}
