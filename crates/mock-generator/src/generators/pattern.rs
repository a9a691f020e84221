//! Pattern-based string generator.
//!
//! Supports placeholders:
//! - `{uuid}` - random UUID
//! - `{word}` - random lorem word
//! - `{rand:N}` - random N-digit number

use crate::generators::{text, uuid::random_uuid};
use mock_core::MockValue;
use rand::Rng;

/// Generate a string based on a pattern with placeholders.
pub fn generate_pattern<R: Rng>(pattern: &str, rng: &mut R) -> MockValue {
    let mut result = pattern.to_string();

    while result.contains("{uuid}") {
        result = result.replacen("{uuid}", &random_uuid(rng).to_string(), 1);
    }

    while result.contains("{word}") {
        result = result.replacen("{word}", &text::word(rng), 1);
    }

    // Replace {rand:N} patterns
    let mut search_from = 0;
    while let Some(offset) = result[search_from..].find("{rand:") {
        let start = search_from + offset;
        let Some(end) = result[start..].find('}').map(|end| start + end) else {
            break;
        };
        match result[start + 6..end].parse::<usize>() {
            Ok(digits) => {
                let random_num = generate_random_digits(rng, digits);
                result = format!("{}{}{}", &result[..start], random_num, &result[end + 1..]);
                search_from = start + random_num.len();
            }
            // Invalid format, leave it in place
            Err(_) => search_from = end + 1,
        }
    }

    MockValue::String(result)
}

/// Generate a random number with exactly N digits.
fn generate_random_digits<R: Rng>(rng: &mut R, digits: usize) -> String {
    if digits == 0 {
        return String::new();
    }

    let mut result = String::with_capacity(digits);

    // First digit should be 1-9 to avoid leading zeros
    result.push(char::from(b'0' + rng.random_range(1..10u8)));

    for _ in 1..digits {
        result.push(char::from(b'0' + rng.random_range(0..10u8)));
    }

    result
}
