//! UUID value generator.

use mock_core::MockValue;
use rand::Rng;
use uuid::{Builder, Uuid};

/// Generate a random UUID v4 using the provided RNG.
pub fn generate_uuid_v4<R: Rng>(rng: &mut R) -> MockValue {
    MockValue::Uuid(random_uuid(rng))
}

/// Random UUID v4 with version and variant bits set.
pub fn random_uuid<R: Rng>(rng: &mut R) -> Uuid {
    let bytes = rng.random::<u128>().to_le_bytes();
    Builder::from_random_bytes(bytes).into_uuid()
}
