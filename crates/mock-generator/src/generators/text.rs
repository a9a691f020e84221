//! Text generators backed by the `fake` crate.
//!
//! These produce the plausible strings used by the default property
//! conventions (names, contact details, addresses) and lorem-style words
//! for structural string fields.
//!
//! `fake` draws from the caller's RNG directly, so seeded synthesis stays
//! reproducible.

use fake::faker::address::en::{BuildingNumber, CityName, CountryName, StateName, StreetName, ZipCode};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::Rng;

/// A single lorem word.
pub fn word<R: Rng>(rng: &mut R) -> String {
    Word().fake_with_rng(rng)
}

/// A lorem sentence of 4 to 8 words.
pub fn sentence<R: Rng>(rng: &mut R) -> String {
    Sentence(4..9).fake_with_rng(rng)
}

pub fn full_name<R: Rng>(rng: &mut R) -> String {
    Name().fake_with_rng(rng)
}

pub fn first_name<R: Rng>(rng: &mut R) -> String {
    FirstName().fake_with_rng(rng)
}

pub fn last_name<R: Rng>(rng: &mut R) -> String {
    LastName().fake_with_rng(rng)
}

pub fn email<R: Rng>(rng: &mut R) -> String {
    SafeEmail().fake_with_rng(rng)
}

pub fn phone<R: Rng>(rng: &mut R) -> String {
    PhoneNumber().fake_with_rng(rng)
}

/// Street address, e.g. `"42 Elm Street"`.
pub fn street_address<R: Rng>(rng: &mut R) -> String {
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    format!("{number} {street}")
}

pub fn city<R: Rng>(rng: &mut R) -> String {
    CityName().fake_with_rng(rng)
}

pub fn region<R: Rng>(rng: &mut R) -> String {
    StateName().fake_with_rng(rng)
}

pub fn postal_code<R: Rng>(rng: &mut R) -> String {
    ZipCode().fake_with_rng(rng)
}

pub fn country<R: Rng>(rng: &mut R) -> String {
    CountryName().fake_with_rng(rng)
}

pub fn company_name<R: Rng>(rng: &mut R) -> String {
    CompanyName().fake_with_rng(rng)
}

/// A random lowercase ASCII letter.
pub fn letter<R: Rng>(rng: &mut R) -> char {
    char::from(b'a' + rng.random_range(0..26u8))
}
