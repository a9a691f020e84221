//! Demo API domain: a small hotel booking service.
//!
//! These are the request and response types a booking API would document.
//! [`demo_registry`] registers them together with the mock configuration the
//! API ships with.

use chrono::{DateTime, NaiveDate, Utc};
use mock_core::{mockable, Links, PaginationMetadata, Stack};
use mock_generator::{DictionaryValues, Faker, RuleRegistry};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use uuid::Uuid;

mockable! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct Contact {
        pub id: Uuid,
        pub name: String,
        pub email: String,
        pub phone: String,
        pub address: String,
        pub city: String,
        pub region: String,
        pub postal_code: String,
    }
}

mockable! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
    pub enum RoomType {
        #[default]
        Single,
        Double,
        Twin,
        Suite,
    }
}

mockable! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct Room {
        pub id: Uuid,
        pub room_number: i32,
        pub room_type: RoomType,
        pub beds: i16,
        pub nightly_rate: Decimal,
        pub amenities: HashSet<String>,
    }
}

mockable! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct Booking {
        pub id: Uuid,
        pub date_from: NaiveDate,
        pub date_to: NaiveDate,
        pub room: Room,
        pub primary_contact: Contact,
        pub number_of_guests: i32,
        pub notes: Option<String>,
    }
}

mockable! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct Hotel {
        pub id: Uuid,
        pub name: String,
        pub rooms: Vec<Room>,
        pub address: String,
        pub city: String,
        pub region: String,
        pub postal_code: String,
        pub country: String,
        pub phone: String,
        pub bookings: Vec<Booking>,
        pub coordinates: (f64, f64),
        pub metadata: HashMap<Uuid, String>,
    }
}

mockable! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct Appointment {
        pub id: Uuid,
        pub date_of_appointment: DateTime<Utc>,
        pub description: String,
        pub attendees: Vec<Contact>,
        pub reminders: VecDeque<DateTime<Utc>>,
        pub history: Stack<String>,
    }
}

mockable! {
    envelope
    /// Paged hotel listing.
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct GetHotelsResponse {
        pub hotels: Vec<Hotel>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub pagination: Option<PaginationMetadata>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub links: Option<Links>,
    }
}

/// Rooms generated per hotel.
pub const ROOMS_PER_HOTEL: usize = 3;

/// Registry with the default conventions, every demo type in the catalog,
/// and the per-type rules of the booking API.
pub fn demo_registry() -> Arc<RuleRegistry> {
    let registry = RuleRegistry::with_default_rules();

    registry.register_type::<Contact>();
    registry.register_type::<Room>();

    registry.configure::<Hotel>(|b| {
        b.for_property("name", |f: &mut Faker<'_>| {
            format!("{} Hotel", f.company_name())
        })
        .for_nested_object_list::<Room>("rooms", ROOMS_PER_HOTEL)
        .for_tuple(
            "coordinates",
            |f: &mut Faker<'_>| f.float_range(-90.0, 90.0),
            |f: &mut Faker<'_>| f.float_range(-180.0, 180.0),
        )
        .for_dictionary(
            "metadata",
            2,
            |f: &mut Faker<'_>| f.uuid(),
            DictionaryValues::generated(|f: &mut Faker<'_>| f.word()),
        )
    });

    registry.configure::<Booking>(|b| {
        b.for_property("number_of_guests", |f: &mut Faker<'_>| f.int_range(1, 4))
            .for_nested_object::<Contact>("primary_contact")
    });

    registry.configure::<Room>(|b| {
        b.for_property("room_number", |f: &mut Faker<'_>| f.int_range(100, 999))
            .for_property("beds", |f: &mut Faker<'_>| f.int_range(1, 3) as i16)
            .for_property("amenities", |f: &mut Faker<'_>| {
                let amenity = f.pick(&["wifi", "minibar", "balcony", "bathtub", "sea view"]);
                amenity.map(str::to_string)
            })
    });

    registry.configure::<Appointment>(|b| {
        b.for_property("description", |f: &mut Faker<'_>| f.sentence())
            .for_property("date_of_appointment", |f: &mut Faker<'_>| f.recent_timestamp())
    });

    registry.register_type::<GetHotelsResponse>();

    registry.into()
}
