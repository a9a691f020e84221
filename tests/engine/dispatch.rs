//! Runtime dispatch by type name, using the demo API models.

use api_mock::models::{Booking, GetHotelsResponse, Hotel};
use api_mock::mock_core::TypeHandle;
use api_mock::{demo_registry, MockConfig, MockError, MockFactory, MockValue, Mockable};

fn demo_factory() -> MockFactory {
    let config = MockConfig {
        seed: Some(crate::fixtures::SEED),
        nested_count: 4,
        ..MockConfig::default()
    };
    MockFactory::with_config(demo_registry(), config).unwrap()
}

#[test]
fn test_create_by_runtime_handle() {
    let factory = demo_factory();
    let handle = TypeHandle::of::<Booking>();

    let boxed = factory.create_mock_by_runtime_type(&handle, None).unwrap();
    let booking = boxed.downcast::<Booking>().unwrap();
    assert!((1..=4).contains(&booking.number_of_guests));
}

#[test]
fn test_create_by_type_name() {
    let factory = demo_factory();
    let boxed = factory.create_mock_by_type_name("Hotel", None).unwrap();
    let hotel = boxed.downcast_ref::<Hotel>().unwrap();
    assert_eq!(hotel.rooms.len(), 3);

    let typed: Hotel = factory.create_mock_by_type_name_as("Hotel", None).unwrap();
    assert!(typed.name.ends_with(" Hotel"));
}

#[test]
fn test_unknown_type_name_is_an_error() {
    let factory = demo_factory();
    let err = factory.create_mock_by_type_name("Spaceship", None).unwrap_err();
    assert!(matches!(err, MockError::UnknownType(ref name) if name == "Spaceship"));
    assert!(err.to_string().contains("Spaceship"));

    let err = factory.create_mock_by_type_name_as::<Hotel>("Booking", None).unwrap_err();
    assert!(matches!(err, MockError::InvalidType { registered: "Booking", .. }));
}

#[test]
fn test_value_by_name_serializes_to_json() {
    let factory = demo_factory();
    let value = factory.create_mock_value_by_name("Booking", None).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.type_name(), Booking::TYPE_NAME);

    let json = serde_json::to_value(&value).unwrap();
    assert!(json["primary_contact"]["email"].as_str().unwrap().contains('@'));
    assert!(json["room"]["room_number"].is_number());
}

#[test]
fn test_envelope_attachments_forced_absent() {
    let factory = demo_factory();
    let fields = factory.get_property_value_map::<GetHotelsResponse>(None);
    assert_eq!(fields["pagination"], MockValue::Null);
    assert_eq!(fields["links"], MockValue::Null);
    assert!(!fields["hotels"].is_empty());

    let response: GetHotelsResponse = factory.create_mock_object().unwrap();
    assert!(response.pagination.is_none());
    assert!(response.links.is_none());
}

#[test]
fn test_property_map_by_name() {
    let factory = demo_factory();
    let fields = factory.property_value_map_by_name("Contact", Some(2)).unwrap();
    assert_eq!(
        fields.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["id", "name", "email", "phone", "address", "city", "region", "postal_code"]
    );
    assert!(matches!(fields["id"], MockValue::Uuid(_)));
}
