use serde_json::json;

use ashram_admin::models::{DonationCategory, Room, extract_list};

#[test]
fn resource_key_envelope_is_unwrapped() {
    let body = json!({
        "rooms": [
            { "_id": "r1", "name": "Lotus Room", "price": 1200 }
        ]
    });

    let rooms: Vec<Room> = extract_list(body, "rooms").unwrap();

    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].id, "r1");
    assert_eq!(rooms[0].price, 1200.0);
}

#[test]
fn data_envelope_is_accepted_as_fallback() {
    let body = json!({
        "data": [
            { "_id": "d1", "title": "भोजन भंडार", "englishTitle": "Food Storage", "isActive": true }
        ]
    });

    let donations: Vec<DonationCategory> = extract_list(body, "donations").unwrap();

    assert_eq!(donations.len(), 1);
    assert_eq!(donations[0].english_title, "Food Storage");
}

#[test]
fn resource_key_wins_over_data_when_both_are_present() {
    let body = json!({
        "rooms": [{ "_id": "r1", "name": "Lotus Room", "price": 1200 }],
        "data": [{ "_id": "r2", "name": "Harmony Suite", "price": 2400 }]
    });

    let rooms: Vec<Room> = extract_list(body, "rooms").unwrap();

    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].id, "r1");
}

#[test]
fn missing_field_means_an_empty_list() {
    let body = json!({ "count": 0 });

    let rooms: Vec<Room> = extract_list(body, "rooms").unwrap();

    assert!(rooms.is_empty());
}

#[test]
fn a_bare_array_is_taken_as_is() {
    let body = json!([
        { "_id": "r1", "name": "Lotus Room", "price": 1200 }
    ]);

    let rooms: Vec<Room> = extract_list(body, "rooms").unwrap();

    assert_eq!(rooms.len(), 1);
}

#[test]
fn sparse_records_fill_defaults() {
    let body = json!({
        "rooms": [{ "_id": "r1", "name": "Lotus Room", "price": 1200 }]
    });

    let rooms: Vec<Room> = extract_list(body, "rooms").unwrap();

    let room = &rooms[0];
    assert_eq!(room.description, "");
    assert!(room.images.is_empty());
    assert_eq!(room.status, ashram_admin::models::RoomStatus::Available);
}
