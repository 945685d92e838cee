use chrono::{TimeZone, Utc};

use ashram_admin::models::{
    Booking, BookingStatus, DonationCategory, Room, RoomRef, RoomStatus,
};
use ashram_admin::sync::{StatusFilter, Synchronizer};

fn room(id: &str, name: &str, status: RoomStatus) -> Room {
    Room {
        id: id.into(),
        name: name.into(),
        description: format!("{name} with a garden view"),
        images: Vec::new(),
        price: 1200.0,
        discount: 0.0,
        beds: 1,
        max_guests: 2,
        amenities: Vec::new(),
        status,
    }
}

fn booking(id: &str, guest: &str, status: BookingStatus) -> Booking {
    Booking {
        id: id.into(),
        guest_name: guest.into(),
        guest_email: format!("{}@example.com", guest.to_lowercase().replace(' ', ".")),
        guest_phone: "9876500000".into(),
        guests: 2,
        check_in: Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap(),
        check_out: Utc.with_ymd_and_hms(2026, 3, 12, 10, 0, 0).unwrap(),
        total_price: 4800.0,
        status,
        room: Some(RoomRef {
            id: None,
            name: "Lotus Room".into(),
        }),
        notes: None,
    }
}

fn category(id: &str, title: &str, english: &str, active: bool) -> DonationCategory {
    DonationCategory {
        id: id.into(),
        title: title.into(),
        english_title: english.into(),
        description: format!("Support {english}"),
        suggested: vec![1000, 5000],
        icon: "heart".into(),
        color: "from-amber-500 to-orange-600".into(),
        is_active: active,
        created_at: None,
        updated_at: None,
    }
}

fn loaded(rows: Vec<Room>) -> Synchronizer<Room> {
    let mut sync = Synchronizer::new();
    let ticket = sync.begin_load();
    sync.finish_load(ticket, rows);
    sync
}

#[test]
fn search_matches_case_insensitively() {
    let mut sync = loaded(vec![
        room("r1", "Lotus Room", RoomStatus::Available),
        room("r2", "Harmony Suite", RoomStatus::Occupied),
    ]);

    sync.set_query("lotus");

    assert_eq!(sync.view().len(), 1);
    assert_eq!(sync.view()[0].name, "Lotus Room");
    assert_eq!(sync.view()[0].status, RoomStatus::Available);
}

#[test]
fn empty_query_and_all_filter_show_everything() {
    let mut sync = loaded(vec![
        room("r1", "Lotus Room", RoomStatus::Available),
        room("r2", "Harmony Suite", RoomStatus::Occupied),
        room("r3", "Peace Cottage", RoomStatus::Maintenance),
    ]);

    sync.set_query("");
    sync.set_status_filter(StatusFilter::All);

    assert_eq!(sync.view().len(), 3);
}

#[test]
fn status_filter_narrows_to_matching_records() {
    let mut sync = loaded(vec![
        room("r1", "Lotus Room", RoomStatus::Available),
        room("r2", "Harmony Suite", RoomStatus::Occupied),
        room("r3", "Peace Cottage", RoomStatus::Available),
    ]);

    sync.set_status_filter(StatusFilter::from_value("available"));

    assert_eq!(sync.view().len(), 2);
    assert!(
        sync.view()
            .iter()
            .all(|r| r.status == RoomStatus::Available)
    );
}

#[test]
fn query_and_status_combine() {
    let mut sync = loaded(vec![
        room("r1", "Lotus Room", RoomStatus::Available),
        room("r2", "Lotus Annex", RoomStatus::Occupied),
    ]);

    sync.set_query("lotus");
    sync.set_status_filter(StatusFilter::from_value("occupied"));

    assert_eq!(sync.view().len(), 1);
    assert_eq!(sync.view()[0].id, "r2");
}

#[test]
fn view_is_always_a_subset_of_the_collection() {
    let mut sync = loaded(vec![
        room("r1", "Lotus Room", RoomStatus::Available),
        room("r2", "Harmony Suite", RoomStatus::Occupied),
        room("r3", "River View", RoomStatus::Available),
    ]);

    sync.set_query("o");
    sync.set_status_filter(StatusFilter::from_value("available"));

    let record_ids: Vec<&str> = sync.records().iter().map(|r| r.id.as_str()).collect();
    for shown in sync.view() {
        assert!(record_ids.contains(&shown.id.as_str()));
    }
}

#[test]
fn repeating_the_same_filter_is_a_noop() {
    let mut sync = loaded(vec![
        room("r1", "Lotus Room", RoomStatus::Available),
        room("r2", "Harmony Suite", RoomStatus::Occupied),
    ]);

    sync.set_query("lotus");
    let first: Vec<String> = sync.view().iter().map(|r| r.id.clone()).collect();

    sync.set_query("lotus");
    sync.set_status_filter(StatusFilter::All);
    let second: Vec<String> = sync.view().iter().map(|r| r.id.clone()).collect();

    assert_eq!(first, second);
}

#[test]
fn stale_reload_response_is_discarded() {
    let mut sync = Synchronizer::new();

    let slow = sync.begin_load();
    let fast = sync.begin_load();

    assert!(sync.finish_load(fast, vec![room("r2", "Harmony Suite", RoomStatus::Occupied)]));
    assert!(!sync.finish_load(slow, vec![room("r1", "Lotus Room", RoomStatus::Available)]));

    assert_eq!(sync.records().len(), 1);
    assert_eq!(sync.records()[0].id, "r2");
}

#[test]
fn failed_reload_keeps_the_previous_collection() {
    let mut sync = loaded(vec![room("r1", "Lotus Room", RoomStatus::Available)]);

    let ticket = sync.begin_load();
    sync.fail_load(ticket);

    assert_eq!(sync.records().len(), 1);
    assert!(!sync.is_loading());
}

#[test]
fn loading_flag_tracks_the_latest_request() {
    let mut sync: Synchronizer<Room> = Synchronizer::new();
    assert!(sync.is_loading());

    let slow = sync.begin_load();
    let fast = sync.begin_load();

    // an older failure must not hide the newer in-flight request
    sync.fail_load(slow);
    assert!(sync.is_loading());

    sync.finish_load(fast, Vec::new());
    assert!(!sync.is_loading());
}

#[test]
fn booking_search_covers_guest_email_room_and_id() {
    let mut sync = Synchronizer::new();
    let ticket = sync.begin_load();
    sync.finish_load(
        ticket,
        vec![
            booking("BK1001", "Asha Rao", BookingStatus::Pending),
            booking("BK2002", "Vikram Nair", BookingStatus::Confirmed),
        ],
    );

    sync.set_query("asha.rao@");
    assert_eq!(sync.view().len(), 1);
    assert_eq!(sync.view()[0].id, "BK1001");

    sync.set_query("bk2002");
    assert_eq!(sync.view().len(), 1);
    assert_eq!(sync.view()[0].guest_name, "Vikram Nair");

    // both bookings reference the Lotus Room
    sync.set_query("lotus");
    assert_eq!(sync.view().len(), 2);
}

#[test]
fn donation_status_filter_maps_is_active() {
    let mut sync = Synchronizer::new();
    let ticket = sync.begin_load();
    sync.finish_load(
        ticket,
        vec![
            category("d1", "भोजन भंडार", "Food Storage", true),
            category("d2", "गौशाला", "Cow Shelter", false),
        ],
    );

    sync.set_status_filter(StatusFilter::from_value("active"));
    assert_eq!(sync.view().len(), 1);
    assert_eq!(sync.view()[0].id, "d1");

    sync.set_status_filter(StatusFilter::from_value("inactive"));
    assert_eq!(sync.view().len(), 1);
    assert_eq!(sync.view()[0].id, "d2");

    sync.set_status_filter(StatusFilter::All);
    assert_eq!(sync.view().len(), 2);
}

#[test]
fn donation_search_covers_both_titles() {
    let mut sync = Synchronizer::new();
    let ticket = sync.begin_load();
    sync.finish_load(
        ticket,
        vec![
            category("d1", "भोजन भंडार", "Food Storage", true),
            category("d2", "गौशाला", "Cow Shelter", true),
        ],
    );

    sync.set_query("भोजन");
    assert_eq!(sync.view().len(), 1);

    sync.set_query("cow shelter");
    assert_eq!(sync.view().len(), 1);
    assert_eq!(sync.view()[0].id, "d2");
}
