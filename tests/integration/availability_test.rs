//! Integration tests for the availability search.

use roomhub_core::error::ErrorKind;
use roomhub_service::{CreateReservationRequest, RoomRef};

use crate::helpers::{self, TestBackend};

#[tokio::test]
async fn busy_rooms_drop_out_of_the_search() {
    let backend = TestBackend::new(helpers::monday(8, 0));
    let orion = backend.create_room("Orion", 15).await;
    let vega = backend.create_room("Vega", 15).await;

    backend
        .reservations
        .create_reservation(
            &helpers::employee("Alice"),
            CreateReservationRequest {
                room: RoomRef::Id(orion.id),
                title: "Standup".to_string(),
                start_time: helpers::monday(10, 0),
                end_time: helpers::monday(11, 0),
            },
        )
        .await
        .expect("booking should succeed");

    let free = backend
        .availability
        .search_available_rooms(helpers::monday(10, 30), helpers::monday(11, 30))
        .await
        .expect("search should succeed");
    assert_eq!(free.len(), 1);
    assert_eq!(free[0].id, vega.id);

    // A window that only touches the booking at its endpoint is free.
    let free = backend
        .availability
        .search_available_rooms(helpers::monday(11, 0), helpers::monday(12, 0))
        .await
        .expect("search should succeed");
    assert_eq!(free.len(), 2);
}

#[tokio::test]
async fn search_ignores_buffer_times() {
    // The search reports raw-interval availability. A window inside a
    // room's buffer still shows the room as free; the booking path is the
    // one that enforces the buffer.
    let backend = TestBackend::new(helpers::monday(8, 0));
    let orion = backend.create_room("Orion", 15).await;

    backend
        .reservations
        .create_reservation(
            &helpers::employee("Alice"),
            CreateReservationRequest {
                room: RoomRef::Id(orion.id),
                title: "Standup".to_string(),
                start_time: helpers::monday(10, 0),
                end_time: helpers::monday(11, 0),
            },
        )
        .await
        .expect("booking should succeed");

    let free = backend
        .availability
        .search_available_rooms(helpers::monday(11, 5), helpers::monday(11, 10))
        .await
        .expect("search should succeed");
    assert_eq!(free.len(), 1, "buffer must not affect the search");

    // The same window is still rejected by the booking path.
    let err = backend
        .reservations
        .create_reservation(
            &helpers::employee("Bob"),
            CreateReservationRequest {
                room: RoomRef::Id(orion.id),
                title: "Quick sync".to_string(),
                start_time: helpers::monday(11, 5),
                end_time: helpers::monday(11, 10),
            },
        )
        .await
        .expect_err("the buffer still applies when booking");
    assert_eq!(err.kind, ErrorKind::SlotUnavailable);
}

#[tokio::test]
async fn cancelled_reservations_do_not_occupy_rooms() {
    let backend = TestBackend::new(helpers::monday(8, 0));
    let orion = backend.create_room("Orion", 15).await;
    let alice = helpers::employee("Alice");

    let reservation = backend
        .reservations
        .create_reservation(
            &alice,
            CreateReservationRequest {
                room: RoomRef::Id(orion.id),
                title: "Standup".to_string(),
                start_time: helpers::monday(10, 0),
                end_time: helpers::monday(11, 0),
            },
        )
        .await
        .expect("booking should succeed");
    backend
        .reservations
        .cancel_reservation(&alice, reservation.id)
        .await
        .expect("cancellation should succeed");

    let free = backend
        .availability
        .search_available_rooms(helpers::monday(10, 0), helpers::monday(11, 0))
        .await
        .expect("search should succeed");
    assert_eq!(free.len(), 1);
}

#[tokio::test]
async fn deactivated_rooms_never_appear() {
    let backend = TestBackend::new(helpers::monday(8, 0));
    let orion = backend.create_room("Orion", 15).await;
    backend
        .rooms
        .deactivate_room(&helpers::admin(), orion.id)
        .await
        .expect("deactivation should succeed");

    let free = backend
        .availability
        .search_available_rooms(helpers::monday(10, 0), helpers::monday(11, 0))
        .await
        .expect("search should succeed");
    assert!(free.is_empty());
}

#[tokio::test]
async fn inverted_search_windows_are_rejected() {
    let backend = TestBackend::new(helpers::monday(8, 0));

    let err = backend
        .availability
        .search_available_rooms(helpers::monday(11, 0), helpers::monday(10, 0))
        .await
        .expect_err("inverted windows must be rejected");
    assert_eq!(err.kind, ErrorKind::InvalidInterval);
}
