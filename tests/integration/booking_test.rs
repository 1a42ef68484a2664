//! Integration tests for reservation creation and cancellation.

use roomhub_core::error::ErrorKind;
use roomhub_entity::reservation::{ReservationFilter, ReservationStatus};
use roomhub_service::{CreateReservationRequest, RoomRef};

use crate::helpers::{self, TestBackend};

#[tokio::test]
async fn buffer_time_shifts_the_next_legal_slot() {
    let backend = TestBackend::new(helpers::monday(8, 0));
    let room = backend.create_room("Orion", 15).await;
    let alice = helpers::employee("Alice");

    // 10:00-11:00 goes through on an empty calendar.
    backend
        .reservations
        .create_reservation(
            &alice,
            CreateReservationRequest {
                room: RoomRef::Id(room.id),
                title: "Sprint planning".to_string(),
                start_time: helpers::monday(10, 0),
                end_time: helpers::monday(11, 0),
            },
        )
        .await
        .expect("first booking should succeed");

    // 11:10 starts inside the 15-minute buffer after the first booking.
    let err = backend
        .reservations
        .create_reservation(
            &alice,
            CreateReservationRequest {
                room: RoomRef::Id(room.id),
                title: "Retro".to_string(),
                start_time: helpers::monday(11, 10),
                end_time: helpers::monday(12, 0),
            },
        )
        .await
        .expect_err("booking inside the buffer must be rejected");

    assert_eq!(err.kind, ErrorKind::SlotUnavailable);
    assert_eq!(err.next_available(), Some(helpers::monday(11, 15)));

    // Starting exactly when the buffer expires is legal.
    backend
        .reservations
        .create_reservation(
            &alice,
            CreateReservationRequest {
                room: RoomRef::Id(room.id),
                title: "Retro".to_string(),
                start_time: helpers::monday(11, 15),
                end_time: helpers::monday(12, 0),
            },
        )
        .await
        .expect("booking at the buffer boundary should succeed");
}

#[tokio::test]
async fn zero_buffer_rooms_allow_back_to_back_meetings() {
    let backend = TestBackend::new(helpers::monday(8, 0));
    let room = backend.create_room("Phone Booth", 0).await;
    let alice = helpers::employee("Alice");

    for (start, end) in [(9, 10), (10, 11)] {
        backend
            .reservations
            .create_reservation(
                &alice,
                CreateReservationRequest {
                    room: RoomRef::Id(room.id),
                    title: format!("Call {start}"),
                    start_time: helpers::monday(start, 0),
                    end_time: helpers::monday(end, 0),
                },
            )
            .await
            .expect("abutting bookings with zero buffer should succeed");
    }
}

#[tokio::test]
async fn concurrent_requests_for_one_slot_have_a_single_winner() {
    let backend = TestBackend::new(helpers::monday(8, 0));
    let room = backend.create_room("Orion", 15).await;

    // Everyone races for the same window; the room lock serializes the
    // check-then-insert so exactly one claim lands.
    let mut handles = Vec::new();
    for i in 0..8 {
        let service = backend.reservations.clone();
        let caller = helpers::employee(&format!("Racer {i}"));
        let room_id = room.id;
        handles.push(tokio::spawn(async move {
            service
                .create_reservation(
                    &caller,
                    CreateReservationRequest {
                        room: RoomRef::Id(room_id),
                        title: format!("Claim {i}"),
                        start_time: helpers::monday(10, 0),
                        end_time: helpers::monday(11, 0),
                    },
                )
                .await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.expect("task should not panic") {
            Ok(_) => winners += 1,
            Err(err) => assert_eq!(err.kind, ErrorKind::SlotUnavailable),
        }
    }
    assert_eq!(winners, 1);

    let all = backend
        .reservations
        .list_reservations(&helpers::admin(), ReservationFilter::default())
        .await
        .expect("listing should succeed");
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn bookings_in_the_past_are_rejected() {
    let backend = TestBackend::new(helpers::monday(12, 0));
    let room = backend.create_room("Orion", 15).await;

    let err = backend
        .reservations
        .create_reservation(
            &helpers::employee("Alice"),
            CreateReservationRequest {
                room: RoomRef::Id(room.id),
                title: "Time travel".to_string(),
                start_time: helpers::monday(10, 0),
                end_time: helpers::monday(11, 0),
            },
        )
        .await
        .expect_err("retroactive bookings must be rejected");

    assert_eq!(err.kind, ErrorKind::PastBooking);
}

#[tokio::test]
async fn degenerate_intervals_are_rejected() {
    let backend = TestBackend::new(helpers::monday(8, 0));
    let room = backend.create_room("Orion", 15).await;

    let err = backend
        .reservations
        .create_reservation(
            &helpers::employee("Alice"),
            CreateReservationRequest {
                room: RoomRef::Id(room.id),
                title: "Zero width".to_string(),
                start_time: helpers::monday(10, 0),
                end_time: helpers::monday(10, 0),
            },
        )
        .await
        .expect_err("start == end must be rejected");

    assert_eq!(err.kind, ErrorKind::InvalidInterval);
}

#[tokio::test]
async fn empty_titles_are_rejected() {
    let backend = TestBackend::new(helpers::monday(8, 0));
    let room = backend.create_room("Orion", 15).await;

    let err = backend
        .reservations
        .create_reservation(
            &helpers::employee("Alice"),
            CreateReservationRequest {
                room: RoomRef::Id(room.id),
                title: "   ".to_string(),
                start_time: helpers::monday(10, 0),
                end_time: helpers::monday(11, 0),
            },
        )
        .await
        .expect_err("whitespace-only titles must be rejected");

    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn rooms_resolve_by_name_case_insensitively() {
    let backend = TestBackend::new(helpers::monday(8, 0));
    let room = backend.create_room("Orion", 15).await;

    let reservation = backend
        .reservations
        .create_reservation(
            &helpers::employee("Alice"),
            CreateReservationRequest {
                room: RoomRef::Name("oRiOn".to_string()),
                title: "1:1".to_string(),
                start_time: helpers::monday(10, 0),
                end_time: helpers::monday(11, 0),
            },
        )
        .await
        .expect("name lookup should ignore case");

    assert_eq!(reservation.room_id, room.id);
    assert_eq!(reservation.status, ReservationStatus::Approved);
}

#[tokio::test]
async fn unknown_and_inactive_rooms_are_rejected() {
    let backend = TestBackend::new(helpers::monday(8, 0));
    let admin = helpers::admin();
    let room = backend.create_room("Orion", 15).await;
    backend
        .rooms
        .deactivate_room(&admin, room.id)
        .await
        .expect("deactivation should succeed");

    let err = backend
        .reservations
        .create_reservation(
            &helpers::employee("Alice"),
            CreateReservationRequest {
                room: RoomRef::Name("Atlantis".to_string()),
                title: "Offsite".to_string(),
                start_time: helpers::monday(10, 0),
                end_time: helpers::monday(11, 0),
            },
        )
        .await
        .expect_err("unknown room names must be rejected");
    assert_eq!(err.kind, ErrorKind::RoomNotFound);

    // Booking the deactivated room by id surfaces its inactive state.
    let err = backend
        .reservations
        .create_reservation(
            &helpers::employee("Alice"),
            CreateReservationRequest {
                room: RoomRef::Id(room.id),
                title: "Offsite".to_string(),
                start_time: helpers::monday(10, 0),
                end_time: helpers::monday(11, 0),
            },
        )
        .await
        .expect_err("inactive rooms must be rejected");
    assert_eq!(err.kind, ErrorKind::RoomInactive);
}

#[tokio::test]
async fn cancellation_respects_ownership() {
    let backend = TestBackend::new(helpers::monday(8, 0));
    let room = backend.create_room("Orion", 15).await;
    let alice = helpers::employee("Alice");
    let bob = helpers::employee("Bob");

    let reservation = backend
        .reservations
        .create_reservation(
            &alice,
            CreateReservationRequest {
                room: RoomRef::Id(room.id),
                title: "Design review".to_string(),
                start_time: helpers::monday(10, 0),
                end_time: helpers::monday(11, 0),
            },
        )
        .await
        .expect("booking should succeed");

    // A stranger cannot cancel it.
    let err = backend
        .reservations
        .cancel_reservation(&bob, reservation.id)
        .await
        .expect_err("non-owner cancellation must be rejected");
    assert_eq!(err.kind, ErrorKind::Forbidden);

    // The owner can.
    let cancelled = backend
        .reservations
        .cancel_reservation(&alice, reservation.id)
        .await
        .expect("owner cancellation should succeed");
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);

    // Cancellation is terminal.
    let err = backend
        .reservations
        .cancel_reservation(&alice, reservation.id)
        .await
        .expect_err("double cancellation must be rejected");
    assert_eq!(err.kind, ErrorKind::AlreadyCancelled);
}

#[tokio::test]
async fn admins_may_cancel_any_reservation() {
    let backend = TestBackend::new(helpers::monday(8, 0));
    let room = backend.create_room("Orion", 15).await;

    let reservation = backend
        .reservations
        .create_reservation(
            &helpers::employee("Alice"),
            CreateReservationRequest {
                room: RoomRef::Id(room.id),
                title: "All hands".to_string(),
                start_time: helpers::monday(10, 0),
                end_time: helpers::monday(11, 0),
            },
        )
        .await
        .expect("booking should succeed");

    let cancelled = backend
        .reservations
        .cancel_reservation(&helpers::admin(), reservation.id)
        .await
        .expect("admin cancellation should succeed");
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
}

#[tokio::test]
async fn cancelled_reservations_free_their_slot() {
    let backend = TestBackend::new(helpers::monday(8, 0));
    let room = backend.create_room("Orion", 15).await;
    let alice = helpers::employee("Alice");

    let reservation = backend
        .reservations
        .create_reservation(
            &alice,
            CreateReservationRequest {
                room: RoomRef::Id(room.id),
                title: "Original".to_string(),
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

    // The identical window is bookable again, buffer included.
    backend
        .reservations
        .create_reservation(
            &helpers::employee("Bob"),
            CreateReservationRequest {
                room: RoomRef::Id(room.id),
                title: "Replacement".to_string(),
                start_time: helpers::monday(10, 0),
                end_time: helpers::monday(11, 0),
            },
        )
        .await
        .expect("cancelled reservations must not block the slot");
}

#[tokio::test]
async fn non_admins_only_ever_list_their_own_reservations() {
    let backend = TestBackend::new(helpers::monday(8, 0));
    let room = backend.create_room("Orion", 0).await;
    let alice = helpers::employee("Alice");
    let bob = helpers::employee("Bob");

    for (who, hour) in [(&alice, 9), (&bob, 10)] {
        backend
            .reservations
            .create_reservation(
                who,
                CreateReservationRequest {
                    room: RoomRef::Id(room.id),
                    title: format!("Meeting at {hour}"),
                    start_time: helpers::monday(hour, 0),
                    end_time: helpers::monday(hour + 1, 0),
                },
            )
            .await
            .expect("booking should succeed");
    }

    // Bob asks for Alice's reservations; the filter is overridden.
    let listed = backend
        .reservations
        .list_reservations(
            &bob,
            ReservationFilter {
                requester_id: Some(alice.user_id),
                ..Default::default()
            },
        )
        .await
        .expect("listing should succeed");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].requester_id, bob.user_id);

    // An admin with no filter sees everything.
    let all = backend
        .reservations
        .list_reservations(&helpers::admin(), ReservationFilter::default())
        .await
        .expect("listing should succeed");
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn listings_honor_room_status_and_date_range_filters() {
    let backend = TestBackend::new(helpers::monday(8, 0));
    let orion = backend.create_room("Orion", 0).await;
    let vega = backend.create_room("Vega", 0).await;
    let alice = helpers::employee("Alice");
    let admin = helpers::admin();

    let mut booked = Vec::new();
    for (room_id, title, start, end) in [
        (orion.id, "Orion morning", 9, 10),
        (orion.id, "Orion noon", 12, 13),
        (vega.id, "Vega morning", 9, 10),
    ] {
        let reservation = backend
            .reservations
            .create_reservation(
                &alice,
                CreateReservationRequest {
                    room: RoomRef::Id(room_id),
                    title: title.to_string(),
                    start_time: helpers::monday(start, 0),
                    end_time: helpers::monday(end, 0),
                },
            )
            .await
            .expect("booking should succeed");
        booked.push(reservation);
    }
    let (orion_morning, orion_noon, vega_morning) = (&booked[0], &booked[1], &booked[2]);

    backend
        .reservations
        .cancel_reservation(&alice, vega_morning.id)
        .await
        .expect("cancellation should succeed");

    // Room filter alone.
    let listed = backend
        .reservations
        .list_reservations(
            &admin,
            ReservationFilter {
                room_id: Some(orion.id),
                ..Default::default()
            },
        )
        .await
        .expect("listing should succeed");
    assert_eq!(listed.len(), 2);

    // Date range narrows the room's listing to the noon booking.
    let listed = backend
        .reservations
        .list_reservations(
            &admin,
            ReservationFilter {
                room_id: Some(orion.id),
                starts_from: Some(helpers::monday(11, 0)),
                starts_until: Some(helpers::monday(14, 0)),
                ..Default::default()
            },
        )
        .await
        .expect("listing should succeed");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, orion_noon.id);

    // Every field populated at once.
    let listed = backend
        .reservations
        .list_reservations(
            &admin,
            ReservationFilter {
                requester_id: Some(alice.user_id),
                room_id: Some(orion.id),
                status: Some(ReservationStatus::Approved),
                starts_from: Some(helpers::monday(8, 0)),
                starts_until: Some(helpers::monday(10, 0)),
            },
        )
        .await
        .expect("listing should succeed");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, orion_morning.id);

    // Status filter alone finds the cancelled booking.
    let listed = backend
        .reservations
        .list_reservations(
            &admin,
            ReservationFilter {
                status: Some(ReservationStatus::Cancelled),
                ..Default::default()
            },
        )
        .await
        .expect("listing should succeed");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, vega_morning.id);
}

#[tokio::test]
async fn bookings_and_cancellations_are_audited() {
    let backend = TestBackend::new(helpers::monday(8, 0));
    let room = backend.create_room("Orion", 15).await;
    let alice = helpers::employee("Alice");

    let reservation = backend
        .reservations
        .create_reservation(
            &alice,
            CreateReservationRequest {
                room: RoomRef::Id(room.id),
                title: "Audited".to_string(),
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

    let events = backend.audit.events().await;
    let actions: Vec<&str> = events.iter().map(|e| e.action.as_str()).collect();
    assert!(actions.contains(&"CREATE_RESERVATION"));
    assert!(actions.contains(&"CANCEL_RESERVATION"));

    let create_event = events
        .iter()
        .find(|e| e.action.as_str() == "CREATE_RESERVATION")
        .expect("creation event present");
    assert_eq!(create_event.actor_id, alice.user_id);
    assert_eq!(create_event.target_id, Some(reservation.id));
}
