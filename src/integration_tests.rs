#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::actor_framework::FrameworkError;
    use crate::app_system::InventorySystem;
    use crate::cli::{self, Console};
    use crate::clients::{HotelClient, ReservationClient, RoomClient};
    use crate::config::AppConfig;
    use crate::domain::{Guest, Reservation, Room};
    use crate::hotel::HotelError;
    use crate::mock_framework::{create_mock_client, expect_create, expect_get, expect_list};
    use crate::storage::{InventoryStore, JsonStore, StorageFormat};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, d).unwrap()
    }

    fn mocked_hotel() -> (
        HotelClient,
        tokio::sync::mpsc::Receiver<crate::actor_framework::ResourceRequest<Room>>,
        tokio::sync::mpsc::Receiver<crate::actor_framework::ResourceRequest<Reservation>>,
    ) {
        let (room_inner, room_rx) = create_mock_client::<Room>(10);
        let (reservation_inner, reservation_rx) = create_mock_client::<Reservation>(10);
        let hotel = HotelClient::new(
            "Mock Hotel",
            RoomClient::new(room_inner),
            ReservationClient::new(reservation_inner),
        );
        (hotel, room_rx, reservation_rx)
    }

    #[tokio::test]
    async fn test_booking_flow() {
        // 1. Setup Mocks
        let (hotel, mut room_rx, mut reservation_rx) = mocked_hotel();

        // 2. Execute booking in background
        let booking = tokio::spawn(async move {
            let guest = Guest::new("Ana", "0102030405").unwrap();
            hotel.book(guest, 101, day(1), day(5)).await
        });

        // 3. Verify Interactions

        // Expect Room Get
        let (number, responder) = expect_get(&mut room_rx).await.expect("Expected Room Get");
        assert_eq!(number, 101);
        responder.send(Ok(Some(Room::new(101, "Single", 25.0).unwrap()))).unwrap();

        // Expect Reservation Create
        let (payload, responder) = expect_create(&mut reservation_rx).await.expect("Expected Reservation Create");
        assert_eq!(payload.room.number, 101);
        assert_eq!(payload.guest.name, "Ana");
        assert_eq!(payload.stay.nights(), 4);
        responder.send(Ok("reservation_9".to_string())).unwrap();

        // 4. Verify Result
        let reservation = booking.await.unwrap().unwrap();
        assert_eq!(reservation.id, "reservation_9");
        assert_eq!(reservation.total_cost(), 100.0);
    }

    #[tokio::test]
    async fn test_booking_conflict_maps_to_unavailable() {
        let (hotel, mut room_rx, mut reservation_rx) = mocked_hotel();

        let booking = tokio::spawn(async move {
            let guest = Guest::new("Luis", "0911223344").unwrap();
            hotel.book(guest, 101, day(3), day(6)).await
        });

        let (_, responder) = expect_get(&mut room_rx).await.expect("Expected Room Get");
        responder.send(Ok(Some(Room::new(101, "Single", 25.0).unwrap()))).unwrap();

        let (_, responder) = expect_create(&mut reservation_rx).await.expect("Expected Reservation Create");
        responder.send(Err(FrameworkError::Conflict("room 101 is booked".to_string()))).unwrap();

        let result = booking.await.unwrap();
        assert_eq!(result, Err(HotelError::Unavailable("room 101 is booked".to_string())));
    }

    #[tokio::test]
    async fn test_unknown_room_never_reaches_reservations() {
        let (hotel, mut room_rx, mut reservation_rx) = mocked_hotel();

        let booking = tokio::spawn(async move {
            let guest = Guest::new("Luis", "0911223344").unwrap();
            hotel.book(guest, 404, day(3), day(6)).await
        });

        let (_, responder) = expect_get(&mut room_rx).await.expect("Expected Room Get");
        responder.send(Ok(None)).unwrap();

        assert_eq!(booking.await.unwrap(), Err(HotelError::UnknownRoom(404)));
        // The hotel client (and its senders) is gone, nothing was sent
        assert!(reservation_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_rooms_are_listed_by_number() {
        let (hotel, mut room_rx, _reservation_rx) = mocked_hotel();

        let listing = tokio::spawn(async move { hotel.rooms().await });

        let responder = expect_list(&mut room_rx).await.expect("Expected Room List");
        responder
            .send(Ok(vec![
                Room::new(201, "Suite", 60.0).unwrap(),
                Room::new(101, "Single", 25.0).unwrap(),
            ]))
            .unwrap();

        let numbers: Vec<u32> = listing.await.unwrap().unwrap().iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![101, 201]);
    }

    fn test_config(dir: &std::path::Path) -> AppConfig {
        AppConfig {
            inventory_format: StorageFormat::Json,
            inventory_path: dir.join("inventory.json"),
            autosave: false,
            hotel_name: "Hotel Test".to_string(),
            seed_rooms: true,
            log_level: "warn".to_string(),
        }
    }

    #[tokio::test]
    async fn test_console_session_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let (system, _) = InventorySystem::start(&config).await.unwrap();

        let script = [
            "1",                                   // inventory menu
            "1", "p1", "Rice", "3", "1.5",         // add
            "1", "p1",                             // duplicate id
            "3", "p1", "1", "10",                  // update quantity
            "4", "RIC",                            // search
            "6",                                   // summary
            "2", "zz",                             // remove missing
            "0",                                   // back, saves
            "2",                                   // hotel menu
            "4", "Ana", "0102", "101", "2025-12-01", "2025-12-05",
            "4", "Luis", "0911", "101", "2025-12-03", "2025-12-06",
            "4", "Luis", "0911", "101", "2025-12-05", "2025-12-06",
            "6", "102", "40",
            "7", "reservation_1",
            "7", "reservation_1",
            "5",
            "0",
            "0",
        ]
        .join("\n")
            + "\n";

        let mut console = Console::new(script.as_bytes(), Vec::new());
        cli::run(&mut console, &system.inventory_client, &system.hotel_client).await.unwrap();
        system.shutdown().await.unwrap();

        let out = String::from_utf8(console.into_writer()).unwrap();
        assert!(out.contains("Product added. Not saved yet"));
        assert!(out.contains("Error: that ID already exists. Product not added."));
        assert!(out.contains("Product updated."));
        assert!(out.contains("Found 1 product(s):"));
        assert!(out.contains("ID: p1 | Name: Rice | Quantity: 10 | Price: $1.50"));
        assert!(out.contains("Total units: 10"));
        assert!(out.contains("Total inventory value: $15.00"));
        assert!(out.contains("Error: Product not found: zz"));
        assert!(out.contains("Inventory saved."));
        assert!(out.contains("Reservation reservation_1 created: 4 nights, total $100.00."));
        assert!(out.contains("Error: Not available: room 101 is booked from 2025-12-01 to 2025-12-05"));
        assert!(out.contains("created: 1 nights, total $25.00."));
        assert!(out.contains("Room #102 now costs $40.00/night."));
        assert!(out.contains("Reservation reservation_1 cancelled."));
        assert!(out.contains("Error: Rejected: reservation_1 is already cancelled"));
        assert!(out.contains(
            "- reservation_1 | Ana | Room #101 (Single) | 2025-12-01 -> 2025-12-05 | 4 nights | Total: $100.00 | CANCELLED"
        ));

        let saved = JsonStore::new(&config.inventory_path).load().unwrap();
        assert_eq!(saved.products.len(), 1);
        assert_eq!(saved.products[0].quantity(), 10);
    }

    #[tokio::test]
    async fn test_end_of_input_still_saves() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let (system, _) = InventorySystem::start(&config).await.unwrap();

        let mut console = Console::new(&b"1\n1\np7\nSalt\n2\n0.75\n"[..], Vec::new());
        cli::run(&mut console, &system.inventory_client, &system.hotel_client).await.unwrap();
        system.shutdown().await.unwrap();

        let saved = JsonStore::new(&config.inventory_path).load().unwrap();
        assert_eq!(saved.products[0].id(), "p7");
    }
}
