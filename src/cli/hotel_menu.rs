use tokio::io::{AsyncBufRead, AsyncWrite};
use crate::clients::HotelClient;
use crate::domain::{Guest, Room, Stay};
use super::{CliError, Console};

const MENU: &str = "
=== HOTEL RESERVATIONS ===
1) List rooms
2) Add room
3) Check availability
4) Book a room
5) List reservations
6) Change room rate
7) Cancel reservation
0) Back";

/// Runs the reservations menu until the user goes back.
pub async fn run<R, W>(console: &mut Console<R, W>, hotel: &HotelClient) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        console.say(MENU).await?;
        match console.ask("Select an option: ").await?.as_str() {
            "1" => match hotel.rooms().await {
                Ok(rooms) => {
                    console.say(format!("\nRooms at {}:", hotel.name())).await?;
                    if rooms.is_empty() {
                        console.say("- (no rooms)").await?;
                    }
                    for room in &rooms {
                        console
                            .say(format!("- #{} | {} | ${:.2}/night", room.number, room.kind, room.nightly_rate))
                            .await?;
                    }
                }
                Err(e) => console.say(format!("Error: {}", e)).await?,
            },
            "2" => {
                let number = console.read_u32("Room number: ").await?;
                let kind = console.read_text("Room type: ").await?;
                let rate = console.read_f64_min("Nightly rate (>=0): ", 0.0).await?;
                let outcome = match Room::new(number, kind, rate) {
                    Ok(room) => hotel.add_room(room).await.map(|n| format!("Room #{} added.", n)),
                    Err(e) => Err(e.into()),
                };
                match outcome {
                    Ok(message) => console.say(message).await?,
                    Err(e) => console.say(format!("Error: {}", e)).await?,
                }
            }
            "3" => {
                let number = console.read_u32("Room number: ").await?;
                let check_in = console.read_date("Check-in (YYYY-MM-DD): ").await?;
                let check_out = console.read_date("Check-out (YYYY-MM-DD): ").await?;
                let outcome = match Stay::new(check_in, check_out) {
                    Ok(stay) => hotel.is_available(number, stay).await,
                    Err(e) => Err(e.into()),
                };
                match outcome {
                    Ok(true) => console.say(format!("Room #{} is available.", number)).await?,
                    Ok(false) => console.say(format!("Room #{} is already booked for those dates.", number)).await?,
                    Err(e) => console.say(format!("Error: {}", e)).await?,
                }
            }
            "4" => book(console, hotel).await?,
            "5" => match hotel.reservations().await {
                Ok(reservations) => {
                    console.say(format!("\nReservations at {}:", hotel.name())).await?;
                    if reservations.is_empty() {
                        console.say("- (no reservations)").await?;
                    }
                    for r in &reservations {
                        console
                            .say(format!(
                                "- {} | {} | Room #{} ({}) | {} -> {} | {} nights | Total: ${:.2}{}",
                                r.id,
                                r.guest.name,
                                r.room.number,
                                r.room.kind,
                                r.stay.check_in(),
                                r.stay.check_out(),
                                r.nights(),
                                r.total_cost(),
                                if r.cancelled { " | CANCELLED" } else { "" }
                            ))
                            .await?;
                    }
                }
                Err(e) => console.say(format!("Error: {}", e)).await?,
            },
            "6" => {
                let number = console.read_u32("Room number: ").await?;
                let rate = console.read_f64_min("New nightly rate (>=0): ", 0.0).await?;
                match hotel.set_room_rate(number, rate).await {
                    Ok(room) => {
                        console
                            .say(format!("Room #{} now costs ${:.2}/night.", room.number, room.nightly_rate))
                            .await?
                    }
                    Err(e) => console.say(format!("Error: {}", e)).await?,
                }
            }
            "7" => {
                let id = console.read_text("Reservation ID: ").await?;
                match hotel.cancel(&id).await {
                    Ok(()) => console.say(format!("Reservation {} cancelled.", id.trim())).await?,
                    Err(e) => console.say(format!("Error: {}", e)).await?,
                }
            }
            "0" => return Ok(()),
            _ => console.say("Invalid option. Try again.").await?,
        }
    }
}

async fn book<R, W>(console: &mut Console<R, W>, hotel: &HotelClient) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let name = console.read_text("Guest name: ").await?;
    let national_id = console.read_text("Guest ID number: ").await?;
    let number = console.read_u32("Room number: ").await?;
    let check_in = console.read_date("Check-in (YYYY-MM-DD): ").await?;
    let check_out = console.read_date("Check-out (YYYY-MM-DD): ").await?;

    let outcome = match Guest::new(name, national_id) {
        Ok(guest) => hotel.book(guest, number, check_in, check_out).await,
        Err(e) => Err(e.into()),
    };
    match outcome {
        Ok(reservation) => {
            console
                .say(format!(
                    "Reservation {} created: {} nights, total ${:.2}.",
                    reservation.id,
                    reservation.nights(),
                    reservation.total_cost()
                ))
                .await
        }
        Err(e) => console.say(format!("Error: {}", e)).await,
    }
}
