//! Client-side documents: the donations-overview CSV export and the
//! plain-text booking receipt. Both are generated locally, no server
//! round trip.

use std::fmt::Write;

use crate::models::{Booking, DonationCategory};

const CSV_HEADER: &str = "Title,English Title,Status,Suggested Amounts,Created Date";

/// CSV of the currently visible donation categories. Every field is
/// double-quoted; embedded quotes are doubled.
pub fn donations_overview_csv(rows: &[DonationCategory]) -> String {
    let mut out = String::from(CSV_HEADER);
    for category in rows {
        let amounts = category
            .suggested
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let status = if category.is_active {
            "Active"
        } else {
            "Inactive"
        };
        let created = category
            .created_at
            .map(|at| at.format("%d/%m/%Y").to_string())
            .unwrap_or_default();
        let fields = [
            quote(&category.title),
            quote(&category.english_title),
            quote(status),
            quote(&amounts),
            quote(&created),
        ];
        out.push('\n');
        out.push_str(&fields.join(","));
    }
    out
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Number of nights, rounded up so a partial day counts as a full night.
pub fn nights(booking: &Booking) -> i64 {
    let seconds = (booking.check_out - booking.check_in).num_seconds();
    if seconds <= 0 {
        0
    } else {
        (seconds as u64).div_ceil(86_400) as i64
    }
}

/// Render the printable receipt for a booking.
pub fn booking_receipt(booking: &Booking) -> String {
    let room_name = booking
        .room
        .as_ref()
        .map(|room| room.name.as_str())
        .unwrap_or("Room");
    let check_in = booking.check_in.format("%-d %B %Y");
    let check_out = booking.check_out.format("%-d %B %Y");

    let mut out = String::new();
    let _ = writeln!(out, "Ashram Receipt");
    let _ = writeln!(out, "Booking ID: {}", booking.id);
    let _ = writeln!(out);
    let _ = writeln!(out, "Guest Information");
    let _ = writeln!(out, "  Name:  {}", booking.guest_name);
    let _ = writeln!(out, "  Email: {}", booking.guest_email);
    let _ = writeln!(out, "  Phone: {}", booking.guest_phone);
    let _ = writeln!(out);
    let _ = writeln!(out, "Booking Details");
    let _ = writeln!(out, "  Room:   {room_name}");
    let _ = writeln!(out, "  Guests: {}", booking.guests);
    let _ = writeln!(out, "  Status: {}", booking.status.label());
    let _ = writeln!(out);
    let _ = writeln!(out, "Stay Duration");
    let _ = writeln!(out, "  Check-in:     {check_in}");
    let _ = writeln!(out, "  Check-out:    {check_out}");
    let _ = writeln!(out, "  Total Nights: {}", nights(booking));
    if let Some(notes) = booking.notes.as_deref().filter(|n| !n.is_empty()) {
        let _ = writeln!(out);
        let _ = writeln!(out, "Notes");
        let _ = writeln!(out, "  {notes}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Total Amount: {}", format_rupees(booking.total_price));
    let _ = writeln!(out);
    let _ = writeln!(out, "Thank you for choosing our ashram");
    let _ = write!(out, "For any queries, please contact us at admin@ashram.com");
    out
}

/// Rupee amount with thousands grouping, fraction shown only when present.
pub fn format_rupees(amount: f64) -> String {
    let mut whole = amount.trunc().abs() as u64;
    let mut fraction = (amount.fract().abs() * 100.0).round() as u64;
    if fraction >= 100 {
        whole += 1;
        fraction = 0;
    }
    if fraction == 0 {
        format!("₹{}", group_digits(whole))
    } else {
        format!("₹{}.{:02}", group_digits(whole), fraction)
    }
}

fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
