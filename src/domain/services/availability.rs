use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use crate::domain::models::booking::Booking;

/// A half-open `[start, end)` interval in minutes since midnight,
/// derived per query from the bookings of a single date. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedRange {
    pub start_min: i32,
    pub end_min: i32,
}

pub fn time_to_minutes(time: &str) -> Option<i32> {
    let t = NaiveTime::parse_from_str(time, "%H:%M").ok()?;
    Some((t.hour() * 60 + t.minute()) as i32)
}

pub fn booked_ranges(bookings: &[Booking]) -> Vec<BookedRange> {
    bookings.iter()
        .filter_map(|b| {
            let start_min = time_to_minutes(&b.time)?;
            Some(BookedRange { start_min, end_min: start_min + b.duration_total })
        })
        .collect()
}

/// Standard half-open overlap test: the slot is taken iff some booked
/// `[s,e)` satisfies `start < e && end > s`. Touching endpoints are fine,
/// so back-to-back sessions are allowed. A zero duration never overlaps
/// anything and is therefore always available.
pub fn is_slot_available(candidate_start_min: i32, duration_min: i32, booked: &[BookedRange]) -> bool {
    let candidate_end_min = candidate_start_min + duration_min;
    !booked.iter().any(|range| {
        candidate_start_min < range.end_min && candidate_end_min > range.start_min
    })
}

/// Bookable grid for a date in 30-minute steps: 09:00-20:00 on weekends,
/// 10:00-19:00 on weekdays. The closing hour is exclusive, so the last
/// slot starts half an hour before it.
pub fn generate_time_slots(date: NaiveDate) -> Vec<String> {
    let is_weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
    let (start_hour, end_hour) = if is_weekend { (9, 20) } else { (10, 19) };

    let mut slots = Vec::with_capacity(((end_hour - start_hour) * 2) as usize);
    for hour in start_hour..end_hour {
        slots.push(format!("{:02}:00", hour));
        slots.push(format!("{:02}:30", hour));
    }
    slots
}
