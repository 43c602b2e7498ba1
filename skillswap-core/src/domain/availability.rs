//! Availability value objects

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Day of the week, serialized with its full English name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Day::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().to_lowercase() == wanted || d.as_str()[..3].to_lowercase() == wanted)
            .ok_or_else(|| format!("unknown day: {}", s))
    }
}

/// One of the four bookable time slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "Morning (8am-12pm)")]
    Morning,
    #[serde(rename = "Afternoon (12pm-5pm)")]
    Afternoon,
    #[serde(rename = "Evening (5pm-9pm)")]
    Evening,
    #[serde(rename = "Night (9pm-12am)")]
    Night,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
        TimeSlot::Night,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "Morning (8am-12pm)",
            TimeSlot::Afternoon => "Afternoon (12pm-5pm)",
            TimeSlot::Evening => "Evening (5pm-9pm)",
            TimeSlot::Night => "Night (9pm-12am)",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeSlot {
    type Err = String;

    /// Accepts the short name ("morning") or the full label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TimeSlot::ALL
            .iter()
            .copied()
            .find(|t| {
                let label = t.label().to_lowercase();
                label == wanted || label.split(' ').next() == Some(wanted.as_str())
            })
            .ok_or_else(|| format!("unknown time slot: {}", s))
    }
}

/// A (day, time slot) a member is available for swaps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub id: String,
    pub day: Day,
    pub time_slot: TimeSlot,
}

impl Availability {
    pub fn new(day: Day, time_slot: TimeSlot) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            day,
            time_slot,
        }
    }

    pub fn same_slot(&self, day: Day, time_slot: TimeSlot) -> bool {
        self.day == day && self.time_slot == time_slot
    }
}

/// Return a new list with (day, slot) appended, unless it is already present.
/// The second element reports whether anything was added.
pub fn with_availability(
    current: &[Availability],
    day: Day,
    time_slot: TimeSlot,
) -> (Vec<Availability>, bool) {
    let mut next = current.to_vec();
    if current.iter().any(|a| a.same_slot(day, time_slot)) {
        return (next, false);
    }
    next.push(Availability::new(day, time_slot));
    (next, true)
}

/// Return a new list without the entry with the given id
pub fn without_availability(current: &[Availability], id: &str) -> Vec<Availability> {
    current.iter().filter(|a| a.id != id).cloned().collect()
}
