//! Derived display values.
//!
//! Consumers never format records themselves; they take the strings and view
//! structs built here. Everything in this module is total.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::DisplayConfig;
use crate::model::{AstronautRecord, MissionRecord};
use crate::resolver::{Flight, ResolvedCrewMember};

/// Render a mission's launch date, or the placeholder when it has none.
///
/// Never fails: a format chrono cannot render for a plain date falls back
/// to `yyyy-MM-dd` rather than panicking.
#[must_use]
pub fn formatted_launch_date(mission: &MissionRecord, display: &DisplayConfig) -> String {
    match mission.launch_date {
        Some(date) => format_date(date, &display.date_format),
        None => display.date_placeholder.clone(),
    }
}

fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut rendered = String::new();
    if write!(rendered, "{}", date.format(pattern)).is_ok() {
        rendered
    } else {
        date.format(crate::model::launch_date::FORMAT).to_string()
    }
}

/// One tile of the mission grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissionCard {
    /// Mission number.
    pub id: i64,
    /// Lowercase display name.
    pub display_name: String,
    /// Badge asset key.
    pub image: String,
    /// Rendered launch date or placeholder.
    pub launch_date: String,
}

impl MissionCard {
    /// Build the card for `mission`.
    #[must_use]
    pub fn new(mission: &MissionRecord, display: &DisplayConfig) -> Self {
        Self {
            id: mission.id,
            display_name: mission.display_name(),
            image: mission.image_key(),
            launch_date: formatted_launch_date(mission, display),
        }
    }
}

/// A crew line on the mission detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrewLine<'a> {
    /// Roster key, used for navigating to the astronaut.
    pub key: &'a str,
    /// Astronaut display name.
    pub name: &'a str,
    /// Role on this mission.
    pub role: &'a str,
    /// Portrait asset key.
    pub image: &'a str,
}

/// Everything the mission detail screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissionDetail<'a> {
    /// Mission number.
    pub id: i64,
    /// Capitalized title, e.g. `Apollo 11`.
    pub title: String,
    /// Badge asset key.
    pub image: String,
    /// Rendered launch date or placeholder.
    pub launch_date: String,
    /// Mission summary.
    pub description: &'a str,
    /// Crew in mission order.
    pub crew: Vec<CrewLine<'a>>,
}

impl<'a> MissionDetail<'a> {
    /// Build the detail view from a mission and its resolved crew.
    #[must_use]
    pub fn new(
        mission: &'a MissionRecord,
        crew: &[ResolvedCrewMember<'a>],
        display: &DisplayConfig,
    ) -> Self {
        Self {
            id: mission.id,
            title: mission.title(),
            image: mission.image_key(),
            launch_date: formatted_launch_date(mission, display),
            description: &mission.description,
            crew: crew
                .iter()
                .map(|member| CrewLine {
                    key: member.key,
                    name: &member.astronaut.name,
                    role: member.role,
                    image: member.astronaut.image_key(),
                })
                .collect(),
        }
    }
}

/// A mission line on the astronaut detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightLine<'a> {
    /// Mission number.
    pub mission: i64,
    /// Capitalized mission title.
    pub title: String,
    /// Role flown.
    pub role: &'a str,
    /// Rendered launch date or placeholder.
    pub launch_date: String,
}

/// Everything the astronaut detail screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AstronautDetail<'a> {
    /// Roster key.
    pub key: &'a str,
    /// Full name.
    pub name: &'a str,
    /// Portrait asset key.
    pub image: &'a str,
    /// Biography.
    pub description: &'a str,
    /// Missions flown, in catalog order.
    pub flights: Vec<FlightLine<'a>>,
}

impl<'a> AstronautDetail<'a> {
    /// Build the detail view for an astronaut and the flights they crewed.
    #[must_use]
    pub fn new(
        key: &'a str,
        astronaut: &'a AstronautRecord,
        flights: &[Flight<'a>],
        display: &DisplayConfig,
    ) -> Self {
        Self {
            key,
            name: &astronaut.name,
            image: astronaut.image_key(),
            description: &astronaut.description,
            flights: flights
                .iter()
                .map(|flight| FlightLine {
                    mission: flight.mission.id,
                    title: flight.mission.title(),
                    role: flight.role,
                    launch_date: formatted_launch_date(flight.mission, display),
                })
                .collect(),
        }
    }
}
