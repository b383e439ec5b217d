//! Crew resolution.
//!
//! Joins a mission's crew-role entries to roster records. Resolution is pure
//! and all-or-nothing: the first crew name that does not resolve fails the
//! whole mission, and no placeholder astronaut is ever substituted.

use serde::Serialize;
use tracing::trace;

use crate::error::{Error, Result};
use crate::model::{AstronautRecord, MissionRecord};
use crate::roster::Roster;

/// A crew-role entry matched to its roster record.
///
/// Borrows from the mission and the roster; it never owns an astronaut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedCrewMember<'a> {
    /// Roster key the crew name resolved to.
    pub key: &'a str,
    /// Role on the mission.
    pub role: &'a str,
    /// The matched astronaut.
    pub astronaut: &'a AstronautRecord,
}

/// One mission an astronaut flew, with the role they held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flight<'a> {
    /// The mission.
    pub mission: &'a MissionRecord,
    /// Role held on it.
    pub role: &'a str,
}

/// Resolve a mission's crew against the roster, preserving crew order.
///
/// # Errors
///
/// Returns [`Error::UnknownCrewMember`] naming the first crew entry with no
/// roster match.
pub fn resolve_crew<'a>(
    mission: &'a MissionRecord,
    roster: &'a Roster,
) -> Result<Vec<ResolvedCrewMember<'a>>> {
    mission
        .crew
        .iter()
        .map(|entry| {
            let (key, astronaut) = roster
                .get_key_value(&entry.name)
                .ok_or_else(|| Error::unknown_crew_member(mission.id, &entry.name))?;
            trace!(mission = mission.id, name = %entry.name, key, "Resolved crew member");
            Ok::<_, Error>(ResolvedCrewMember {
                key,
                role: &entry.role,
                astronaut,
            })
        })
        .collect()
}

/// Resolve every mission's crew, failing on the first dangling reference.
///
/// Missions are checked in order, so the error always names the earliest
/// broken mission.
///
/// # Errors
///
/// Returns [`Error::UnknownCrewMember`] for the first unresolved crew name.
pub fn validate_crew(missions: &[MissionRecord], roster: &Roster) -> Result<()> {
    for mission in missions {
        resolve_crew(mission, roster)?;
    }
    Ok(())
}

/// The missions an astronaut crewed, in mission-list order.
///
/// `key` is matched against crew names with the roster's policy, so a
/// normalized roster finds entries whose spelling differs from the key.
#[must_use]
pub fn missions_for<'a>(
    key: &str,
    missions: &'a [MissionRecord],
    roster: &Roster,
) -> Vec<Flight<'a>> {
    let matching = roster.matching();
    let wanted = matching.key(key);
    let wanted = wanted.as_ref();
    missions
        .iter()
        .flat_map(move |mission| {
            mission
                .crew
                .iter()
                .filter(move |entry| matching.key(&entry.name) == wanted)
                .map(move |entry| Flight {
                    mission,
                    role: &entry.role,
                })
        })
        .collect()
}
