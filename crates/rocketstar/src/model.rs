//! Catalog record types.
//!
//! These mirror the two bundled JSON documents field for field. Records are
//! immutable once decoded; the roster owns astronauts and the catalog owns
//! missions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An astronaut as described by the roster document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstronautRecord {
    /// Stable identifier, also used as the portrait asset name.
    pub id: String,
    /// Human-readable full name.
    pub name: String,
    /// Free-text biography.
    pub description: String,
}

impl AstronautRecord {
    /// Asset key for this astronaut's portrait.
    #[must_use]
    pub fn image_key(&self) -> &str {
        &self.id
    }
}

/// One crew slot on a mission, before resolution against the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewRoleEntry {
    /// Roster key of the astronaut filling this slot.
    pub name: String,
    /// Role label, e.g. "Commander".
    pub role: String,
}

/// A mission as described by the mission document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionRecord {
    /// Apollo mission number.
    pub id: i64,
    /// Launch date, when one was recorded.
    #[serde(default, with = "launch_date")]
    pub launch_date: Option<NaiveDate>,
    /// Crew in display order.
    pub crew: Vec<CrewRoleEntry>,
    /// Free-text mission summary.
    pub description: String,
}

impl MissionRecord {
    /// Lowercase display name, e.g. `apollo 11`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("apollo {}", self.id)
    }

    /// Asset key for the mission badge, e.g. `apollo11`.
    #[must_use]
    pub fn image_key(&self) -> String {
        format!("apollo{}", self.id)
    }

    /// Display name with each word capitalized, e.g. `Apollo 11`.
    #[must_use]
    pub fn title(&self) -> String {
        self.display_name()
            .split(' ')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether a launch date was recorded.
    #[must_use]
    pub fn has_launched(&self) -> bool {
        self.launch_date.is_some()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Serde adapter for the `yyyy-MM-dd` launch date field.
///
/// `null` and a missing field both decode to `None`. Any other string must
/// match the pattern exactly or the whole document fails to decode.
pub mod launch_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// The only accepted date layout.
    pub const FORMAT: &str = "%Y-%m-%d";

    /// Parse a single date string in [`FORMAT`].
    ///
    /// # Errors
    ///
    /// Returns the chrono parse error if `value` is not a `yyyy-MM-dd` date.
    pub fn parse(value: &str) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(value, FORMAT)
    }

    /// Serialize an optional date as `yyyy-MM-dd` or `null`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::ref_option)]
    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional `yyyy-MM-dd` date.
    ///
    /// # Errors
    ///
    /// Fails if the value is neither `null` nor a well-formed date string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(value) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        parse(&value)
            .map(Some)
            .map_err(|err| de::Error::custom(format!("invalid launch date '{value}': {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apollo_11() -> MissionRecord {
        MissionRecord {
            id: 11,
            launch_date: NaiveDate::from_ymd_opt(1969, 7, 16),
            crew: vec![CrewRoleEntry {
                name: "armstrong".to_string(),
                role: "Commander".to_string(),
            }],
            description: "First crewed lunar landing.".to_string(),
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(apollo_11().display_name(), "apollo 11");
    }

    #[test]
    fn test_image_key() {
        assert_eq!(apollo_11().image_key(), "apollo11");
    }

    #[test]
    fn test_title() {
        assert_eq!(apollo_11().title(), "Apollo 11");
    }

    #[test]
    fn test_astronaut_image_key() {
        let astronaut = AstronautRecord {
            id: "armstrong".to_string(),
            name: "Neil A. Armstrong".to_string(),
            description: String::new(),
        };
        assert_eq!(astronaut.image_key(), "armstrong");
    }

    #[test]
    fn test_mission_deserialize() {
        let json = r#"{
            "id": 11,
            "launchDate": "1969-07-16",
            "crew": [{"name": "armstrong", "role": "Commander"}],
            "description": "First crewed lunar landing."
        }"#;
        let mission: MissionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(mission, apollo_11());
        assert!(mission.has_launched());
    }

    #[test]
    fn test_mission_negative_id() {
        let json = r#"{"id": -1, "crew": [], "description": ""}"#;
        let mission: MissionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(mission.id, -1);
        assert_eq!(mission.display_name(), "apollo -1");
    }

    #[test]
    fn test_mission_null_launch_date() {
        let json = r#"{"id": 1, "launchDate": null, "crew": [], "description": ""}"#;
        let mission: MissionRecord = serde_json::from_str(json).unwrap();
        assert!(mission.launch_date.is_none());
        assert!(!mission.has_launched());
    }

    #[test]
    fn test_mission_missing_launch_date() {
        let json = r#"{"id": 1, "crew": [], "description": ""}"#;
        let mission: MissionRecord = serde_json::from_str(json).unwrap();
        assert!(mission.launch_date.is_none());
    }

    #[test]
    fn test_mission_malformed_launch_date() {
        let json = r#"{"id": 11, "launchDate": "07/16/1969", "crew": [], "description": ""}"#;
        let err = serde_json::from_str::<MissionRecord>(json).unwrap_err();
        assert!(err.is_data());
        assert!(err.to_string().contains("07/16/1969"));
    }

    #[test]
    fn test_mission_launch_date_with_time_rejected() {
        let json =
            r#"{"id": 11, "launchDate": "1969-07-16T13:32:00Z", "crew": [], "description": ""}"#;
        assert!(serde_json::from_str::<MissionRecord>(json).is_err());
    }

    #[test]
    fn test_mission_missing_crew_rejected() {
        let json = r#"{"id": 11, "launchDate": null, "description": ""}"#;
        let err = serde_json::from_str::<MissionRecord>(json).unwrap_err();
        assert!(err.to_string().contains("crew"));
    }

    #[test]
    fn test_mission_serializes_camel_case_date() {
        let value = serde_json::to_value(apollo_11()).unwrap();
        assert_eq!(value["launchDate"], "1969-07-16");
        assert!(value.get("launch_date").is_none());

        let mut mission = apollo_11();
        mission.launch_date = None;
        let value = serde_json::to_value(mission).unwrap();
        assert!(value["launchDate"].is_null());
    }

    #[test]
    fn test_crew_order_preserved_by_decode() {
        let json = r#"{"id": 8, "crew": [
            {"name": "borman", "role": "Commander"},
            {"name": "lovell", "role": "Command Module Pilot"},
            {"name": "anders", "role": "Lunar Module Pilot"}
        ], "description": ""}"#;
        let mission: MissionRecord = serde_json::from_str(json).unwrap();
        let names: Vec<_> = mission.crew.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["borman", "lovell", "anders"]);
    }
}
