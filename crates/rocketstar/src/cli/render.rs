//! Text and JSON renderings of the catalog views.

use std::fmt::Write as _;

use serde_json::json;

use super::OutputFormat;
use crate::catalog::Catalog;
use crate::display::{AstronautDetail, MissionCard, MissionDetail};
use crate::error::Result;

/// Render the mission grid.
///
/// # Errors
///
/// Returns an error if JSON encoding fails.
pub fn render_missions(cards: &[MissionCard], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(cards)?);
    }

    let mut out = String::new();
    match format {
        OutputFormat::Table => {
            let name_width = cards
                .iter()
                .map(|card| card.display_name.chars().count())
                .chain(std::iter::once("MISSION".len()))
                .max()
                .unwrap_or_default();
            let _ = writeln!(out, "{:<name_width$}  {:<10}  LAUNCHED", "MISSION", "IMAGE");
            for card in cards {
                let _ = writeln!(
                    out,
                    "{:<name_width$}  {:<10}  {}",
                    card.display_name, card.image, card.launch_date
                );
            }
        }
        _ => {
            for card in cards {
                let _ = writeln!(out, "{}: {}", card.display_name, card.launch_date);
            }
        }
    }
    Ok(out)
}

/// Render one mission with its crew.
///
/// # Errors
///
/// Returns an error if JSON encoding fails.
pub fn render_mission(detail: &MissionDetail<'_>, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(detail)?);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", detail.title);
    let _ = writeln!(out, "{}", underline(&detail.title));
    let _ = writeln!(out, "Launched: {}", detail.launch_date);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", detail.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "Crew");
    let name_width = detail
        .crew
        .iter()
        .map(|line| line.name.chars().count())
        .max()
        .unwrap_or_default();
    for line in &detail.crew {
        match format {
            OutputFormat::Table => {
                let _ = writeln!(out, "  {:<name_width$}  {:<24}  {}", line.name, line.role, line.key);
            }
            _ => {
                let _ = writeln!(out, "  {:<name_width$}  {}", line.name, line.role);
            }
        }
    }
    Ok(out)
}

/// Render one astronaut with their flights.
///
/// # Errors
///
/// Returns an error if JSON encoding fails.
pub fn render_astronaut(detail: &AstronautDetail<'_>, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(detail)?);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", detail.name);
    let _ = writeln!(out, "{}", underline(detail.name));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", detail.description);
    if !detail.flights.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Missions");
        for flight in &detail.flights {
            let _ = writeln!(
                out,
                "  {:<10}  {:<24}  {}",
                flight.title, flight.role, flight.launch_date
            );
        }
    }
    Ok(out)
}

fn underline(heading: &str) -> String {
    "=".repeat(heading.chars().count())
}

/// Render the result of a successful catalog check.
///
/// # Errors
///
/// Returns an error if JSON encoding fails.
pub fn render_check(catalog: &Catalog, source: &str, json: bool) -> Result<String> {
    let crew_slots: usize = catalog
        .missions()
        .iter()
        .map(|mission| mission.crew.len())
        .sum();

    if json {
        let report = json!({
            "status": "ok",
            "source": source,
            "astronauts": catalog.roster().len(),
            "missions": catalog.missions().len(),
            "crew_slots": crew_slots,
            "name_matching": catalog.roster().matching().to_string(),
            "resources": catalog.digests(),
        });
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let mut out = String::new();
    let _ = writeln!(out, "Catalog OK");
    let _ = writeln!(out, "----------");
    let _ = writeln!(out, "Source:        {source}");
    let _ = writeln!(out, "Astronauts:    {}", catalog.roster().len());
    let _ = writeln!(out, "Missions:      {}", catalog.missions().len());
    let _ = writeln!(out, "Crew slots:    {crew_slots}");
    let _ = writeln!(out, "Name matching: {}", catalog.roster().matching());
    for digest in catalog.digests() {
        let _ = writeln!(
            out,
            "  {} ({} bytes) blake3:{}",
            digest.name, digest.bytes, digest.blake3
        );
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use crate::store::EmbeddedStore;
    use crate::{load_catalog, CatalogConfig, ResourceConfig};

    fn builtin() -> Catalog {
        load_catalog(
            &EmbeddedStore::builtin(),
            &ResourceConfig::default(),
            &CatalogConfig::default(),
        )
        .unwrap()
    }

    fn cards(catalog: &Catalog) -> Vec<MissionCard> {
        catalog
            .missions()
            .iter()
            .map(|mission| MissionCard::new(mission, &DisplayConfig::default()))
            .collect()
    }

    #[test]
    fn test_render_missions_plain() {
        let catalog = builtin();
        let out = render_missions(&cards(&catalog), OutputFormat::Plain).unwrap();
        assert!(out.contains("apollo 11: Jul 16, 1969"));
        assert!(out.contains("apollo 1: N/A"));
    }

    #[test]
    fn test_render_missions_table() {
        let catalog = builtin();
        let out = render_missions(&cards(&catalog), OutputFormat::Table).unwrap();
        let mut lines = out.lines();
        assert!(lines.next().unwrap().starts_with("MISSION"));
        assert_eq!(lines.count(), catalog.missions().len());
    }

    #[test]
    fn test_render_missions_json() {
        let catalog = builtin();
        let out = render_missions(&cards(&catalog), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), catalog.missions().len());
        assert!(value
            .as_array()
            .unwrap()
            .iter()
            .any(|card| card["image"] == "apollo11"));
    }

    #[test]
    fn test_render_mission_plain_lists_crew_in_order() {
        let catalog = builtin();
        let (mission, crew) = catalog.crew(11).unwrap();
        let detail = MissionDetail::new(mission, &crew, &DisplayConfig::default());

        let out = render_mission(&detail, OutputFormat::Plain).unwrap();
        assert!(out.starts_with("Apollo 11\n=========\n"));
        let armstrong = out.find("Neil A. Armstrong").unwrap();
        let collins = out.find("Michael Collins").unwrap();
        let aldrin = out.find("Buzz Aldrin").unwrap();
        assert!(armstrong < collins && collins < aldrin);
    }

    #[test]
    fn test_render_mission_json() {
        let catalog = builtin();
        let (mission, crew) = catalog.crew(13).unwrap();
        let detail = MissionDetail::new(mission, &crew, &DisplayConfig::default());

        let out = render_mission(&detail, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["title"], "Apollo 13");
        assert_eq!(value["crew"][0]["key"], "lovell");
    }

    #[test]
    fn test_render_astronaut() {
        let catalog = builtin();
        let astronaut = catalog.astronaut("lovell").unwrap();
        let flights = catalog.flights("lovell").unwrap();
        let detail = AstronautDetail::new("lovell", astronaut, &flights, &DisplayConfig::default());

        let out = render_astronaut(&detail, OutputFormat::Plain).unwrap();
        assert!(out.contains("Apollo 8"));
        assert!(out.contains("Apollo 13"));
    }

    #[test]
    fn test_underline_counts_characters() {
        assert_eq!(underline("Apollo 11"), "=========");
        assert_eq!(underline("Léonov"), "======");
    }

    #[test]
    fn test_render_check() {
        let catalog = builtin();
        let out = render_check(&catalog, "built-in resources", false).unwrap();
        assert!(out.starts_with("Catalog OK"));
        assert!(out.contains("astronauts.json"));

        let out = render_check(&catalog, "built-in resources", true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["resources"].as_array().unwrap().len(), 2);
        assert_eq!(value["name_matching"], "exact");
    }
}
