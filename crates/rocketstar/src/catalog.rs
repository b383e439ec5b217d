//! Catalog loading.
//!
//! Reads the roster and mission documents from a [`ResourceStore`], decodes
//! them strictly and checks the references between them. Loading is
//! all-or-nothing: any malformed resource fails the whole catalog, since the
//! documents ship with the application and a bad one is a build problem.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{CatalogConfig, Config, ResourceConfig};
use crate::error::{Error, Result};
use crate::logging::DATA_TARGET;
use crate::model::{AstronautRecord, MissionRecord};
use crate::resolver::{self, Flight, ResolvedCrewMember};
use crate::roster::{DuplicatePolicy, NameMatching, Roster, RosterEntries};
use crate::store::ResourceStore;

/// BLAKE3 digest of one source resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceDigest {
    /// Resource name within the store.
    pub name: String,
    /// Size in bytes.
    pub bytes: usize,
    /// Hex-encoded BLAKE3 hash.
    pub blake3: String,
}

impl ResourceDigest {
    /// Digest `bytes` read from resource `name`.
    #[must_use]
    pub fn compute(name: &str, bytes: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            bytes: bytes.len(),
            blake3: blake3::hash(bytes).to_hex().to_string(),
        }
    }
}

/// The loaded roster and mission list.
///
/// Read-only after construction and safe to share between threads.
#[derive(Debug, Clone)]
pub struct Catalog {
    roster: Roster,
    missions: Vec<MissionRecord>,
    digests: Vec<ResourceDigest>,
}

impl Catalog {
    /// Assemble a catalog from already-decoded parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateMission`] if two missions share an id, or
    /// [`Error::UnknownCrewMember`] if `validate` is set and a crew entry
    /// does not resolve.
    pub fn new(roster: Roster, missions: Vec<MissionRecord>, validate: bool) -> Result<Self> {
        check_unique_missions("missions", &missions)?;
        if validate {
            resolver::validate_crew(&missions, &roster)?;
        }
        Ok(Self {
            roster,
            missions,
            digests: Vec::new(),
        })
    }

    /// The astronaut roster.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Missions in document order.
    #[must_use]
    pub fn missions(&self) -> &[MissionRecord] {
        &self.missions
    }

    /// Digests of the resources this catalog was loaded from.
    ///
    /// Empty for catalogs assembled with [`Catalog::new`].
    #[must_use]
    pub fn digests(&self) -> &[ResourceDigest] {
        &self.digests
    }

    /// Select a mission by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMission`] if no mission has this id.
    pub fn mission(&self, id: i64) -> Result<&MissionRecord> {
        self.missions
            .iter()
            .find(|mission| mission.id == id)
            .ok_or(Error::UnknownMission(id))
    }

    /// Look up an astronaut by roster key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAstronaut`] if the key does not resolve.
    pub fn astronaut(&self, key: &str) -> Result<&AstronautRecord> {
        self.roster
            .get(key)
            .ok_or_else(|| Error::UnknownAstronaut(key.to_string()))
    }

    /// Select a mission by id and resolve its crew.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMission`] or [`Error::UnknownCrewMember`].
    pub fn crew(&self, id: i64) -> Result<(&MissionRecord, Vec<ResolvedCrewMember<'_>>)> {
        let mission = self.mission(id)?;
        let crew = resolver::resolve_crew(mission, &self.roster)?;
        Ok((mission, crew))
    }

    /// The missions the astronaut under `key` crewed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAstronaut`] if the key does not resolve.
    pub fn flights(&self, key: &str) -> Result<Vec<Flight<'_>>> {
        self.astronaut(key)?;
        Ok(resolver::missions_for(key, &self.missions, &self.roster))
    }
}

/// Load the catalog described by `config` from `store`.
///
/// Each call re-reads and re-decodes both resources.
///
/// # Errors
///
/// Returns the first resource, decode, duplicate or crew-reference error.
pub fn load_catalog(
    store: &dyn ResourceStore,
    resources: &ResourceConfig,
    catalog: &CatalogConfig,
) -> Result<Catalog> {
    debug!("Loading catalog from {}", store.name());

    let roster_bytes = store.read(&resources.astronauts)?;
    let roster_digest = ResourceDigest::compute(&resources.astronauts, &roster_bytes);
    debug!(
        resource = %roster_digest.name,
        bytes = roster_digest.bytes,
        blake3 = %roster_digest.blake3,
        "Read roster"
    );
    let roster = decode_roster(
        &resources.astronauts,
        &roster_bytes,
        catalog.duplicate_policy,
        catalog.name_matching,
    )?;

    let mission_bytes = store.read(&resources.missions)?;
    let mission_digest = ResourceDigest::compute(&resources.missions, &mission_bytes);
    debug!(
        resource = %mission_digest.name,
        bytes = mission_digest.bytes,
        blake3 = %mission_digest.blake3,
        "Read missions"
    );
    let missions = decode_missions(&resources.missions, &mission_bytes)?;

    if catalog.validate_crew {
        resolver::validate_crew(&missions, &roster)?;
    }

    info!(
        "Loaded {} astronauts and {} missions from {}",
        roster.len(),
        missions.len(),
        store.name()
    );

    Ok(Catalog {
        roster,
        missions,
        digests: vec![roster_digest, mission_digest],
    })
}

/// Load the catalog using every setting in `config`.
///
/// # Errors
///
/// See [`load_catalog`].
pub fn load_configured(config: &Config) -> Result<Catalog> {
    let store = config.store();
    load_catalog(store.as_ref(), &config.resources, &config.catalog)
}

/// Decode a roster document.
///
/// `name` is only used for diagnostics.
///
/// # Errors
///
/// Returns [`Error::MalformedDocument`], [`Error::Schema`] or, under
/// [`DuplicatePolicy::Reject`], [`Error::DuplicateAstronaut`].
pub fn decode_roster(
    name: &str,
    bytes: &[u8],
    policy: DuplicatePolicy,
    matching: NameMatching,
) -> Result<Roster> {
    let RosterEntries(entries) =
        serde_json::from_slice(bytes).map_err(|source| Error::decode(name, source))?;

    let mut roster = Roster::new(matching);
    for (key, record) in entries {
        let Some(replaced) = roster.insert(key.clone(), record) else {
            continue;
        };
        match policy {
            DuplicatePolicy::Reject => {
                return Err(Error::DuplicateAstronaut {
                    name: name.to_string(),
                    key,
                });
            }
            DuplicatePolicy::LastWins => {
                warn!(
                    target: DATA_TARGET,
                    resource = name,
                    key = %key,
                    replaced = %replaced.id,
                    "Duplicate astronaut key; keeping the later record"
                );
            }
        }
    }

    for (key, record) in roster.mismatched_ids() {
        warn!(
            target: DATA_TARGET,
            resource = name,
            key,
            id = %record.id,
            "Astronaut key does not match its id"
        );
    }
    for (id, keys) in roster.shared_ids() {
        warn!(
            target: DATA_TARGET,
            resource = name,
            id,
            keys = ?keys,
            "Astronaut id used by several keys"
        );
    }
    Ok(roster)
}

/// Decode a mission document.
///
/// # Errors
///
/// Returns [`Error::MalformedDocument`], [`Error::Schema`] or
/// [`Error::DuplicateMission`].
pub fn decode_missions(name: &str, bytes: &[u8]) -> Result<Vec<MissionRecord>> {
    let missions: Vec<MissionRecord> =
        serde_json::from_slice(bytes).map_err(|source| Error::decode(name, source))?;
    check_unique_missions(name, &missions)?;
    Ok(missions)
}

/// Encode a roster back into its document form.
///
/// # Errors
///
/// Returns [`Error::Json`] if encoding fails.
pub fn encode_roster(roster: &Roster) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(roster)?)
}

/// Encode missions back into their document form.
///
/// # Errors
///
/// Returns [`Error::Json`] if encoding fails.
pub fn encode_missions(missions: &[MissionRecord]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(missions)?)
}

fn check_unique_missions(name: &str, missions: &[MissionRecord]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for mission in missions {
        if !seen.insert(mission.id) {
            return Err(Error::DuplicateMission {
                name: name.to_string(),
                id: mission.id,
            });
        }
    }
    Ok(())
}
