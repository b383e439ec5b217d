//! `rocketstar` - Apollo mission and crew catalog
//!
//! This library loads an astronaut roster and a mission list from a resource
//! store, checks that every crew entry refers to a known astronaut, and builds
//! the per-mission views (resolved crew, display names, launch dates) that a
//! front end shows.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod model;
pub mod resolver;
pub mod roster;
pub mod store;

pub use catalog::{
    decode_missions, decode_roster, encode_missions, encode_roster, load_catalog, load_configured,
    Catalog, ResourceDigest,
};
pub use config::{CatalogConfig, Config, DisplayConfig, ResourceConfig};
pub use display::{formatted_launch_date, AstronautDetail, MissionCard, MissionDetail};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use model::{AstronautRecord, CrewRoleEntry, MissionRecord};
pub use resolver::{missions_for, resolve_crew, validate_crew, Flight, ResolvedCrewMember};
pub use roster::{normalize_name, DuplicatePolicy, NameMatching, Roster};
pub use store::{DirectoryStore, EmbeddedStore, ResourceStore};
