//! Designer scheduling and matching engine.
//!
//! Given a design task with a deadline and an estimated duration, ranks
//! the designer roster by skill fit, finds each designer's earliest free
//! slot before the deadline, recommends a primary pick with alternates,
//! and commits the operator-confirmed booking to the calendar store.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Designer`, `TaskRecord`, `TaskRequirement`,
//!   `Calendar`, `TimeSlot`, `MatchResult`, `AvailabilityResult`, `Booking`
//! - **`matching`**: Rule-based skill matcher and deterministic ranking
//! - **`scheduler`**: Availability resolver, partitioner, recommendation
//!   composer, booking committer, and the session state machine
//! - **`collaborators`**: Traits for the roster provider, calendar store,
//!   task source, and notification sink, with in-memory implementations
//! - **`validation`**: Input integrity checks (duplicate IDs, malformed intervals)
//! - **`config`**: TOML-backed engine configuration
//!
//! # Usage
//!
//! ```no_run
//! use designer_schedule::collaborators::{InMemoryCalendarStore, InMemoryTaskSource, StaticRoster};
//! use designer_schedule::config::EngineConfig;
//! use designer_schedule::matching::SkillMatcher;
//! use designer_schedule::scheduler::{BookingCommitter, Confirmation, RosterLoaded};
//!
//! # fn main() -> designer_schedule::Result<()> {
//! let config = EngineConfig::from_file("designer-schedule.toml")?;
//! let (tasks, roster, store) = (InMemoryTaskSource::new(), StaticRoster::default(), InMemoryCalendarStore::new());
//! let matcher = SkillMatcher::from_config(&config.matching);
//!
//! let session = RosterLoaded::start(&tasks, &roster, "T-42", chrono::Utc::now(), config)?
//!     .rank(&matcher)
//!     .partition(&store)?
//!     .recommend();
//! println!("{}", session.recommendation());
//!
//! if let Some(primary) = session.recommendation().primary() {
//!     let id = primary.designer_id().to_string();
//!     let committer = BookingCommitter::new(&store);
//!     if let Confirmation::Booked(booked) = session.confirm(&id, &committer, chrono::Utc::now())? {
//!         println!("booked {}", booked.reservation_id());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Manning et al. (2008), "Introduction to Information Retrieval", Ch. 6
//!   (inverse document frequency weighting)

pub mod collaborators;
pub mod config;
pub mod error;
pub mod matching;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{EngineError, Result};
