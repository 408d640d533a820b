//! Sextant engine — career matching, skill-gap analysis and what-if simulation.
//!
//! The engine is a pure library: a presentation layer hands it the skill and
//! role rosters plus per-session user input, and gets back plain serializable
//! records (match rankings, gap breakdowns, readiness scores, simulation
//! deltas) it can render or forward as JSON unchanged.
//!
//! # Architecture
//! - [`catalog`] validates the tabular reference data once and answers
//!   lookups with documented defaults afterwards.
//! - [`similarity`] fits a TF-IDF index over role descriptions; [`matching`]
//!   classifies skills and ranks roles; [`gap`] produces the per-skill
//!   breakdown for a chosen role; [`readiness`] collapses a gap analysis
//!   into one 0–100 score.
//! - [`simulation`] freezes a baseline per role selection and derives
//!   what-if scenarios from it without ever mutating it.
//!
//! Reference data is shared read-only (`Arc`); everything downstream of it
//! is owned by a single session and computed synchronously.

pub mod catalog;
pub mod errors;
pub mod gap;
pub mod matching;
pub mod models;
pub mod readiness;
pub mod similarity;
pub mod simulation;

pub use catalog::{RoleCatalog, SkillCatalog};
pub use errors::EngineError;
pub use gap::{GapAnalysis, GapAnalyzer, SkillDetail, SkillStatus};
pub use matching::extractor::SkillExtractor;
pub use matching::matcher::{CareerMatch, CareerMatcher};
pub use matching::overlap::{skill_overlap, SkillOverlap};
pub use models::profile::{InMemoryProfileStore, ProfileStore, UserProfile};
pub use models::reference::{Difficulty, Role, RoleRecord, Skill, SkillRecord};
pub use readiness::{ReadinessScore, ReadinessScorer, ScoreAdjustments};
pub use similarity::TfidfIndex;
pub use simulation::session::SimulationSession;
pub use simulation::{
    compare_simulations, Baseline, RiskLevel, SimulationResult, Simulator,
};
