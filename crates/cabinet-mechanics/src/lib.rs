//! Game mechanics for the cabinet engine.
//!
//! Every random draw goes through the [`Dice`] trait. Mechanics take the
//! roster (a [`cabinet_core::Cabinet`]) plus a [`Court`], which bundles the
//! [`EngineConfig`], the dice and a [`NoticeSink`] for player-facing messages.
//!
//! - [`roll`]: skill-modified rolls, and the thrown rolls of corrupt ministers
//! - [`corruption`]: corruption checks, theft, detection and bribery
//! - [`rumor`] and [`investigation`]: how observers learn about ministers
//! - [`recruit`] and [`turn`]: new ministers and per-turn bookkeeping

/// Engine configuration and scenario switches.
pub mod config;
/// The bundle of configuration, dice and notices passed to every mechanic.
pub mod context;
/// Corruption checks, theft, detection and bribery.
pub mod corruption;
/// Phrase tables for apparent values.
pub mod describe;
/// Random sources.
pub mod dice;
/// Error types for mechanics.
pub mod error;
/// Formal investigations.
pub mod investigation;
/// Player-facing notices.
pub mod notice;
/// Generating new ministers.
pub mod recruit;
/// Check thresholds and outcomes.
pub mod resolution;
/// Skill-modified and corruption-aware rolls.
pub mod roll;
/// Revealing attributes to observers.
pub mod rumor;
/// Per-turn bookkeeping.
pub mod turn;

/// Re-export configuration types.
pub use config::{EngineConfig, ScenarioOverride};
/// Re-export the mechanics context.
pub use context::Court;
/// Re-export corruption types and operations.
pub use corruption::{
    Detection, Stake, TheftOutcome, attempt_detection, check_corruption, conspiracy_check, steal,
    transfer,
};
/// Re-export phrase helpers.
pub use describe::{commit_apparent, describe};
/// Re-export dice sources.
pub use dice::{Dice, ScriptedDice};
/// Re-export error types.
pub use error::{MechError, MechResult};
/// Re-export investigation types.
pub use investigation::{Finding, InvestigationReport, run_investigation};
/// Re-export notice types.
pub use notice::{Notice, NoticeLog, NoticeSink};
/// Re-export recruitment helpers.
pub use recruit::{random_background, random_name, recruit};
/// Re-export check types.
pub use resolution::{Check, Outcome};
/// Re-export roll operations.
pub use roll::{
    Contest, ContestedRoll, base_roll, contested_roll, passive_roll, resolved_roll,
    resolved_roll_batch, skill_modifier,
};
/// Re-export rumor operations.
pub use rumor::{reveal, reveal_all};
/// Re-export the turn hook.
pub use turn::{TurnStart, begin_turn};
