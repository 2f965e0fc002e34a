//! Domain models for the Oz engine.
//!
//! # Core Concepts
//!
//! ## Inputs
//!
//! - [`WorkItemCounts`]: Counts of open work, aggregated from [`ProjectRecord`],
//!   [`TaskRecord`] and [`BrainDumpRecord`] values supplied by the data layer.
//! - [`Impulse`]: A pending user action submitted to the intervention gate.
//!
//! ## Derived State
//!
//! Recomputed on every evaluation, never persisted:
//!
//! - [`LoadScores`]: Five independent weighted-sum scores in `[0, 100]`.
//! - [`Status`]: Overall status (stable → overload), a step function of RAM usage.
//! - [`CharacterStates`]: One [`CharacterState`] per [`Character`].
//! - [`DriftReading`]: Disengagement from idle time and open loops.
//! - [`ProjectOrbitAssignment`]: Planet / moons / probes hierarchy.
//!
//! ## Session State
//!
//! - [`DriftState`]: The only mutable state, owned by the activity tracker.
//!
//! ## Outputs
//!
//! - [`WizardMessage`]: Coaching copy with a [`Tone`].
//! - [`GateAssessment`] / [`GateOutcome`]: Intervention gate decisions.

mod drift;
mod impulse;
mod load;
mod message;
mod orbit;
mod snapshot;
mod work;

pub use drift::*;
pub use impulse::*;
pub use load::*;
pub use message::*;
pub use orbit::*;
pub use snapshot::*;
pub use work::*;
