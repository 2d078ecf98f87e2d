//! Scripted forge scenarios
//!
//! A scenario is a RON file with setup actions, main actions and
//! verification checks. The executor applies the actions to a [`World`],
//! records every forge event and produces an [`ExecutionReport`].
//!
//! [`World`]: ember_core::world::World

mod actions;
mod definition;
mod executor;
mod results;
mod verification;

pub use actions::ScenarioAction;
pub use definition::ScenarioDefinition;
pub use executor::{ScenarioExecutor, ScenarioExecutorConfig};
pub use results::{EventCounts, ExecutionReport, ForgeReport, ItemReport};
pub use verification::{VerificationCondition, VerificationResult};
