//! Forge-item component
//!
//! Attached to any object recognized as forgeable. Holds two independent
//! axes of state:
//! - thermal: a lazily decaying temperature plus the immutable melting and
//!   working temperatures resolved from the material at creation
//! - process: the step ledger, the accumulated work and the resolved recipe
//!
//! The process axis is only ever cleared as a whole through [`ForgeItem::reset`].

use serde::{Deserialize, Serialize};

use super::temperature::LazyTemperature;
use crate::config::ForgeConfig;
use crate::simulation::{ForgeStep, ForgeSteps, ThermalProfile};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForgeItem {
    steps: ForgeSteps,
    work: i32,
    recipe: Option<String>,
    temperature: LazyTemperature,
    profile: ThermalProfile,
}

impl ForgeItem {
    /// Zero-state component for a tagged material identity
    pub fn new(material: &str) -> Self {
        Self::with_profile(ThermalProfile::for_material(material))
    }

    pub fn with_profile(profile: ThermalProfile) -> Self {
        Self {
            steps: ForgeSteps::new(),
            work: 0,
            recipe: None,
            temperature: LazyTemperature::COLD,
            profile,
        }
    }

    /// Rebuild persisted state on top of a resolved profile
    pub(crate) fn from_parts(
        profile: ThermalProfile,
        steps: ForgeSteps,
        work: i32,
        recipe: Option<String>,
        temperature: LazyTemperature,
    ) -> Self {
        let mut item = Self {
            steps,
            work: work.max(0),
            recipe,
            temperature,
            profile,
        };
        if item.work == 0 && item.recipe.is_some() {
            log::warn!("Forge item loaded with a recipe but no work, resetting");
            item.reset();
        }
        item
    }

    pub fn profile(&self) -> ThermalProfile {
        self.profile
    }

    pub fn melting_temperature(&self) -> f32 {
        self.profile.melting_temperature
    }

    pub fn working_temperature(&self) -> f32 {
        self.profile.working_temperature
    }

    // Thermal axis

    pub fn temperature(&self, now: u64, config: &ForgeConfig) -> f32 {
        self.temperature.get(now, config.temperature_decay_per_tick)
    }

    pub fn set_temperature(&mut self, value: f32, now: u64, config: &ForgeConfig) {
        self.temperature.set(value, now, config.max_temperature);
    }

    pub fn add_temperature(&mut self, delta: f32, now: u64, config: &ForgeConfig) {
        self.temperature.add(delta, now, config);
    }

    pub fn lazy_temperature(&self) -> LazyTemperature {
        self.temperature
    }

    /// Hot enough for forge steps
    pub fn is_workable(&self, now: u64, config: &ForgeConfig) -> bool {
        self.temperature(now, config) >= self.profile.working_temperature
    }

    pub fn is_molten(&self, now: u64, config: &ForgeConfig) -> bool {
        self.temperature(now, config) >= self.profile.melting_temperature
    }

    // Process axis

    pub fn work(&self) -> i32 {
        self.work
    }

    pub fn steps(&self) -> &ForgeSteps {
        &self.steps
    }

    pub fn recipe(&self) -> Option<&str> {
        self.recipe.as_deref()
    }

    /// Append a step and add its work value
    ///
    /// The total never drops below 0. A piece whose work comes back to 0 is
    /// reset, so no ledger or recipe survives without work.
    pub fn add_step(&mut self, step: ForgeStep) {
        self.steps.push(step);
        self.work = (self.work + step.work()).max(0);
        if self.work == 0 {
            self.reset();
        }
    }

    /// Store or clear the matched recipe; the ledger is left alone
    ///
    /// A recipe is refused while the piece holds no work. Returns whether
    /// the value was stored.
    pub fn set_recipe(&mut self, recipe: Option<&str>) -> bool {
        if let Some(name) = recipe {
            if self.work == 0 {
                log::debug!("Refusing recipe '{}' on a piece without work", name);
                return false;
            }
        }
        self.recipe = recipe.map(str::to_string);
        true
    }

    /// Clear ledger, work and recipe together. Temperature is untouched.
    pub fn reset(&mut self) {
        self.steps.clear();
        self.work = 0;
        self.recipe = None;
    }

    /// No ledger, no work, no recipe
    pub fn is_pristine(&self) -> bool {
        self.steps.is_empty() && self.work == 0 && self.recipe.is_none()
    }

    /// Reset a cold piece that holds no recipe progress
    ///
    /// Returns true when the reset happened. A piece that is still warm keeps
    /// its state even with zero work.
    pub fn maybe_clear_if_idle(&mut self, now: u64, config: &ForgeConfig) -> bool {
        let cold = self.temperature(now, config) < config.cooled_threshold;
        if cold && (self.recipe.is_none() || self.work == 0) {
            if !self.is_pristine() {
                log::debug!("Cold forge item fell apart (work {})", self.work);
            }
            self.reset();
            true
        } else {
            false
        }
    }
}
