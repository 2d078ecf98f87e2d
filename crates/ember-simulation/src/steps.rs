//! Forge steps and the step ledger
//!
//! A forge step is one worker action on the anvil. Each kind carries a fixed
//! work value; hits and draws pull the work counter down, the shaping steps
//! push it up.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of most recent steps the ledger remembers
pub const LEDGER_CAPACITY: usize = 3;

/// One discrete worker action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForgeStep {
    HitLight,
    HitMedium,
    HitHard,
    Draw,
    Punch,
    Bend,
    Upset,
    Shrink,
}

impl ForgeStep {
    pub const ALL: [ForgeStep; 8] = [
        ForgeStep::HitLight,
        ForgeStep::HitMedium,
        ForgeStep::HitHard,
        ForgeStep::Draw,
        ForgeStep::Punch,
        ForgeStep::Bend,
        ForgeStep::Upset,
        ForgeStep::Shrink,
    ];

    /// Work value added to the item's work total
    pub fn work(self) -> i32 {
        match self {
            ForgeStep::HitLight => -3,
            ForgeStep::HitMedium => -6,
            ForgeStep::HitHard => -9,
            ForgeStep::Draw => -15,
            ForgeStep::Punch => 2,
            ForgeStep::Bend => 7,
            ForgeStep::Upset => 13,
            ForgeStep::Shrink => 16,
        }
    }

    /// Any of the three hammer hits
    pub fn is_hit(self) -> bool {
        matches!(
            self,
            ForgeStep::HitLight | ForgeStep::HitMedium | ForgeStep::HitHard
        )
    }

    /// Stable name used in persisted records
    pub fn name(self) -> &'static str {
        match self {
            ForgeStep::HitLight => "hit_light",
            ForgeStep::HitMedium => "hit_medium",
            ForgeStep::HitHard => "hit_hard",
            ForgeStep::Draw => "draw",
            ForgeStep::Punch => "punch",
            ForgeStep::Bend => "bend",
            ForgeStep::Upset => "upset",
            ForgeStep::Shrink => "shrink",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.name() == name)
    }
}

/// Ordered record of the most recent forge steps
///
/// Appending never fails: once [`LEDGER_CAPACITY`] steps are held, the
/// oldest one is dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgeSteps {
    steps: VecDeque<ForgeStep>,
}

impl ForgeSteps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: ForgeStep) {
        if self.steps.len() == LEDGER_CAPACITY {
            self.steps.pop_front();
        }
        self.steps.push_back(step);
    }

    /// The most recent step
    pub fn last(&self) -> Option<ForgeStep> {
        self.nth_last(0)
    }

    /// Step `n` positions before the most recent one (0 = most recent)
    pub fn nth_last(&self, n: usize) -> Option<ForgeStep> {
        self.steps
            .len()
            .checked_sub(n + 1)
            .and_then(|idx| self.steps.get(idx).copied())
    }

    /// Steps from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = ForgeStep> + '_ {
        self.steps.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Names of the held steps, oldest first
    pub fn names(&self) -> Vec<String> {
        self.iter().map(|step| step.name().to_string()).collect()
    }

    /// Rebuild from persisted names, skipping any that are not recognized
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let mut steps = Self::new();
        for name in names {
            match ForgeStep::from_name(name.as_ref()) {
                Some(step) => steps.push(step),
                None => log::warn!("Skipping unknown forge step '{}'", name.as_ref()),
            }
        }
        steps
    }
}

impl FromIterator<ForgeStep> for ForgeSteps {
    fn from_iter<I: IntoIterator<Item = ForgeStep>>(iter: I) -> Self {
        let mut steps = Self::new();
        for step in iter {
            steps.push(step);
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_work_values() {
        assert_eq!(ForgeStep::HitLight.work(), -3);
        assert_eq!(ForgeStep::Draw.work(), -15);
        assert_eq!(ForgeStep::Shrink.work(), 16);
        assert!(ForgeStep::HitHard.is_hit());
        assert!(!ForgeStep::Bend.is_hit());
    }

    #[test]
    fn test_step_names_unique() {
        for step in ForgeStep::ALL {
            assert_eq!(ForgeStep::from_name(step.name()), Some(step));
        }
        assert_eq!(ForgeStep::from_name("twist"), None);
    }

    #[test]
    fn test_ledger_keeps_order() {
        let mut steps = ForgeSteps::new();
        steps.push(ForgeStep::Bend);
        steps.push(ForgeStep::Punch);

        assert_eq!(steps.len(), 2);
        assert_eq!(steps.last(), Some(ForgeStep::Punch));
        assert_eq!(steps.nth_last(1), Some(ForgeStep::Bend));
        assert_eq!(steps.nth_last(2), None);
    }

    #[test]
    fn test_ledger_drops_oldest() {
        let steps: ForgeSteps = [
            ForgeStep::Upset,
            ForgeStep::Bend,
            ForgeStep::Punch,
            ForgeStep::HitLight,
        ]
        .into_iter()
        .collect();

        assert_eq!(steps.len(), LEDGER_CAPACITY);
        assert_eq!(
            steps.iter().collect::<Vec<_>>(),
            vec![ForgeStep::Bend, ForgeStep::Punch, ForgeStep::HitLight]
        );
    }

    #[test]
    fn test_ledger_from_names_skips_unknown() {
        let steps = ForgeSteps::from_names(&["bend", "twist", "draw"]);
        assert_eq!(
            steps.iter().collect::<Vec<_>>(),
            vec![ForgeStep::Bend, ForgeStep::Draw]
        );
        assert_eq!(steps.names(), vec!["bend", "draw"]);
    }
}
