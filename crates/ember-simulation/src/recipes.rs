//! Anvil recipes
//!
//! A recipe turns one input item into an output item once the item's work
//! total lands exactly on the recipe's target and the last steps in the
//! ledger satisfy every forge rule of the recipe.

use serde::{Deserialize, Serialize};

use crate::steps::{ForgeStep, ForgeSteps};

/// Work totals above this ruin the piece regardless of recipe
pub const MAX_WORK: i32 = 150;

/// Work total inside `0..=MAX_WORK`
///
/// This is a range check only; whether the rules can still be met is
/// decided by [`AnvilRecipe::is_complete`] once the target is hit.
pub fn work_in_range(work: i32) -> bool {
    (0..=MAX_WORK).contains(&work)
}

/// Which ledger position a rule inspects
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleOrder {
    /// Any of the remembered steps
    Any,
    Last,
    /// Second or third last, but the check ignores the most recent step
    NotLast,
    SecondLast,
    ThirdLast,
}

/// Class of step a rule asks for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepClass {
    /// Any hammer hit, regardless of strength
    Hit,
    Draw,
    Punch,
    Bend,
    Upset,
    Shrink,
}

impl StepClass {
    pub fn matches(self, step: ForgeStep) -> bool {
        match self {
            StepClass::Hit => step.is_hit(),
            StepClass::Draw => step == ForgeStep::Draw,
            StepClass::Punch => step == ForgeStep::Punch,
            StepClass::Bend => step == ForgeStep::Bend,
            StepClass::Upset => step == ForgeStep::Upset,
            StepClass::Shrink => step == ForgeStep::Shrink,
        }
    }
}

/// Constraint on the final steps of a recipe
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgeRule {
    pub order: RuleOrder,
    pub class: StepClass,
}

impl ForgeRule {
    pub const fn new(order: RuleOrder, class: StepClass) -> Self {
        Self { order, class }
    }

    pub fn matches(&self, steps: &ForgeSteps) -> bool {
        let at = |n: usize| steps.nth_last(n).is_some_and(|s| self.class.matches(s));
        match self.order {
            RuleOrder::Any => steps.iter().any(|s| self.class.matches(s)),
            RuleOrder::Last => at(0),
            RuleOrder::NotLast => at(1) || at(2),
            RuleOrder::SecondLast => at(1),
            RuleOrder::ThirdLast => at(2),
        }
    }
}

/// One anvil recipe
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnvilRecipe {
    pub name: String,
    /// Tagged identity of the accepted input, compared case-insensitively
    pub input: String,
    /// Tagged identity of the produced item
    pub output: String,
    pub target_work: i32,
    pub rules: Vec<ForgeRule>,
}

impl AnvilRecipe {
    pub fn accepts(&self, item: &str) -> bool {
        self.input.eq_ignore_ascii_case(item)
    }

    pub fn rules_satisfied(&self, steps: &ForgeSteps) -> bool {
        self.rules.iter().all(|rule| rule.matches(steps))
    }

    /// Work total and ledger both finish the recipe
    pub fn is_complete(&self, work: i32, steps: &ForgeSteps) -> bool {
        work == self.target_work && self.rules_satisfied(steps)
    }

}

/// Registry of known anvil recipes
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RecipeBook {
    recipes: Vec<AnvilRecipe>,
}

impl RecipeBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Book seeded with the built-in recipes
    pub fn with_defaults() -> Self {
        let mut book = Self::new();
        book.register_defaults();
        book
    }

    fn register_defaults(&mut self) {
        use RuleOrder::*;
        use StepClass::*;

        for metal in ["Iron", "Copper", "Bronze", "Steel", "Gold"] {
            let lower = metal.to_ascii_lowercase();

            self.register(AnvilRecipe {
                name: format!("{}_pickaxe_head", lower),
                input: format!("ingot{}", metal),
                output: format!("pickaxeHead{}", metal),
                target_work: 42,
                rules: vec![
                    ForgeRule::new(Last, Punch),
                    ForgeRule::new(NotLast, Bend),
                    ForgeRule::new(NotLast, Draw),
                ],
            });

            self.register(AnvilRecipe {
                name: format!("{}_sword_blade", lower),
                input: format!("ingot{}", metal),
                output: format!("swordBlade{}", metal),
                target_work: 30,
                rules: vec![
                    ForgeRule::new(Last, Hit),
                    ForgeRule::new(SecondLast, Bend),
                    ForgeRule::new(ThirdLast, Bend),
                ],
            });

            self.register(AnvilRecipe {
                name: format!("{}_plate", lower),
                input: format!("ingot{}", metal),
                output: format!("plate{}", metal),
                target_work: 20,
                rules: vec![
                    ForgeRule::new(Last, Hit),
                    ForgeRule::new(SecondLast, Hit),
                    ForgeRule::new(ThirdLast, Hit),
                ],
            });

            self.register(AnvilRecipe {
                name: format!("{}_rod", lower),
                input: format!("ingot{}", metal),
                output: format!("rod{}", metal),
                target_work: 7,
                rules: vec![ForgeRule::new(Last, Bend)],
            });
        }
    }

    pub fn register(&mut self, recipe: AnvilRecipe) {
        if let Some(existing) = self.recipes.iter_mut().find(|r| r.name == recipe.name) {
            log::warn!("Replacing anvil recipe '{}'", recipe.name);
            *existing = recipe;
        } else {
            self.recipes.push(recipe);
        }
    }

    pub fn get(&self, name: &str) -> Option<&AnvilRecipe> {
        self.recipes.iter().find(|r| r.name == name)
    }

    /// Recipes accepting the given item identity
    pub fn for_input<'a>(&'a self, item: &'a str) -> impl Iterator<Item = &'a AnvilRecipe> + 'a {
        self.recipes.iter().filter(move |r| r.accepts(item))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnvilRecipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(list: &[ForgeStep]) -> ForgeSteps {
        list.iter().copied().collect()
    }

    #[test]
    fn test_rule_orders() {
        let ledger = steps(&[ForgeStep::Bend, ForgeStep::Draw, ForgeStep::HitLight]);

        assert!(ForgeRule::new(RuleOrder::Last, StepClass::Hit).matches(&ledger));
        assert!(ForgeRule::new(RuleOrder::SecondLast, StepClass::Draw).matches(&ledger));
        assert!(ForgeRule::new(RuleOrder::ThirdLast, StepClass::Bend).matches(&ledger));
        assert!(ForgeRule::new(RuleOrder::NotLast, StepClass::Bend).matches(&ledger));
        assert!(!ForgeRule::new(RuleOrder::NotLast, StepClass::Hit).matches(&ledger));
        assert!(ForgeRule::new(RuleOrder::Any, StepClass::Draw).matches(&ledger));
        assert!(!ForgeRule::new(RuleOrder::Any, StepClass::Shrink).matches(&ledger));
    }

    #[test]
    fn test_rules_on_short_ledger() {
        let ledger = steps(&[ForgeStep::Bend]);
        assert!(ForgeRule::new(RuleOrder::Last, StepClass::Bend).matches(&ledger));
        assert!(!ForgeRule::new(RuleOrder::SecondLast, StepClass::Bend).matches(&ledger));
        assert!(!ForgeRule::new(RuleOrder::NotLast, StepClass::Bend).matches(&ledger));
    }

    #[test]
    fn test_recipe_completion() {
        let book = RecipeBook::with_defaults();
        let rod = book.get("iron_rod").unwrap();

        assert!(rod.accepts("ingotIron"));
        assert!(rod.accepts("ingotiron"));
        assert!(!rod.accepts("ingotCopper"));

        assert!(rod.is_complete(7, &steps(&[ForgeStep::Bend])));
        assert!(!rod.is_complete(7, &steps(&[ForgeStep::Punch])));
        assert!(!rod.is_complete(14, &steps(&[ForgeStep::Bend])));
    }

    #[test]
    fn test_work_range() {
        assert!(work_in_range(0));
        assert!(work_in_range(MAX_WORK));
        assert!(!work_in_range(MAX_WORK + 1));
        assert!(!work_in_range(-1));
    }

    #[test]
    fn test_book_lookup() {
        let mut book = RecipeBook::with_defaults();
        assert_eq!(book.len(), 20);
        assert_eq!(book.for_input("ingotSteel").count(), 4);
        assert_eq!(book.for_input("ingotTin").count(), 0);

        book.register(AnvilRecipe {
            name: "iron_rod".to_string(),
            input: "ingotIron".to_string(),
            output: "rodIron".to_string(),
            target_work: 9,
            rules: vec![],
        });
        assert_eq!(book.len(), 20);
        assert_eq!(book.get("iron_rod").unwrap().target_work, 9);
    }

    #[test]
    fn test_book_ron_round_trip() {
        let book = RecipeBook::with_defaults();
        let text = ron::ser::to_string(&book).unwrap();
        let restored: RecipeBook = ron::from_str(&text).unwrap();
        assert_eq!(restored.len(), book.len());
        assert_eq!(restored.get("gold_sword_blade"), book.get("gold_sword_blade"));
    }
}
