//! Worker action: one forge step on a hot piece at the anvil

use crate::config::ForgeConfig;
use crate::entity::ItemStack;
use crate::simulation::{ForgeStep, RecipeBook, work_in_range};

/// Result of a single forge step
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkOutcome {
    /// Stack carries no forge component
    NotForgeable,
    /// Below working temperature; nothing changed
    TooCold,
    /// No recipe of that name, or it does not take this item
    UnknownRecipe,
    /// The piece is already committed to another recipe
    WrongRecipe,
    /// Step applied, recipe still in progress
    Worked,
    /// Recipe finished; the stack now holds `output`
    Completed { output: String },
    /// Work left `0..=MAX_WORK`; progress was reset
    Ruined,
}

/// Apply `step` to the stack toward the recipe `recipe_name`
///
/// The piece commits to the recipe on the first step that leaves work on
/// it. A step that brings work back to zero clears the commitment.
pub fn work_item(
    stack: &mut ItemStack,
    recipe_name: &str,
    step: ForgeStep,
    book: &RecipeBook,
    now: u64,
    config: &ForgeConfig,
) -> WorkOutcome {
    let Some(recipe) = book.get(recipe_name) else {
        return WorkOutcome::UnknownRecipe;
    };
    if !recipe.accepts(&stack.item) {
        return WorkOutcome::UnknownRecipe;
    }

    let Some(forge) = stack.forge_mut() else {
        return WorkOutcome::NotForgeable;
    };
    if !forge.is_workable(now, config) {
        return WorkOutcome::TooCold;
    }
    if forge.recipe().is_some_and(|current| current != recipe.name) {
        return WorkOutcome::WrongRecipe;
    }

    forge.add_step(step);
    let work = forge.work();

    // Back to zero work: the piece has already reset itself
    if work == 0 {
        return WorkOutcome::Worked;
    }

    if !work_in_range(work) {
        forge.reset();
        log::debug!("{} ruined at work {}", stack.item, work);
        return WorkOutcome::Ruined;
    }

    if recipe.is_complete(work, forge.steps()) {
        let output = recipe.output.clone();
        forge.reset();
        log::info!("Forged {} from {}", output, stack.item);
        stack.transform(&output, now, config);
        return WorkOutcome::Completed { output };
    }

    forge.set_recipe(Some(&recipe.name));
    WorkOutcome::Worked
}
