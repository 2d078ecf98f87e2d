use anyhow::{Context, bail};
use clap::Parser;
use ember::config::AppConfig;
use ember::scenario::{ScenarioDefinition, ScenarioExecutor, ScenarioExecutorConfig};
use ember_core::world::{World, load_world, save_world};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (RON) to execute
    scenario: Option<PathBuf>,

    /// Configuration file (RON); defaults to ./ember.ron when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extra ticks to simulate after the scenario actions
    #[arg(long, default_value = "0")]
    ticks: u64,

    /// Start from a saved world instead of an empty one
    #[arg(long)]
    load: Option<PathBuf>,

    /// Save the final world to this path
    #[arg(long)]
    save: Option<PathBuf>,

    /// Write the JSON execution report here instead of the report directory
    #[arg(long)]
    report: Option<PathBuf>,

    /// List the built-in anvil recipes
    #[arg(long)]
    list_recipes: bool,

    /// Log every executed action
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let app = AppConfig::load(args.config.as_deref())?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(app.logging.filter.as_str()),
    )
    .init();

    if args.list_recipes {
        list_recipes(&World::new(app.forge.clone()));
        return Ok(());
    }

    let Some(scenario_path) = args.scenario.as_deref() else {
        bail!("No scenario given (try --help)");
    };
    let scenario = ScenarioDefinition::from_file(scenario_path)?;
    let forge_config = scenario.config.clone().unwrap_or_else(|| app.forge.clone());
    forge_config
        .validate()
        .with_context(|| format!("Invalid forge config in {}", scenario_path.display()))?;

    let mut world = match args.load.as_deref() {
        Some(path) => load_world(path, forge_config)
            .with_context(|| format!("Failed to load world from {}", path.display()))?,
        None => World::new(forge_config),
    };

    log::info!("Running scenario '{}'", scenario.name);
    let mut executor = ScenarioExecutor::with_config(ScenarioExecutorConfig {
        verbose: args.verbose || app.output.verbose,
        extra_ticks: args.ticks,
    });
    let report = executor.execute_scenario(&scenario, &mut world)?;
    print!("{}", report.summary());

    // An empty report_dir disables the default report
    let report_path = args.report.clone().or_else(|| {
        (!app.output.report_dir.is_empty()).then(|| {
            let file = scenario.name.replace(|c: char| !c.is_ascii_alphanumeric(), "_");
            PathBuf::from(&app.output.report_dir).join(format!("{}.json", file))
        })
    });
    if let Some(path) = report_path {
        report.save_json(&path)?;
        log::info!("Report written to {}", path.display());
    }

    if let Some(path) = args.save.as_deref() {
        save_world(&world, path)
            .with_context(|| format!("Failed to save world to {}", path.display()))?;
    }

    if !report.passed {
        std::process::exit(1);
    }
    Ok(())
}

fn list_recipes(world: &World) {
    println!("Anvil recipes:");
    for recipe in world.recipes().iter() {
        println!(
            "  {:<24} {} -> {} (work {}, {} rules)",
            recipe.name,
            recipe.input,
            recipe.output,
            recipe.target_work,
            recipe.rules.len()
        );
    }
}
