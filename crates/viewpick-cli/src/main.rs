//! viewpick CLI: advice on which dbt models to materialize.

use clap::{Parser, Subcommand};

use viewpick_advisor::{Advisor, AdviceReport};
use viewpick_core::AdvisorConfig;
use viewpick_db::{load_credentials, PgCatalog, ProjectDir};

#[derive(Parser)]
#[command(name = "viewpick")]
#[command(about = "Advice on which models to materialize in a dbt project", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the DAG and print candidate plans ranked by expected cost
    Advise {
        /// Root of the dbt project (defaults to the working directory)
        #[arg(short, long)]
        project_dir: Option<String>,

        /// Maximum number of models to materialize simultaneously. Higher
        /// values consider more plans but grow the runtime combinatorially.
        #[arg(short, long)]
        max_materializations: Option<usize>,

        /// Profile to read from profiles.yml
        #[arg(long)]
        profile: Option<String>,

        /// Target within the profile's outputs
        #[arg(short, long)]
        target: Option<String>,

        /// Multiply maintenance fractions into creation costs
        #[arg(long)]
        apply_maintenance_fraction: bool,
    },

    /// Verify the project directory, profiles.yml, and catalog tables
    Check {
        /// Root of the dbt project (defaults to the working directory)
        #[arg(short, long)]
        project_dir: Option<String>,

        /// Profile to read from profiles.yml
        #[arg(long)]
        profile: Option<String>,

        /// Target within the profile's outputs
        #[arg(short, long)]
        target: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Advise {
            project_dir,
            max_materializations,
            profile,
            target,
            apply_maintenance_fraction,
        } => {
            let mut config = AdvisorConfig::from_env();
            apply_overrides(&mut config, project_dir, profile, target);
            if let Some(cap) = max_materializations {
                config.max_materializations = cap;
            }
            if apply_maintenance_fraction {
                config.apply_maintenance_fraction = true;
            }
            advise(config)
        }
        Commands::Check {
            project_dir,
            profile,
            target,
        } => {
            let mut config = AdvisorConfig::from_env();
            apply_overrides(&mut config, project_dir, profile, target);
            check(config)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// CLI flags win over whatever the environment provided.
fn apply_overrides(
    config: &mut AdvisorConfig,
    project_dir: Option<String>,
    profile: Option<String>,
    target: Option<String>,
) {
    if let Some(dir) = project_dir {
        config.project_dir = Some(dir);
    }
    if let Some(profile) = profile {
        config.profile = Some(profile);
    }
    if let Some(target) = target {
        config.target = Some(target);
    }
}

fn open_catalog(config: &AdvisorConfig) -> Result<PgCatalog, Box<dyn std::error::Error>> {
    let root = config.project_dir.clone().unwrap_or_else(|| ".".to_string());
    let project = ProjectDir::locate(root)?;
    let creds = load_credentials(
        project.profiles_path(),
        config.profile.as_deref(),
        config.target.as_deref(),
    )?;
    Ok(PgCatalog::connect(&creds)?)
}

fn advise(config: AdvisorConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!();
    println!("Welcome to viewpick!");
    println!("Analyzing your DAG to find the cheapest materialization plan...");
    println!();

    let catalog = open_catalog(&config)?;
    let mut advisor = Advisor::new(catalog, config);
    let report = advisor.advise()?;

    print_report(&report);
    Ok(())
}

fn check(config: AdvisorConfig) -> Result<(), Box<dyn std::error::Error>> {
    let _ = open_catalog(&config)?;
    println!("✓ Project, profile, and catalog tables look good");
    Ok(())
}

fn print_report(report: &AdviceReport) {
    println!("Run: {} (DAG {})", report.id.0, report.graph_hash);
    println!(
        "Baseline cost (materialize nothing): {:.0}",
        report.baseline_cost
    );
    println!("Storage budget: {:.0} bytes", report.storage_budget);
    println!();

    if report.rows.is_empty() {
        println!("No candidate plan fits within the storage budget.");
        return;
    }

    let config_width = report
        .rows
        .iter()
        .map(|row| row.config.to_string().len())
        .max()
        .unwrap_or(0)
        .max("Config".len());

    println!("{:<config_width$}  {}", "Config", "Δ vs baseline");
    println!("{:<config_width$}  {}", "------", "-------------");
    for row in &report.rows {
        println!(
            "{:<config_width$}  {:+.3}%",
            row.config.to_string(),
            row.pct_vs_baseline
        );
    }

    println!();
    match report.best() {
        Some(best) if !best.config.is_baseline() => {
            println!("Our advice is to materialize: {}", best.config);
        }
        _ => {
            println!("Our advice is to materialize nothing.");
        }
    }
}
