//! Command-line front end for the design checker.
//!
//! Usage:
//!   uxs-architect list frames
//!   uxs-architect roles isr
//!   uxs-architect evaluate --frame quad-x8 --propulsion t-motor-mn501 \
//!       --battery li-ion-6s-22ah --compute jetson-orin-nx --radio doodle-mini \
//!       --payload eo-ir-gimbal --altitude-band high_desert
//!   uxs-architect mission --whitefrost --geojson-out overlay.geojson
//!   uxs-architect validate data/catalog.json

use anyhow::{Context, Result, bail};
use clap::builder::PossibleValuesParser;
use clap::{ArgAction, Args, Parser, Subcommand};
use log::info;
use serde_json::Value;
use std::path::{Path, PathBuf};
use uxs_architect::mission::{
    ExportOptions, MissionNode, MissionSummary, build_mission_platform, extend_catalog_with_nodes,
    load_mission_project, mission_project_to_cot, mission_project_to_geojson, normalize_nodes,
    project_bundle, write_json_atomic,
};
use uxs_architect::report::{list_columns, render_evaluation, render_table};
use uxs_architect::{
    AltitudeBand, Catalog, Category, ComponentSelection, ConstraintSettings, Environment,
    TemperatureBand, default_whitefrost_path, evaluate_design, find_repo_root,
    list_category, load_catalog_from_path, logging, recommended_roles, resolve_catalog_path,
};

#[derive(Parser, Debug)]
#[command(name = "uxs-architect")]
#[command(about = "Check a UxS component stack for mass, thrust, power and endurance margins")]
struct Cli {
    /// Path to catalog JSON (defaults to UXS_CATALOG_PATH, then data/catalog.json).
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Increase log detail on stderr (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog entries in one category.
    List {
        #[arg(value_parser = PossibleValuesParser::new(Category::names()))]
        category: String,
    },
    /// Show payloads that satisfy a role tag.
    Roles { role: String },
    /// Evaluate a specific design stack.
    Evaluate(EvaluateArgs),
    /// Import/export MissionProject bundles.
    Mission(MissionArgs),
    /// Schema-check a catalog file and print record counts.
    Validate {
        /// Catalog to check; defaults to the resolved catalog path.
        file: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    #[arg(long)]
    frame: String,
    #[arg(long)]
    propulsion: String,
    #[arg(long)]
    battery: String,
    #[arg(long)]
    compute: String,
    #[arg(long)]
    radio: String,
    #[arg(long = "payload")]
    payloads: Vec<String>,
    /// Mounted node IDs (for traceability).
    #[arg(long = "node")]
    nodes: Vec<String>,
    /// MissionProject JSON to import nodes/components from.
    #[arg(long)]
    mission_project: Option<PathBuf>,
    /// Environment altitude band for thrust margin.
    #[arg(long, default_value = "sea_level",
          value_parser = PossibleValuesParser::new(AltitudeBand::names()))]
    altitude_band: String,
    /// Environment temperature band for battery performance.
    #[arg(long, default_value = "standard",
          value_parser = PossibleValuesParser::new(TemperatureBand::names()))]
    temperature_band: String,
    /// Minimum acceptable thrust-to-weight (adjusted).
    #[arg(long)]
    min_twr: Option<f64>,
    /// Minimum environment-adjusted endurance (minutes).
    #[arg(long)]
    min_endurance: Option<f64>,
    /// Maximum AUW (kg).
    #[arg(long)]
    max_auw: Option<f64>,
    /// Write a MissionProject bundle with this platform.
    #[arg(long)]
    mission_out: Option<PathBuf>,
    /// Platform ID for MissionProject export.
    #[arg(long)]
    platform_id: Option<String>,
    /// Platform name for MissionProject export.
    #[arg(long)]
    platform_name: Option<String>,
    /// Intended mission role tag for export (repeatable).
    #[arg(long = "intended-role")]
    intended_roles: Vec<String>,
    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct MissionArgs {
    /// Use the bundled Project WHITEFROST preset.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    whitefrost: bool,
    /// Path to MissionProject JSON.
    #[arg(long)]
    file: Option<PathBuf>,
    /// Write GeoJSON overlay to file.
    #[arg(long)]
    geojson_out: Option<PathBuf>,
    /// Write CoT-like JSON stub to file.
    #[arg(long)]
    cot_out: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::List { category } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            handle_list(&catalog, &category)
        }
        Command::Roles { role } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            handle_roles(&catalog, &role);
            Ok(())
        }
        Command::Evaluate(args) => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            handle_evaluate(catalog, &args)
        }
        Command::Mission(args) => handle_mission(&args),
        Command::Validate { file } => {
            let path = match file {
                Some(path) => path,
                None => resolve_catalog_path(cli.catalog.as_deref())?,
            };
            handle_validate(&path)
        }
    }
}

fn load_catalog(cli_override: Option<&Path>) -> Result<Catalog> {
    let path = resolve_catalog_path(cli_override)?;
    info!("using catalog {}", path.display());
    load_catalog_from_path(&path)
}

fn handle_list(catalog: &Catalog, category: &str) -> Result<()> {
    let category = Category::try_from(category)?;
    let rows = list_category(catalog, category)?;
    print!("{}", render_table(&rows, &list_columns(&rows)));
    Ok(())
}

fn handle_roles(catalog: &Catalog, role: &str) {
    let matches = recommended_roles(catalog, role);
    if matches.is_empty() {
        println!("No payloads tagged with role '{role}'");
        return;
    }
    let rows: Vec<Value> = matches
        .into_iter()
        .filter_map(|payload| serde_json::to_value(payload).ok())
        .collect();
    print!(
        "{}",
        render_table(&rows, &["id", "name", "mass_kg", "power_w", "role_tags"])
    );
}

fn handle_evaluate(catalog: Catalog, args: &EvaluateArgs) -> Result<()> {
    let mut imported_nodes: Vec<MissionNode> = Vec::new();
    let catalog = match &args.mission_project {
        Some(path) => {
            let project = load_mission_project(path)?;
            imported_nodes = normalize_nodes(project_bundle(&project));
            info!(
                "imported {} node(s) from {}",
                imported_nodes.len(),
                path.display()
            );
            extend_catalog_with_nodes(&catalog, &imported_nodes)
        }
        None => catalog,
    };

    let selection = ComponentSelection::new(
        &args.frame,
        &args.propulsion,
        &args.battery,
        &args.compute,
        &args.radio,
    )
    .with_payloads(&args.payloads)
    .with_mounted_nodes(&args.nodes);
    let environment = Environment::from_names(&args.altitude_band, &args.temperature_band);
    let constraints = ConstraintSettings {
        min_thrust_to_weight: args.min_twr,
        min_adjusted_endurance_min: args.min_endurance,
        max_auw_kg: args.max_auw,
    };

    let result = evaluate_design(&catalog, &selection, Some(&environment), Some(&constraints))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_evaluation(&selection, &result));
    }

    if let Some(out) = &args.mission_out {
        let options = ExportOptions {
            intended_roles: args.intended_roles.clone(),
            platform_id: args.platform_id.clone(),
            platform_name: args.platform_name.clone(),
        };
        let bundle =
            build_mission_platform(&selection, &result, &environment, &options, &imported_nodes);
        write_json_atomic(out, &bundle)?;
        if !args.json {
            println!("MissionProject written to {}", out.display());
        }
    }
    Ok(())
}

fn handle_mission(args: &MissionArgs) -> Result<()> {
    let path = match (&args.file, args.whitefrost) {
        (Some(path), _) => path.clone(),
        (None, true) => default_whitefrost_path(&find_repo_root()?),
        (None, false) => bail!("mission requires --whitefrost or --file"),
    };
    let project = load_mission_project(&path)?;
    println!("{}", MissionSummary::from_project(&project));

    if let Some(out) = &args.geojson_out {
        write_json_atomic(out, &mission_project_to_geojson(&project))?;
        println!("GeoJSON written to {}", out.display());
    }
    if let Some(out) = &args.cot_out {
        write_json_atomic(out, &mission_project_to_cot(&project))?;
        println!("CoT stub written to {}", out.display());
    }
    if args.geojson_out.is_none() && args.cot_out.is_none() {
        println!(
            "{}",
            serde_json::to_string_pretty(&project).context("rendering MissionProject")?
        );
    }
    Ok(())
}

fn handle_validate(path: &Path) -> Result<()> {
    let catalog = load_catalog_from_path(path)?;
    println!("{}: ok", path.display());
    for (category, count) in catalog.counts() {
        println!("  {category}: {count}");
    }
    Ok(())
}
