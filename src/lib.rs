use anyhow::{Result, bail};
use log::debug;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod design;
pub mod environment;
pub mod error;
pub mod logging;
pub mod mission;
pub mod report;

pub use catalog::{
    Battery, Catalog, CatalogEntry, Category, Compute, DEFAULT_CATALOG_PATH, Frame, Payload,
    Propulsion, Radio, ResolvedComponents, list_category, load_catalog_from_path,
    recommended_roles, resolve_selection,
};
pub use design::{
    ComponentSelection, ConstraintSettings, DesignResult, apply_constraints, evaluate,
    evaluate_design,
};
pub use environment::{AltitudeBand, Environment, TemperatureBand};
pub use error::CatalogError;
pub use mission::WHITEFROST_PATH;

const ROOT_SENTINEL: &str = DEFAULT_CATALOG_PATH;
const MANIFEST: &str = "Cargo.toml";
const ENV_ROOT: &str = "UXS_ARCHITECT_ROOT";
const ENV_CATALOG_PATH: &str = "UXS_CATALOG_PATH";

/// A checkout holds the bundled catalog next to the manifest.
fn is_repo_root(candidate: &Path) -> bool {
    candidate.join(ROOT_SENTINEL).is_file() && candidate.join(MANIFEST).is_file()
}

fn checkout_at(path: &str) -> Option<PathBuf> {
    let path = Path::new(path);
    if path.as_os_str().is_empty() || !is_repo_root(path) {
        return None;
    }
    fs::canonicalize(path).ok()
}

fn checkout_above(start: &Path) -> Option<PathBuf> {
    let start = fs::canonicalize(start).ok()?;
    start
        .ancestors()
        .find(|dir| is_repo_root(dir))
        .map(Path::to_path_buf)
}

/// Where the data checkout was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootSource {
    Env,
    Executable,
    BuildHint,
}

impl RootSource {
    fn locate(self) -> Option<PathBuf> {
        match self {
            RootSource::Env => checkout_at(&env::var(ENV_ROOT).ok()?),
            RootSource::Executable => checkout_above(env::current_exe().ok()?.parent()?),
            RootSource::BuildHint => checkout_at(option_env!("UXS_ARCHITECT_ROOT_HINT")?),
        }
    }
}

const ROOT_SOURCES: [RootSource; 3] =
    [RootSource::Env, RootSource::Executable, RootSource::BuildHint];

/// Locate the checkout that holds the bundled data files.
///
/// Order: `UXS_ARCHITECT_ROOT`, directories above the running executable, then
/// the root baked in at build time.
pub fn find_repo_root() -> Result<PathBuf> {
    for source in ROOT_SOURCES {
        if let Some(root) = source.locate() {
            debug!("data root {} (from {source:?})", root.display());
            return Ok(root);
        }
    }
    bail!(
        "Unable to locate the uxs-architect data directory. Set {ENV_ROOT} to the checkout or pass --catalog."
    );
}

pub fn default_catalog_path(repo_root: &Path) -> PathBuf {
    repo_root.join(DEFAULT_CATALOG_PATH)
}

pub fn default_whitefrost_path(repo_root: &Path) -> PathBuf {
    repo_root.join(WHITEFROST_PATH)
}

/// Catalog path from the CLI flag, then `UXS_CATALOG_PATH`, then the checkout.
pub fn resolve_catalog_path(cli_override: Option<&Path>) -> Result<PathBuf> {
    let explicit = cli_override
        .map(Path::to_path_buf)
        .or_else(|| {
            env::var_os(ENV_CATALOG_PATH)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        });
    match explicit {
        Some(path) => Ok(path),
        None => find_repo_root().map(|root| default_catalog_path(&root)),
    }
}
