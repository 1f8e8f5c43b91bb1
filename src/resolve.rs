//! Observation dataset resolution.
//!
//! The setup pass that decides, for every requested diagnostic variable,
//! which observational reference dataset (if any) backs it. Resolution runs
//! once, synchronously, while [`ObsResolver`] is constructed: defaults
//! lookup, an on-disk existence check with a fallback search directory, and a
//! normalized descriptor for everything found. A variable that cannot be
//! resolved is skipped with a logged notice; only structural config problems
//! are errors.

use crate::config::ConfigRead;
use crate::defaults::VariableDefaults;
use crate::error::SetupResult;
use crate::logging::Logger;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config section holding run-level settings.
pub const BASIC_INFO_SECTION: &str = "diag_basic_info";

/// An observational dataset matched to one requested variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedObs {
    /// Path the dataset was found at (primary or fallback location).
    pub obs_file: PathBuf,
    /// Dataset label; the file name when the defaults record has none.
    pub obs_name: String,
    /// Variable name inside the dataset; the model variable name when the
    /// defaults record has none.
    pub obs_var: String,
}

/// Variable name -> resolved observation, in requested-variable order.
pub type ObsCatalog = IndexMap<String, ResolvedObs>;

/// Resolved observation state for one diagnostics run.
///
/// Built once by [`ObsResolver::from_config`] and immutable afterwards. The
/// accessors return owned copies, so callers cannot mutate setup state
/// through them.
#[derive(Debug, Clone)]
pub struct ObsResolver {
    use_defaults: bool,
    variable_defaults: VariableDefaults,
    compare_obs: bool,
    diag_var_list: Vec<String>,
    var_obs: ObsCatalog,
}

impl ObsResolver {
    /// Run the setup pass against a loaded configuration.
    ///
    /// Reads, in order: the `diag_basic_info` section (required),
    /// `use_defaults`, `custom_defaults` (only when defaults are enabled),
    /// the defaults table itself, `diag_var_list` (required, top-level),
    /// `compare_obs`, and `obs_data_loc`. When `compare_obs` is false the
    /// catalog stays empty and no filesystem access happens at all.
    ///
    /// Fatal errors are structural only: missing or mistyped keys, or a bad
    /// defaults override file. Per-variable resolution failures skip that
    /// variable and never abort the pass.
    pub fn from_config<C>(config: &C, logger: &Logger) -> SetupResult<Self>
    where
        C: ConfigRead + ?Sized,
    {
        config.require_section(BASIC_INFO_SECTION)?;
        let basic = Some(BASIC_INFO_SECTION);

        let use_defaults = config.get_bool(basic, "use_defaults")?.unwrap_or(false);

        let variable_defaults = if use_defaults {
            let override_path = config.get_path(basic, "custom_defaults")?;
            VariableDefaults::load(override_path.as_deref())?
        } else {
            VariableDefaults::empty()
        };

        let diag_var_list = config.require_string_list(None, "diag_var_list")?;
        let compare_obs = config.get_bool(basic, "compare_obs")?.unwrap_or(false);

        let var_obs = if compare_obs {
            let obs_data_loc = config.get_path(basic, "obs_data_loc")?;
            build_catalog(
                &diag_var_list,
                &variable_defaults,
                obs_data_loc.as_deref(),
                logger,
            )
        } else {
            // Model-only run: no observations, no filesystem probing.
            ObsCatalog::new()
        };

        if compare_obs && var_obs.is_empty() {
            eprintln!("{}", no_obs_warning());
        }

        Ok(Self {
            use_defaults,
            variable_defaults,
            compare_obs,
            diag_var_list,
            var_obs,
        })
    }

    /// Whether variable defaults were enabled for this run.
    pub fn use_defaults(&self) -> bool {
        self.use_defaults
    }

    /// Copy of the loaded variable defaults mapping.
    pub fn variable_defaults(&self) -> IndexMap<String, crate::defaults::VarDefault> {
        self.variable_defaults.records().clone()
    }

    /// Whether this run compares model output against observations.
    pub fn compare_obs(&self) -> bool {
        self.compare_obs
    }

    /// Copy of the requested diagnostic variable list, in request order.
    pub fn diag_var_list(&self) -> Vec<String> {
        self.diag_var_list.clone()
    }

    /// Copy of the variable -> observation catalog, in request order.
    pub fn observation_catalog(&self) -> ObsCatalog {
        self.var_obs.clone()
    }
}

/// One deterministic pass over the requested variables.
///
/// Skipped variables leave no catalog entry; a duplicate request resolves to
/// the same descriptor and stays a single entry.
fn build_catalog(
    vars: &[String],
    defaults: &VariableDefaults,
    obs_data_loc: Option<&Path>,
    logger: &Logger,
) -> ObsCatalog {
    let mut catalog = ObsCatalog::new();

    for var in vars {
        let Some(record) = defaults.get(var) else {
            logger.debug(&format!(
                "Variable '{var}' has no entry in the variable defaults ({})",
                defaults.source()
            ));
            continue;
        };

        let Some(given) = record.obs_file.as_deref() else {
            logger.debug(&format!("No observation file listed for variable '{var}'"));
            continue;
        };

        let Some(obs_file) = locate_obs_file(given, obs_data_loc) else {
            logger.debug(&format!(
                "Unable to find obs file '{}' for variable '{var}'",
                given.display()
            ));
            continue;
        };

        let obs_name = match &record.obs_name {
            Some(name) => name.clone(),
            None => file_label(&obs_file),
        };
        let obs_var = record.obs_var_name.clone().unwrap_or_else(|| var.clone());

        catalog.insert(
            var.clone(),
            ResolvedObs {
                obs_file,
                obs_name,
                obs_var,
            },
        );
    }

    catalog
}

/// Locate an observation file: the path as given first, then the entire
/// given value joined onto the fallback search directory.
///
/// The whole value is joined, not its basename, so `obs/ta.nc` under
/// fallback `/data` probes `/data/obs/ta.nc`. An absolute value replaces the
/// fallback on join and is therefore only ever probed as given.
pub fn locate_obs_file(given: &Path, fallback: Option<&Path>) -> Option<PathBuf> {
    if given.is_file() {
        return Some(given.to_path_buf());
    }

    if let Some(dir) = fallback {
        let candidate = dir.join(given);
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    None
}

/// File-name label for an accepted path.
fn file_label(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}

/// The warning printed when a compare run resolves no observations at all.
///
/// Distinct from the per-variable notices: those go to the debug log, this
/// goes to the screen so an otherwise-quiet run cannot silently lose every
/// comparison step. Variable-only steps (time series, climatologies) are
/// unaffected.
pub fn no_obs_warning() -> String {
    [
        "WARNING: no observation datasets were found for any requested variable,",
        "but compare_obs is enabled (model vs observations run).",
        "Variable-only steps (time series, climatologies) can still proceed;",
        "every observation-dependent step will be skipped.",
        "Rerun with --debug to log why each variable was skipped.",
    ]
    .join("\n")
}
