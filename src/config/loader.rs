//! Layered configuration loading
//!
//! Each layer overrides the ones before it:
//! `/etc/make-builder/config.toml`, `<config dir>/make-builder/config.toml`,
//! `~/.make-builder.toml`, `./.make-builder.toml`, the `--config` file, and
//! finally `MAKE_BUILDER_*` variables (`__` separates table and key, so
//! `MAKE_BUILDER_MAKE__PROGRAM=gmake` sets `make.program`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use super::model::Config;

const DIR_NAME: &str = "make-builder";
const CONFIG_FILE: &str = "config.toml";
const DOTFILE: &str = ".make-builder.toml";
const ENV_PREFIX: &str = "MAKE_BUILDER_";

/// Candidate config files, lowest precedence first
pub fn config_paths() -> Vec<PathBuf> {
    let system = Some(Path::new("/etc").join(DIR_NAME).join(CONFIG_FILE));
    let user = dirs::config_dir().map(|dir| dir.join(DIR_NAME).join(CONFIG_FILE));
    let home = dirs::home_dir().map(|dir| dir.join(DOTFILE));
    let local = Some(PathBuf::from(DOTFILE));

    [system, user, home, local].into_iter().flatten().collect()
}

/// The candidate config files that exist
pub fn find_config_files() -> Vec<PathBuf> {
    config_paths().into_iter().filter(|p| p.is_file()).collect()
}

/// Merge defaults, config files and environment into a [`Config`]
///
/// A missing `explicit` file is logged and skipped.
///
/// # Errors
/// Fails if any merged file or variable does not fit the schema.
pub fn load_config(explicit: Option<&str>) -> Result<Config> {
    let files = find_config_files()
        .into_iter()
        .chain(explicit.and_then(existing_file));

    let figment = files.fold(
        Figment::from(Serialized::defaults(Config::default())),
        |figment, path| {
            tracing::debug!("Merging config file {}", path.display());
            figment.merge(Toml::file(path))
        },
    );

    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("Invalid make-builder configuration")
}

fn existing_file(path: &str) -> Option<PathBuf> {
    let path = PathBuf::from(path);
    if path.is_file() {
        Some(path)
    } else {
        tracing::warn!("Config file {} does not exist, ignoring it", path.display());
        None
    }
}
