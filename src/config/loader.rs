//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::value_objects::ConfigWarning;
use crate::error::{MetaformError, MetaformResult};

use super::types::{Config, CONFIG_FILE};

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> MetaformResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| MetaformError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// User-level config: `<config dir>/metaform/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("metaform").join("config.toml"))
}

/// Load the project file, else the user file, else defaults; then apply env overrides
///
/// A missing file is not an error; a malformed one is.
pub fn load_or_default(project_root: &Path) -> MetaformResult<(Config, Vec<ConfigWarning>)> {
    load_layered(project_root, user_config_path().as_deref())
}

/// `load_or_default` with an explicit user config location
pub fn load_layered(
    project_root: &Path,
    user_config: Option<&Path>,
) -> MetaformResult<(Config, Vec<ConfigWarning>)> {
    let project_config = project_root.join(CONFIG_FILE);
    let candidates = std::iter::once(project_config.as_path()).chain(user_config);

    for path in candidates {
        if path.is_file() {
            debug!(path = %path.display(), "loading config");
            let (config, warnings) = load_with_warnings(path)?;
            return Ok((with_env_overrides(config), warnings));
        }
    }
    Ok((with_env_overrides(Config::default()), Vec::new()))
}

/// Apply environment variable overrides (METAFORM_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |name| std::env::var(name).ok())
}

/// Apply overrides read through `lookup`
pub fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    let value = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(version) = value("METAFORM_API_VERSION") {
        config.project.api_version = version.trim().to_string();
    }

    if let Some(path) = value("METAFORM_REGISTRY_PATH") {
        config.registry.path = Some(PathBuf::from(path));
    }

    if let Some(dir) = value("METAFORM_DEFAULT_DIRECTORY") {
        config.project.default_directory = PathBuf::from(dir);
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "project",
        "default_directory",
        "package_directories",
        "api_version",
        "registry",
        "path",
        "convert",
        "buffer_size",
        "package_name",
        "ignore",
        "file",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
