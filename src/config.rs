//! Locating and loading `gridlink.toml`.

use directories::ProjectDirs;
use gridlink_core::Config;
use std::path::PathBuf;

/// Load the config from `config_file`, or from the user config dir when no
/// file is given. Problems are returned as warnings and the defaults are used.
pub fn load_config(config_file: Option<&PathBuf>) -> (Config, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let config_path = config_file.cloned().or_else(user_config_path);

    if let Some(path) = config_path.as_ref() {
        if path.exists() {
            match Config::load(path) {
                Ok(config) => return (config, warnings),
                Err(err) => warnings.push(format!("Failed to load {}: {}", path.display(), err)),
            }
        } else if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
    }

    (Config::default(), warnings)
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "gridlink")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("gridlink.toml");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gridlink-config-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_explicit_file_is_loaded() {
        let path = temp_path("ok.toml");
        fs::write(&path, "[limits]\nmax_rows = 10\n").unwrap();
        let (config, warnings) = load_config(Some(&path));
        fs::remove_file(&path).ok();

        assert!(warnings.is_empty());
        assert_eq!(config.limits.max_rows, 10);
        assert_eq!(config.limits.max_cols, 16_384);
    }

    #[test]
    fn test_missing_explicit_file_warns() {
        let path = temp_path("absent.toml");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config, Config::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Config file not found"));
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let path = temp_path("bad.toml");
        fs::write(&path, "[limits]\ncolour = 1\n").unwrap();
        let (config, warnings) = load_config(Some(&path));
        fs::remove_file(&path).ok();

        assert_eq!(config, Config::default());
        assert!(warnings[0].starts_with("Failed to load"));
    }
}
