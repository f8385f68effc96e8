//! Utility functions for CLI commands.

use std::path::{Path, PathBuf};

use codex_algorithm::Config;

use crate::Cli;

/// Default base configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".codex";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Gets the default config file path.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_BASE_DIR).join(DEFAULT_CONFIG_FILE))
}

/// Loads the configuration named by `--config`, else the default file if it
/// exists, else built-in defaults.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    if let Some(path) = cli.config.as_deref() {
        return Ok(Config::load(path)?);
    }
    match default_config_path() {
        Some(path) if path.exists() => Ok(Config::load(path)?),
        _ => Ok(Config::default()),
    }
}

/// Loads a YAML or JSON file. The extension picks the format; YAML otherwise.
pub fn load_file<T: serde::de::DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)?;
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("yaml");

    let value = match ext.to_lowercase().as_str() {
        "json" => serde_json::from_str(&content)?,
        _ => serde_yaml::from_str(&content)?,
    };

    Ok(value)
}

/// Outputs result as JSON or YAML.
pub fn output_result<T: serde::Serialize>(
    result: &T,
    output_path: Option<&str>,
    as_json: bool,
) -> anyhow::Result<()> {
    let output = if as_json {
        let mut s = serde_json::to_string_pretty(result)?;
        s.push('\n');
        s
    } else {
        serde_yaml::to_string(result)?
    };

    match output_path {
        Some(path) => std::fs::write(path, output)?,
        None => print!("{}", output),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("labels.json");
        std::fs::write(&json, "[0, 1, 1]").unwrap();
        let v: Vec<i32> = load_file(json.to_str().unwrap()).unwrap();
        assert_eq!(v, vec![0, 1, 1]);

        let yaml = dir.path().join("labels.yaml");
        let mut f = std::fs::File::create(&yaml).unwrap();
        writeln!(f, "- 2\n- 3").unwrap();
        let v: Vec<i32> = load_file(yaml.to_str().unwrap()).unwrap();
        assert_eq!(v, vec![2, 3]);
    }

    #[test]
    fn output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.json");
        output_result(&vec![1, 2], out.to_str(), true).unwrap();
        let back: Vec<i32> = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(back, vec![1, 2]);
    }
}
