//! Layered settings: defaults, then an optional TOML file, then `CARBON_*`
//! environment variables. Command-line flags are applied last by the caller.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub store_path: PathBuf,
  pub host:       String,
  pub port:       u16,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      store_path: PathBuf::from("carbon_emission.db"),
      host:       "127.0.0.1".into(),
      port:       8080,
    }
  }
}

impl Settings {
  /// Read `path` if it exists, then overlay the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("CARBON"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    let mut settings: Settings = settings
      .try_deserialize()
      .context("failed to deserialise settings")?;
    settings.store_path = expand_tilde(&settings.store_path);
    Ok(settings)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~/` to `$HOME`.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let s = Settings::load(Path::new("/nonexistent/carbon.toml")).unwrap();
    assert_eq!(s.port, Settings::default().port);
    assert_eq!(s.address(), format!("{}:{}", s.host, s.port));
  }

  #[test]
  fn tilde_is_expanded_only_at_the_start() {
    let plain = Path::new("data/carbon.db");
    assert_eq!(expand_tilde(plain), plain);
    let odd = Path::new("data/~/carbon.db");
    assert_eq!(expand_tilde(odd), odd);
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(expand_tilde(Path::new("~/carbon.db")), PathBuf::from(home).join("carbon.db"));
    }
  }
}
