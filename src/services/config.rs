use crate::cli::ColorMode;
use crate::domain::models::ConfigFile;
use std::path::PathBuf;
use tracing::debug;

pub fn config_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/cmmc-scope/config.toml"))
}

pub fn load_config() -> anyhow::Result<ConfigFile> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let raw = std::fs::read_to_string(&path)?;
    let cfg: ConfigFile = toml::from_str(&raw)?;
    debug!(path = %path.display(), "config loaded");
    Ok(cfg)
}

/// CLI flag wins, then the config file, then auto-detection.
pub fn resolve_color(flag: Option<ColorMode>, cfg: &ConfigFile) -> ColorMode {
    flag.or(cfg.general.color).unwrap_or(ColorMode::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: ConfigFile = toml::from_str("").expect("parse");
        assert_eq!(cfg.general.reports_dir, "reports");
        assert_eq!(cfg.general.color, None);
    }

    #[test]
    fn general_section_parses() {
        let cfg: ConfigFile = toml::from_str(
            "[general]\nreports_dir = \"/srv/assessments\"\ncolor = \"never\"\n",
        )
        .expect("parse");
        assert_eq!(cfg.general.reports_dir, "/srv/assessments");
        assert_eq!(cfg.general.color, Some(ColorMode::Never));
    }

    #[test]
    fn flag_overrides_file() {
        let cfg: ConfigFile = toml::from_str("[general]\ncolor = \"always\"\n").expect("parse");
        assert_eq!(resolve_color(Some(ColorMode::Never), &cfg), ColorMode::Never);
        assert_eq!(resolve_color(None, &cfg), ColorMode::Always);
        assert_eq!(resolve_color(None, &ConfigFile::default()), ColorMode::Auto);
    }
}
