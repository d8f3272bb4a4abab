// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use billviz_transforms::{BucketZone, DEFAULT_LABEL_FORMAT, DEFAULT_MAX_SERIES, GroupBy, Pipeline};
use serde::{Deserialize, Serialize};

use crate::cli::ChartArgs;

/// Chart defaults read from `config.toml`. Command line flags take precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Dedicated series before folding into "Others"
    pub(crate) max_series: usize,
    /// Bucketing and display zone
    pub(crate) zone: BucketZone,
    /// Row label format
    pub(crate) label_format: String,
    /// Series dimension
    pub(crate) group_by: GroupBy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_series: DEFAULT_MAX_SERIES,
            // Terminal users read hours on their own clock.
            zone: BucketZone::Local,
            label_format: DEFAULT_LABEL_FORMAT.to_owned(),
            group_by: GroupBy::Customer,
        }
    }
}

impl Settings {
    /// Load settings from `path`, the default config location, or fall back to defaults.
    ///
    /// An explicit path must exist; a missing default file is not an error.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(p) = path {
            return Self::read(p);
        }
        match default_path() {
            Some(p) if p.exists() => Self::read(&p),
            _ => Ok(Self::default()),
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let settings = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Merge chart flags into settings (flags take precedence)
    pub(crate) fn merge_chart_args(&mut self, args: &ChartArgs) {
        if let Some(group_by) = args.group_by {
            self.group_by = group_by.into();
        }
        if let Some(max_series) = args.max_series {
            self.max_series = max_series;
        }
        if let Some(zone) = args.zone {
            self.zone = zone;
        }
        if let Some(label_format) = &args.label_format {
            self.label_format.clone_from(label_format);
        }
    }

    /// Pipeline options described by these settings.
    pub(crate) fn pipeline(&self) -> Pipeline {
        Pipeline::new()
            .with_max_series(self.max_series)
            .with_zone(self.zone)
            .with_label_format(self.label_format.clone())
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("billviz/config.toml"))
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cli::{Cli, Command};

    #[test]
    fn partial_file_keeps_defaults() {
        let settings = Settings::parse("max_series = 3\nzone = \"+05:30\"\n").unwrap();
        assert_eq!(settings.max_series, 3);
        assert_eq!(settings.zone, "+05:30".parse().unwrap());
        assert_eq!(settings.label_format, DEFAULT_LABEL_FORMAT);
        assert_eq!(settings.group_by, GroupBy::Customer);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn bad_zone_is_rejected() {
        assert!(Settings::parse("zone = \"mars\"").is_err());
        assert!(Settings::parse("group_by = \"merchant\"").is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let mut settings = Settings::parse("group_by = \"sku\"\nmax_series = 4\n").unwrap();
        let cli = Cli::parse_from([
            "billviz", "chart", "-e", "e.json", "-s", "s.json", "-n", "2", "-z", "utc",
        ]);
        let Command::Chart(args) = cli.command else {
            panic!("expected chart subcommand");
        };
        settings.merge_chart_args(&args);

        assert_eq!(settings.group_by, GroupBy::Sku);
        assert_eq!(settings.max_series, 2);
        assert_eq!(settings.pipeline().zone, BucketZone::Utc);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let missing = Path::new("/nonexistent/billviz/config.toml");
        assert!(Settings::load(Some(missing)).is_err());
    }
}
