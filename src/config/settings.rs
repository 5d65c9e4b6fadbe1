//! Configuration settings for the Nurikabe SAT solver

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub solver: SolverConfig,
    pub input: InputConfig,
    pub encoding: EncodingConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub backend: SolverBackendKind,
    /// Solver executable, either a path or a name looked up on `PATH`
    pub executable: PathBuf,
    /// Arguments placed before the formula and output paths
    #[serde(default)]
    pub extra_args: Vec<String>,
    pub work_directory: PathBuf,
    pub formula_file: String,
    pub output_file: String,
    #[serde(default)]
    pub show_solver_output: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackendKind {
    External,
    Cadical,
}

impl FromStr for SolverBackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "external" => Ok(SolverBackendKind::External),
            "cadical" => Ok(SolverBackendKind::Cadical),
            other => anyhow::bail!("Unknown solver backend '{}' (expected external or cadical)", other),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub puzzle_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// Force unlabeled cells out of reach of every `2` clue to black
    pub reduce_unreachable_cells: bool,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            reduce_unreachable_cells: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub black_glyph: char,
    pub unlabeled_glyph: char,
    pub output_directory: PathBuf,
    pub save_solutions: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("Unknown output format '{}' (expected text or json)", other),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Any `log::LevelFilter` name: off, error, warn, info, debug, trace
    pub level: String,
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        log::LevelFilter::from_str(&self.level)
            .map_err(|_| anyhow::anyhow!("Unknown log level '{}'", self.level))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            solver: SolverConfig {
                backend: SolverBackendKind::External,
                executable: PathBuf::from("./glucose"),
                extra_args: Vec::new(),
                work_directory: PathBuf::from("."),
                formula_file: "task.cnf".to_string(),
                output_file: "solution.txt".to_string(),
                show_solver_output: false,
            },
            input: InputConfig {
                puzzle_file: PathBuf::from("input/puzzles/single.txt"),
            },
            encoding: EncodingConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Text,
                black_glyph: '#',
                unlabeled_glyph: '.',
                output_directory: PathBuf::from("output/solutions"),
                save_solutions: false,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a YAML file if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        let black = self.output.black_glyph;
        let unlabeled = self.output.unlabeled_glyph;

        if black == unlabeled {
            anyhow::bail!("Black and unlabeled glyphs must differ (both '{}')", black);
        }
        for glyph in [black, unlabeled] {
            if glyph == '1' || glyph == '2' || glyph.is_whitespace() {
                anyhow::bail!("Glyph '{}' would be confused with a clue or whitespace", glyph);
            }
        }

        if self.solver.formula_file.trim().is_empty() || self.solver.output_file.trim().is_empty() {
            anyhow::bail!("Solver formula and output file names must not be empty");
        }
        if self.solver.formula_file == self.solver.output_file {
            anyhow::bail!(
                "Solver formula and output files must differ (both '{}')",
                self.solver.formula_file
            );
        }

        self.logging.level_filter()?;

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref puzzle_file) = cli_overrides.puzzle_file {
            self.input.puzzle_file = puzzle_file.clone();
        }
        if let Some(backend) = cli_overrides.backend {
            self.solver.backend = backend;
        }
        if let Some(ref executable) = cli_overrides.executable {
            self.solver.executable = executable.clone();
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if cli_overrides.verbose {
            self.logging.level = "debug".to_string();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub puzzle_file: Option<PathBuf>,
    pub backend: Option<SolverBackendKind>,
    pub executable: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.solver.backend, SolverBackendKind::External);
        assert!(settings.encoding.reduce_unreachable_cells);
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.solver.backend = SolverBackendKind::Cadical;
        settings.output.black_glyph = '█';
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.solver.backend, SolverBackendKind::Cadical);
        assert_eq!(loaded.output.black_glyph, '█');
        assert_eq!(loaded.solver.formula_file, "task.cnf");
    }

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let temp_dir = tempdir().unwrap();
        let settings = Settings::load_or_default(&temp_dir.path().join("absent.yaml")).unwrap();
        assert_eq!(settings.solver.output_file, "solution.txt");
    }

    #[test]
    fn test_validation_failures() {
        let mut settings = Settings::default();
        settings.output.black_glyph = '.';
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.output.black_glyph = '2';
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.solver.output_file = settings.solver.formula_file.clone();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.logging.level = "chatty".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            puzzle_file: Some(PathBuf::from("p.txt")),
            backend: Some(SolverBackendKind::Cadical),
            format: Some(OutputFormat::Json),
            verbose: true,
            ..Default::default()
        };
        settings.merge_with_cli(&overrides);

        assert_eq!(settings.input.puzzle_file, PathBuf::from("p.txt"));
        assert_eq!(settings.solver.backend, SolverBackendKind::Cadical);
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.solver.executable, PathBuf::from("./glucose"));
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("CaDiCaL".parse::<SolverBackendKind>().unwrap(), SolverBackendKind::Cadical);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
