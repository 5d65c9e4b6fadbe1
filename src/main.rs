//! Main CLI application for the Nurikabe SAT solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nurikabe_sat::{
    config::{CliOverrides, OutputFormat, Settings, SolverBackendKind},
    nurikabe::{
        create_example_puzzles, load_grid_from_file, puzzle_files_in_directory, puzzle_name,
        save_grid_to_file, Grid, Shading,
    },
    puzzle::{solve_batch, BatchSummary, NurikabeProblem, SolutionValidator, ValidationReport},
    utils::{format_grid_with_coords, init_logging, ColorOutput},
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "nurikabe_sat")]
#[command(about = "Nurikabe SAT Solver (clues 1 and 2)")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a single puzzle
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// Solver backend: external or cadical (overrides config)
        #[arg(short, long)]
        backend: Option<SolverBackendKind>,

        /// External solver executable (overrides config)
        #[arg(short, long)]
        solver: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: text or json (overrides config)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Save the solution to the output directory
        #[arg(long)]
        save: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write the DIMACS encoding of a puzzle without solving it
    Encode {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// Formula file; standard output when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Solve every puzzle file in a directory in parallel
    Batch {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Directory of `*.txt` puzzle files
        #[arg(short, long, default_value = "input/puzzles")]
        directory: PathBuf,

        /// Solver backend: external or cadical (overrides config)
        #[arg(short, long)]
        backend: Option<SolverBackendKind>,

        /// External solver executable (overrides config)
        #[arg(short, long)]
        solver: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save every solution to the output directory
        #[arg(long)]
        save: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Check a rendered solution against its puzzle
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,

        /// Rendered solution file
        #[arg(short, long)]
        solution: PathBuf,
    },

    /// Show a puzzle with coordinates and its clause statistics
    Inspect {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,
    },

    /// Write a checkerboard benchmark puzzle of `1` clues
    Generate {
        /// Number of rows and columns
        #[arg(short, long, default_value_t = 100)]
        size: usize,

        /// Puzzle file to write
        #[arg(short, long, default_value = "input/benchmark.txt")]
        output: PathBuf,
    },

    /// Create example configuration and puzzle files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            puzzle,
            backend,
            solver,
            output,
            format,
            save,
            verbose,
        } => {
            let overrides = CliOverrides {
                puzzle_file: puzzle,
                backend,
                executable: solver,
                output_dir: output,
                format,
                verbose,
            };
            solve_command(load_settings(&config, &overrides)?, save)
        }
        Commands::Encode {
            config,
            puzzle,
            output,
        } => {
            let overrides = CliOverrides {
                puzzle_file: puzzle,
                ..Default::default()
            };
            encode_command(load_settings(&config, &overrides)?, output)
        }
        Commands::Batch {
            config,
            directory,
            backend,
            solver,
            output,
            save,
            verbose,
        } => {
            let overrides = CliOverrides {
                backend,
                executable: solver,
                output_dir: output,
                verbose,
                ..Default::default()
            };
            batch_command(load_settings(&config, &overrides)?, directory, save)
        }
        Commands::Check {
            config,
            puzzle,
            solution,
        } => {
            let settings = load_settings(&config, &CliOverrides::default())?;
            check_command(&settings, &puzzle, &solution)?;
            Ok(())
        }
        Commands::Inspect { config, puzzle } => {
            let overrides = CliOverrides {
                puzzle_file: Some(puzzle),
                ..Default::default()
            };
            inspect_command(load_settings(&config, &overrides)?)
        }
        Commands::Generate { size, output } => generate_command(size, output),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

/// Load, override and validate the settings, then start logging
fn load_settings(config_path: &Path, overrides: &CliOverrides) -> Result<Settings> {
    if !config_path.exists() {
        eprintln!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
    }

    let mut settings = Settings::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    settings.merge_with_cli(overrides);
    settings
        .validate()
        .context("Configuration validation failed")?;

    init_logging(settings.logging.level_filter()?)?;
    log::debug!("Settings: {:?}", settings);

    Ok(settings)
}

fn solve_command(settings: Settings, save: bool) -> Result<()> {
    let format = settings.output.format;
    let text = format == OutputFormat::Text;

    if text {
        println!("{}", ColorOutput::info("🔄 Starting Nurikabe Solver"));
    }

    let start_time = Instant::now();
    let problem = NurikabeProblem::new(settings.clone()).context("Failed to create puzzle problem")?;
    log::debug!("Puzzle {}:\n{}", problem.name(), format_grid_with_coords(problem.grid()));

    let outcome = problem.solve().context("Failed to solve puzzle")?;
    let total_time = start_time.elapsed();

    if text {
        match outcome.solution() {
            Some(solution) if solution.is_valid() => println!(
                "{}",
                ColorOutput::success(&format!(
                    "✅ Solved {} in {:.3}s",
                    solution.name,
                    total_time.as_secs_f64()
                ))
            ),
            Some(solution) => {
                println!(
                    "{}",
                    ColorOutput::warning("⚠️  Solver model breaks the puzzle rules")
                );
                println!("{}", solution.validation);
            }
            None => println!("{}", ColorOutput::warning("❌ No solution exists")),
        }
    }
    print!("{}", outcome.format(format)?);
    if !text {
        println!();
    }

    if save || settings.output.save_solutions {
        let path = outcome
            .save_to_directory(&settings.output.output_directory, format)
            .context("Failed to save solution")?;
        if text {
            println!("{}", ColorOutput::success(&format!("Saved to {}", path.display())));
        }
    }

    Ok(())
}

fn encode_command(settings: Settings, output: Option<PathBuf>) -> Result<()> {
    let problem = NurikabeProblem::new(settings).context("Failed to create puzzle problem")?;
    let (formula, stats) = problem.encode()?;

    match output {
        Some(path) => {
            formula
                .save_to_file(&path)
                .with_context(|| format!("Failed to write formula to {}", path.display()))?;
            println!(
                "{}",
                ColorOutput::success(&format!("Wrote {}", path.display()))
            );
            println!("{}", stats);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            formula
                .write_dimacs(&mut stdout)
                .context("Failed to write formula")?;
            stdout.flush()?;
            eprintln!("{}", stats);
        }
    }

    Ok(())
}

fn batch_command(settings: Settings, directory: PathBuf, save: bool) -> Result<()> {
    let paths = puzzle_files_in_directory(&directory)?;
    if paths.is_empty() {
        println!(
            "{}",
            ColorOutput::warning(&format!("No puzzle files in {}", directory.display()))
        );
        return Ok(());
    }

    println!(
        "{}",
        ColorOutput::info(&format!("🧮 Solving {} puzzle(s)...", paths.len()))
    );
    let start_time = Instant::now();
    let entries = solve_batch(&settings, &paths);
    let total_time = start_time.elapsed();

    let format = settings.output.format;
    for entry in &entries {
        match &entry.result {
            Ok(outcome) => {
                print!("{}", outcome.format(format)?);
                if format == OutputFormat::Json {
                    println!();
                }
                if save || settings.output.save_solutions {
                    outcome
                        .save_to_directory(&settings.output.output_directory, format)
                        .context("Failed to save solution")?;
                }
            }
            Err(e) => println!(
                "{}",
                ColorOutput::error(&format!("{}: {:#}", puzzle_name(&entry.path), e))
            ),
        }
    }

    println!("\n{}", BatchSummary::from_entries(&entries));
    println!("Finished in {:.3}s", total_time.as_secs_f64());

    Ok(())
}

fn check_command(settings: &Settings, puzzle: &Path, solution: &Path) -> Result<ValidationReport> {
    println!("{}", ColorOutput::info("🔍 Checking solution..."));

    let grid = load_grid_from_file(puzzle)
        .with_context(|| format!("Failed to load puzzle from {}", puzzle.display()))?;
    let content = std::fs::read_to_string(solution)
        .with_context(|| format!("Failed to read solution from {}", solution.display()))?;
    let shading = Shading::parse(&content, settings.output.black_glyph)?;

    let report = SolutionValidator::new()
        .validate(&grid, &shading)
        .context("Validation failed")?;
    println!("{}", report);

    if report.is_valid() {
        println!("{}", ColorOutput::success("✅ Solution is valid!"));
    } else {
        println!("{}", ColorOutput::error("❌ Solution is invalid"));
    }

    Ok(report)
}

fn inspect_command(settings: Settings) -> Result<()> {
    let problem = NurikabeProblem::new(settings).context("Failed to create puzzle problem")?;
    let grid = problem.grid();

    println!("Puzzle {} ({}x{}):", problem.name(), grid.height, grid.width);
    println!("{}", format_grid_with_coords(grid));

    println!("Grid Statistics:");
    println!("  Cells: {}", grid.cell_count());
    println!("  Clues: {}", grid.clue_count());

    let (formula, stats) = problem.encode()?;
    println!("\n{}", stats);
    if !formula.is_well_formed() {
        println!(
            "{}",
            ColorOutput::error("Formula references variables outside the grid")
        );
    }

    Ok(())
}

fn generate_command(size: usize, output: PathBuf) -> Result<()> {
    let grid = Grid::checkerboard(size, size)?;
    save_grid_to_file(&grid, &output)?;

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Created {}x{} benchmark puzzle: {}",
            size,
            size,
            output.display()
        ))
    );
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/puzzles");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_puzzles(&input_dir).context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", input_dir.display());

    // In-process variant that needs no solver executable
    let examples_dir = config_dir.join("examples");
    let mut cadical_config = Settings::default();
    cadical_config.solver.backend = SolverBackendKind::Cadical;
    cadical_config.input.puzzle_file = PathBuf::from("input/puzzles/mixed.txt");
    cadical_config.to_file(&examples_dir.join("cadical.yaml"))?;
    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Point solver.executable in {} at a SAT solver", config_path.display());
    println!("2. Add your puzzles to {}", input_dir.display());
    println!("3. Run: cargo run -- solve --config config/default.yaml");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "nurikabe_sat",
            "solve",
            "--config",
            "test.yaml",
            "--backend",
            "cadical",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Solve {
                backend, format, ..
            } => {
                assert_eq!(backend, Some(SolverBackendKind::Cadical));
                assert_eq!(format, Some(OutputFormat::Json));
            }
            _ => panic!("expected solve"),
        }

        assert!(Cli::try_parse_from(["nurikabe_sat", "solve", "--backend", "minisat"]).is_err());
        assert!(Cli::try_parse_from(["nurikabe_sat", "check", "--puzzle", "p.txt"]).is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("input/puzzles/single.txt").exists());

        let cadical = Settings::from_file(&temp_dir.path().join("config/examples/cadical.yaml")).unwrap();
        assert_eq!(cadical.solver.backend, SolverBackendKind::Cadical);
    }

    #[test]
    fn test_check_command() {
        let temp_dir = tempdir().unwrap();
        let puzzle = temp_dir.path().join("single.txt");
        let good = temp_dir.path().join("good.txt");
        let bad = temp_dir.path().join("bad.txt");
        std::fs::write(&puzzle, "1.\n..\n").unwrap();
        std::fs::write(&good, "1#\n##\n").unwrap();
        std::fs::write(&bad, "1.\n##\n").unwrap();

        let settings = Settings::default();
        assert!(check_command(&settings, &puzzle, &good).unwrap().is_valid());
        assert!(!check_command(&settings, &puzzle, &bad).unwrap().is_valid());
    }

    #[test]
    fn test_generate_command() {
        let temp_dir = tempdir().unwrap();
        let output = temp_dir.path().join("bench/board.txt");
        generate_command(3, output.clone()).unwrap();

        assert_eq!(std::fs::read_to_string(output).unwrap(), "1.1\n.1.\n1.1\n");
        assert!(generate_command(0, temp_dir.path().join("empty.txt")).is_err());
    }

    #[test]
    fn test_encode_command_writes_file() {
        let temp_dir = tempdir().unwrap();
        let puzzle = temp_dir.path().join("single.txt");
        std::fs::write(&puzzle, "1.\n..\n").unwrap();

        let mut settings = Settings::default();
        settings.input.puzzle_file = puzzle;
        let output = temp_dir.path().join("cnf/single.cnf");
        encode_command(settings, Some(output.clone())).unwrap();

        let dimacs = std::fs::read_to_string(output).unwrap();
        assert!(dimacs.starts_with("p cnf 4 "));
    }
}
