//! External SAT solver process integration

use super::decoder::decode_model;
use super::{Formula, SatBackend, Verdict};
use crate::config::SolverConfig;
use crate::error::NurikabeError;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Runs a solver executable as `<exe> [args] <formula> <output>` and decodes
/// the output file it leaves behind
#[derive(Debug, Clone)]
pub struct ExternalSolver {
    executable: PathBuf,
    extra_args: Vec<String>,
    formula_path: PathBuf,
    output_path: PathBuf,
    show_output: bool,
}

impl ExternalSolver {
    /// Resolve the executable and job file paths.
    ///
    /// `job_name` prefixes the formula and output file names so that
    /// concurrent runs never share files.
    pub fn new(config: &SolverConfig, job_name: Option<&str>) -> Result<Self, NurikabeError> {
        let executable = locate_executable(&config.executable)?;
        let file_name = |base: &str| match job_name {
            Some(job) => format!("{}.{}", job, base),
            None => base.to_string(),
        };

        Ok(Self {
            executable,
            extra_args: config.extra_args.clone(),
            formula_path: config.work_directory.join(file_name(&config.formula_file)),
            output_path: config.work_directory.join(file_name(&config.output_file)),
            show_output: config.show_solver_output,
        })
    }

    pub fn formula_path(&self) -> &Path {
        &self.formula_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn stdio(&self) -> Stdio {
        if self.show_output {
            Stdio::inherit()
        } else {
            Stdio::null()
        }
    }
}

impl SatBackend for ExternalSolver {
    fn name(&self) -> &'static str {
        "external"
    }

    fn solve(&mut self, formula: &Formula) -> Result<Verdict, NurikabeError> {
        formula.save_to_file(&self.formula_path)?;

        // A stale result from an earlier run must not be mistaken for this one
        if self.output_path.exists() {
            std::fs::remove_file(&self.output_path)?;
        }

        log::info!(
            "Running {} on {} ({} variables, {} clauses)",
            self.executable.display(),
            self.formula_path.display(),
            formula.variable_count,
            formula.clause_count()
        );

        let status = Command::new(&self.executable)
            .args(&self.extra_args)
            .arg(&self.formula_path)
            .arg(&self.output_path)
            .stdin(Stdio::null())
            .stdout(self.stdio())
            .stderr(self.stdio())
            .status()?;

        // Solvers conventionally exit with 10 (SAT) or 20 (UNSAT)
        log::debug!("Solver exited with {}", status);

        if !self.output_path.exists() {
            return Err(NurikabeError::SolverProtocol(format!(
                "solver output file {} was not created (exit status: {})",
                self.output_path.display(),
                status
            )));
        }

        let content = std::fs::read_to_string(&self.output_path)?;
        decode_model(&content)
    }
}

/// Find the solver executable: explicit paths must exist, bare names are
/// looked up on `PATH`
pub fn locate_executable(executable: &Path) -> Result<PathBuf, NurikabeError> {
    locate_in(executable, std::env::var_os("PATH").as_deref())
}

/// Bare names never resolve against the working directory, matching how
/// `Command` spawns them.
fn locate_in(executable: &Path, search_path: Option<&OsStr>) -> Result<PathBuf, NurikabeError> {
    let is_bare_name = executable.components().count() == 1 && !executable.has_root();

    if !is_bare_name {
        if executable.is_file() {
            return Ok(executable.to_path_buf());
        }
    } else if let Some(paths) = search_path {
        if let Some(found) = std::env::split_paths(paths)
            .map(|dir| dir.join(executable))
            .find(|candidate| candidate.is_file())
        {
            return Ok(found);
        }
    }

    Err(NurikabeError::MissingCollaborator(executable.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::sat::Clause;
    use tempfile::tempdir;

    fn config_in(dir: &Path, executable: PathBuf) -> SolverConfig {
        let mut config = Settings::default().solver;
        config.executable = executable;
        config.work_directory = dir.to_path_buf();
        config
    }

    #[test]
    fn test_missing_executable() {
        let temp_dir = tempdir().unwrap();
        let config = config_in(temp_dir.path(), temp_dir.path().join("no-such-solver"));

        let err = ExternalSolver::new(&config, None).unwrap_err();
        assert!(matches!(err, NurikabeError::MissingCollaborator(_)));
        assert!(!temp_dir.path().join("task.cnf").exists());
    }

    #[test]
    fn test_bare_name_not_on_path() {
        let err = locate_executable(Path::new("surely-not-an-installed-sat-solver")).unwrap_err();
        assert!(matches!(err, NurikabeError::MissingCollaborator(_)));
    }

    #[test]
    fn test_bare_name_ignores_working_directory() {
        // Tests run from the package root, where Cargo.toml is a plain file
        assert!(Path::new("Cargo.toml").is_file());

        let temp_dir = tempdir().unwrap();
        let config = config_in(temp_dir.path(), PathBuf::from("Cargo.toml"));

        let err = ExternalSolver::new(&config, None).unwrap_err();
        assert!(matches!(err, NurikabeError::MissingCollaborator(_)));
        assert!(!temp_dir.path().join("task.cnf").exists());
    }

    #[test]
    fn test_bare_name_found_on_search_path() {
        let temp_dir = tempdir().unwrap();
        let exe = temp_dir.path().join("fake-glucose");
        std::fs::write(&exe, "").unwrap();

        let found = locate_in(Path::new("fake-glucose"), Some(temp_dir.path().as_os_str())).unwrap();
        assert_eq!(found, exe);

        let err = locate_in(Path::new("fake-glucose"), None).unwrap_err();
        assert!(matches!(err, NurikabeError::MissingCollaborator(_)));
    }

    #[test]
    fn test_job_file_names() {
        let temp_dir = tempdir().unwrap();
        let exe = temp_dir.path().join("solver");
        std::fs::write(&exe, "").unwrap();
        let config = config_in(temp_dir.path(), exe);

        let plain = ExternalSolver::new(&config, None).unwrap();
        assert_eq!(plain.formula_path(), temp_dir.path().join("task.cnf"));
        assert_eq!(plain.output_path(), temp_dir.path().join("solution.txt"));

        let job = ExternalSolver::new(&config, Some("pair")).unwrap();
        assert_eq!(job.formula_path(), temp_dir.path().join("pair.task.cnf"));
        assert_eq!(job.output_path(), temp_dir.path().join("pair.solution.txt"));
    }

    /// Runs a shell script through `/bin/sh`, passing it as an extra argument
    #[cfg(unix)]
    fn script_solver(dir: &Path, body: &str) -> SolverConfig {
        let script = dir.join("fake-solver.sh");
        std::fs::write(&script, body).unwrap();

        let mut config = config_in(dir, PathBuf::from("/bin/sh"));
        config.extra_args = vec![script.display().to_string()];
        config
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_solver_and_decodes_output() {
        let temp_dir = tempdir().unwrap();
        // Fails unless the formula file exists when the solver starts
        let config = script_solver(
            temp_dir.path(),
            "head -n 1 \"$1\" > /dev/null && printf 'SAT\\n-1 2 0\\n' > \"$2\"; exit 10",
        );
        let mut solver = ExternalSolver::new(&config, None).unwrap();

        let formula = Formula::new(2, vec![Clause::unit(-1), Clause::unit(2)]);
        let Verdict::Satisfiable(assignment) = solver.solve(&formula).unwrap() else {
            panic!("expected a model");
        };

        assert!(assignment.is_true(2));
        assert!(!assignment.is_true(1));
        let written = std::fs::read_to_string(solver.formula_path()).unwrap();
        assert_eq!(written, formula.to_dimacs());
    }

    #[cfg(unix)]
    #[test]
    fn test_unsat_output() {
        let temp_dir = tempdir().unwrap();
        let config = script_solver(temp_dir.path(), "echo UNSAT > \"$2\"; exit 20");
        let mut solver = ExternalSolver::new(&config, None).unwrap();

        let formula = Formula::new(1, vec![Clause::unit(1), Clause::unit(-1)]);
        assert_eq!(solver.solve(&formula).unwrap(), Verdict::Unsatisfiable);
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_output_is_protocol_error() {
        let temp_dir = tempdir().unwrap();
        let config = script_solver(temp_dir.path(), "exit 0");

        // A leftover result from a previous run must be ignored
        std::fs::write(temp_dir.path().join("solution.txt"), "SAT\n1 0\n").unwrap();

        let mut solver = ExternalSolver::new(&config, None).unwrap();
        let err = solver
            .solve(&Formula::new(1, vec![Clause::unit(1)]))
            .unwrap_err();
        assert!(matches!(err, NurikabeError::SolverProtocol(_)));
    }
}
