//! CNF formula and DIMACS serialization

use super::Clause;
use crate::error::NurikabeError;
use std::io::Write;
use std::path::Path;

/// A CNF formula over variables `1..=variable_count`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    pub variable_count: usize,
    pub clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(variable_count: usize, clauses: Vec<Clause>) -> Self {
        Self {
            variable_count,
            clauses,
        }
    }

    /// Number of clauses, always taken from the clause list itself
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// Every clause is non-empty and every literal is a non-zero variable in range
    pub fn is_well_formed(&self) -> bool {
        self.clauses.iter().all(|clause| {
            !clause.is_empty()
                && clause.literals.iter().all(|&lit| {
                    lit != 0 && (lit.unsigned_abs() as usize) <= self.variable_count
                })
        })
    }

    /// Write the formula in DIMACS CNF form
    pub fn write_dimacs<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writeln!(writer, "p cnf {} {}", self.variable_count, self.clause_count())?;
        for clause in &self.clauses {
            for literal in &clause.literals {
                write!(writer, "{} ", literal)?;
            }
            writeln!(writer, "0")?;
        }
        writer.flush()
    }

    pub fn to_dimacs(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_dimacs(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Write the formula to a DIMACS file, creating parent directories
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), NurikabeError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = std::fs::File::create(&path)?;
        self.write_dimacs(std::io::BufWriter::new(file))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_dimacs_output() {
        let formula = Formula::new(
            4,
            vec![Clause::unit(-1), Clause::binary(2, 3), Clause::new(vec![-1, -2, -3, -4])],
        );

        assert_eq!(
            formula.to_dimacs(),
            "p cnf 4 3\n-1 0\n2 3 0\n-1 -2 -3 -4 0\n"
        );
    }

    #[test]
    fn test_empty_formula_header() {
        let formula = Formula::new(1, Vec::new());
        assert_eq!(formula.to_dimacs(), "p cnf 1 0\n");
        assert!(formula.is_well_formed());
    }

    #[test]
    fn test_well_formedness() {
        assert!(!Formula::new(2, vec![Clause::unit(3)]).is_well_formed());
        assert!(!Formula::new(2, vec![Clause::unit(0)]).is_well_formed());
        assert!(!Formula::new(2, vec![Clause::new(vec![])]).is_well_formed());
        assert!(Formula::new(2, vec![Clause::binary(-2, 1)]).is_well_formed());
    }

    #[test]
    fn test_save_to_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("work/task.cnf");
        let formula = Formula::new(2, vec![Clause::binary(1, -2)]);

        formula.save_to_file(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        assert_eq!(content, formula.to_dimacs());
        let header_count: usize = content
            .lines()
            .next()
            .and_then(|line| line.split_whitespace().last())
            .and_then(|n| n.parse().ok())
            .unwrap();
        assert_eq!(header_count, content.lines().count() - 1);
    }
}
