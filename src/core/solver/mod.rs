//! SAT backend adapter.
//!
//! Keeps solving logic out of the constraint-encoding core: encoders and the
//! theory builder never reference a concrete solver, only the [`SatBackend`]
//! trait object. [`VarisatBackend`] is the one concrete implementation,
//! built on the external `varisat` crate.

use crate::core::error::CompileError;
use crate::core::proposition::Var;
use crate::core::theory::{CnfFormula, Lit};
use std::collections::HashMap;
use varisat::{ExtendFormula, Solver};

/// A satisfying truth assignment, one entry per variable mentioned in the theory.
pub type Model = HashMap<Var, bool>;

/// The result of one dispatch to a [`SatBackend`].
#[derive(Debug)]
pub enum BackendOutcome {
    /// The theory is satisfiable; carries one satisfying model.
    Sat(Model),
    /// The theory is unsatisfiable. Not an error — it's data.
    Unsat,
    /// The backend rejected the theory outright.
    Err(CompileError),
}

/// A SAT solving backend. One concrete implementation ([`VarisatBackend`]) is
/// provided; the trait exists so the encoding core never depends on a
/// concrete solver's API.
pub trait SatBackend {
    /// Solve `formula`, returning a model, UNSAT, or a rejection.
    fn solve(&self, formula: &CnfFormula) -> BackendOutcome;
}

fn to_varisat_lit(lit: Lit) -> varisat::Lit {
    let var = varisat::Var::from_index(lit.var.0 as usize);
    if lit.positive {
        var.positive()
    } else {
        var.negative()
    }
}

/// [`SatBackend`] built on the `varisat` crate, a pure-Rust CDCL solver.
#[derive(Debug, Default)]
pub struct VarisatBackend;

impl VarisatBackend {
    /// A new backend instance. `varisat::Solver` is stateless to construct;
    /// a fresh one is built per [`SatBackend::solve`] call so concurrent
    /// solves never share mutable state.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SatBackend for VarisatBackend {
    fn solve(&self, formula: &CnfFormula) -> BackendOutcome {
        let mut solver = Solver::new();
        for clause in &formula.clauses {
            let varisat_clause: Vec<varisat::Lit> =
                clause.iter().copied().map(to_varisat_lit).collect();
            solver.add_clause(&varisat_clause);
        }

        match solver.solve() {
            Ok(true) => {
                let Some(assignment) = solver.model() else {
                    return BackendOutcome::Err(CompileError::BackendRejected {
                        message: "solver reported SAT but returned no model".to_string(),
                    });
                };
                let model = assignment
                    .into_iter()
                    .map(|lit| (Var(lit.var().index() as u32), lit.is_positive()))
                    .collect();
                BackendOutcome::Sat(model)
            }
            Ok(false) => BackendOutcome::Unsat,
            Err(err) => BackendOutcome::Err(CompileError::BackendRejected {
                message: err.to_string(),
            }),
        }
    }
}

/// Wraps a compiled theory and its backend for the diagnostic queries the
/// engine surface exposes.
pub struct TheoryHandle {
    formula: CnfFormula,
    backend: Box<dyn SatBackend>,
}

impl TheoryHandle {
    /// Pair a compiled formula with the backend that will solve it.
    #[must_use]
    pub fn new(formula: CnfFormula, backend: Box<dyn SatBackend>) -> Self {
        Self { formula, backend }
    }

    /// Re-run the solver, discarding any model. `true` iff SAT.
    #[must_use]
    pub fn satisfiable(&self) -> bool {
        matches!(self.backend.solve(&self.formula), BackendOutcome::Sat(_))
    }

    /// Solve once and return the outcome.
    #[must_use]
    pub fn solve(&self) -> BackendOutcome {
        self.backend.solve(&self.formula)
    }

    /// Diagnostic-only model count, capped at `limit`. Repeatedly solves and
    /// blocks each found model by negating it, per the Non-goals' "no
    /// guarantees about model diversity": this counts *a* set of models, not
    /// a canonical enumeration.
    #[must_use]
    pub fn count_solutions(&self, limit: usize) -> usize {
        let mut formula = self.formula.clone();
        let mut count = 0;
        while count < limit {
            match self.backend.solve(&formula) {
                BackendOutcome::Sat(model) => {
                    count += 1;
                    let blocking: Vec<Lit> = model
                        .into_iter()
                        .map(|(var, value)| if value { Lit::neg(var) } else { Lit::pos(var) })
                        .collect();
                    formula.clauses.push(blocking);
                }
                BackendOutcome::Unsat | BackendOutcome::Err(_) => break,
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::proposition::{Proposition, PropositionRegistry};
    use crate::core::theory::TheoryBuilder;

    #[test]
    fn unit_clause_is_satisfiable_with_that_value() {
        let mut builder = TheoryBuilder::new();
        let a = builder.lit(Proposition::Enrolled {
            student: "A".to_string(),
            course: "CS-101".to_string(),
        });
        builder.unit(a);
        let (formula, _) = builder.finish();
        let backend = VarisatBackend::new();
        match backend.solve(&formula) {
            BackendOutcome::Sat(model) => assert_eq!(model.get(&a.var), Some(&true)),
            other => panic!("expected Sat, got {other:?}"),
        }
    }

    #[test]
    fn contradictory_units_are_unsat() {
        let mut builder = TheoryBuilder::new();
        let a = builder.lit(Proposition::Enrolled {
            student: "A".to_string(),
            course: "CS-101".to_string(),
        });
        builder.unit(a);
        builder.unit(a.negated());
        let (formula, _) = builder.finish();
        let backend = VarisatBackend::new();
        assert!(matches!(backend.solve(&formula), BackendOutcome::Unsat));
    }

    #[test]
    fn theory_handle_satisfiable_matches_solve() {
        let mut registry = PropositionRegistry::new();
        let var = registry.intern(Proposition::Enrolled {
            student: "A".to_string(),
            course: "CS-101".to_string(),
        });
        let mut formula = CnfFormula::new();
        formula.clauses.push(vec![Lit::pos(var)]);
        let handle = TheoryHandle::new(formula, Box::new(VarisatBackend::new()));
        assert!(handle.satisfiable());
    }

    #[test]
    fn count_solutions_respects_limit() {
        let mut builder = TheoryBuilder::new();
        let a = builder.lit(Proposition::Enrolled {
            student: "A".to_string(),
            course: "CS-101".to_string(),
        });
        let b = builder.lit(Proposition::Enrolled {
            student: "A".to_string(),
            course: "CS-102".to_string(),
        });
        // Leave both `a` and `b` free: four satisfying assignments exist.
        let _ = (a, b);
        let (formula, _) = builder.finish();
        let handle = TheoryHandle::new(formula, Box::new(VarisatBackend::new()));
        assert!(handle.count_solutions(2) <= 2);
    }
}
