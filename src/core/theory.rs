//! CNF theory builder.
//!
//! Encoders push clauses through a [`TheoryBuilder`], which owns the
//! [`PropositionRegistry`] and accumulates a [`CnfFormula`] ready to hand to
//! a [`crate::core::solver::SatBackend`].

use crate::core::proposition::{Proposition, PropositionRegistry, Var};

/// A signed occurrence of a [`Var`] in a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lit {
    /// The underlying variable.
    pub var: Var,
    /// `true` for a positive occurrence, `false` for a negated one.
    pub positive: bool,
}

impl Lit {
    /// A positive occurrence of `var`.
    #[must_use]
    pub const fn pos(var: Var) -> Self {
        Self {
            var,
            positive: true,
        }
    }

    /// A negated occurrence of `var`.
    #[must_use]
    pub const fn neg(var: Var) -> Self {
        Self {
            var,
            positive: false,
        }
    }

    /// The negation of this literal.
    #[must_use]
    pub const fn negated(self) -> Self {
        Self {
            var: self.var,
            positive: !self.positive,
        }
    }
}

/// A formula in conjunctive normal form: a conjunction of clauses, each a
/// disjunction of literals.
#[derive(Debug, Clone, Default)]
pub struct CnfFormula {
    /// The clauses, in emission order.
    pub clauses: Vec<Vec<Lit>>,
}

impl CnfFormula {
    /// An empty formula.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// True if no clauses have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Accumulates clauses for one solve, interning propositions as it goes.
#[derive(Debug, Default)]
pub struct TheoryBuilder {
    /// The proposition registry backing this theory's variables.
    pub registry: PropositionRegistry,
    formula: CnfFormula,
    next_gate: u64,
}

impl TheoryBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `prop` and return a positive literal for it.
    pub fn lit(&mut self, prop: Proposition) -> Lit {
        Lit::pos(self.registry.intern(prop))
    }

    /// Push an arbitrary clause (disjunction of `lits`).
    pub fn clause(&mut self, lits: Vec<Lit>) {
        self.formula.clauses.push(lits);
    }

    /// Push a unit clause asserting `lit`.
    pub fn unit(&mut self, lit: Lit) {
        self.clause(vec![lit]);
    }

    /// `antecedent → consequent`, i.e. `¬antecedent ∨ consequent`.
    pub fn implies(&mut self, antecedent: Lit, consequent: Lit) {
        self.clause(vec![antecedent.negated(), consequent]);
    }

    /// `antecedent → (options[0] ∨ options[1] ∨ …)`.
    pub fn implies_any(&mut self, antecedent: Lit, options: &[Lit]) {
        let mut lits = Vec::with_capacity(options.len() + 1);
        lits.push(antecedent.negated());
        lits.extend_from_slice(options);
        self.clause(lits);
    }

    /// `a ↔ b`, as two implications.
    pub fn biconditional(&mut self, a: Lit, b: Lit) {
        self.implies(a, b);
        self.implies(b, a);
    }

    /// At most one of `lits` is true, via the pairwise encoding.
    pub fn at_most_one(&mut self, lits: &[Lit]) {
        for i in 0..lits.len() {
            for j in (i + 1)..lits.len() {
                self.clause(vec![lits[i].negated(), lits[j].negated()]);
            }
        }
    }

    /// At most `k` of `lits` are true, via a sequential-counter encoding.
    ///
    /// Introduces `O(n*k)` auxiliary registers; sound and complete for any
    /// `k`, including `k == 0` (which degenerates to forcing every literal false).
    pub fn at_most_k(&mut self, lits: &[Lit], k: usize) {
        let n = lits.len();
        if n <= k {
            return;
        }
        if k == 0 {
            for &lit in lits {
                self.unit(lit.negated());
            }
            return;
        }

        // register(i, j): true iff at least j+1 of lits[0..=i] are true, for j in 0..k.
        let mut register: Vec<Vec<Var>> = Vec::with_capacity(n);
        for i in 0..n {
            let mut row = Vec::with_capacity(k);
            for j in 0..k {
                row.push(
                    self.registry
                        .intern(auxiliary_cardinality_proposition(lits, i, j)),
                );
            }
            register.push(row);
        }

        // lits[0] sets register(0, 0).
        self.implies(lits[0], Lit::pos(register[0][0]));
        for j in 1..k {
            self.unit(Lit::neg(register[0][j]));
        }

        for i in 1..n {
            // lits[i] sets register(i, 0).
            self.implies(lits[i], Lit::pos(register[i][0]));
            // register(i-1, j) carries forward to register(i, j).
            for j in 0..k {
                self.implies(Lit::pos(register[i - 1][j]), Lit::pos(register[i][j]));
            }
            // lits[i] together with register(i-1, j-1) sets register(i, j).
            for j in 1..k {
                let both = [lits[i], Lit::pos(register[i - 1][j - 1])];
                self.implies_conjunction(&both, Lit::pos(register[i][j]));
            }
            // if register(i-1, k-1) already held, lits[i] cannot also be true.
            self.clause(vec![
                lits[i].negated(),
                Lit::neg(register[i - 1][k - 1]),
            ]);
        }
    }

    /// `(a ∧ b) → consequent`, i.e. `¬a ∨ ¬b ∨ consequent`.
    fn implies_conjunction(&mut self, antecedents: &[Lit], consequent: Lit) {
        let mut lits: Vec<Lit> = antecedents.iter().map(|l| l.negated()).collect();
        lits.push(consequent);
        self.clause(lits);
    }

    /// A fresh anonymous variable, for the requirement encoder's Tseitin
    /// transform of `AND`/`OR` nodes.
    fn fresh_gate(&mut self) -> Lit {
        let gate = self.next_gate;
        self.next_gate += 1;
        self.lit(Proposition::Gate(gate))
    }

    /// `g ↔ (a ∧ b)` for a fresh `g`, returned as a positive literal.
    pub fn and_gate(&mut self, a: Lit, b: Lit) -> Lit {
        let g = self.fresh_gate();
        self.implies(g, a);
        self.implies(g, b);
        self.clause(vec![a.negated(), b.negated(), g]);
        g
    }

    /// `g ↔ (a ∨ b)` for a fresh `g`, returned as a positive literal.
    pub fn or_gate(&mut self, a: Lit, b: Lit) -> Lit {
        let g = self.fresh_gate();
        self.implies(a, g);
        self.implies(b, g);
        self.clause(vec![g.negated(), a, b]);
        g
    }

    /// Consume the builder, returning the accumulated formula and registry.
    #[must_use]
    pub fn finish(self) -> (CnfFormula, PropositionRegistry) {
        (self.formula, self.registry)
    }

    /// The number of clauses emitted so far.
    #[must_use]
    pub fn clause_count(&self) -> usize {
        self.formula.len()
    }
}

/// Synthesizes a private proposition for the sequential-counter cardinality
/// encoding's auxiliary registers, keyed by the clause-local literal set so
/// that two `at_most_k` calls never collide.
fn auxiliary_cardinality_proposition(lits: &[Lit], i: usize, j: usize) -> Proposition {
    let key = lits
        .iter()
        .map(|l| format!("{}{}", if l.positive { "+" } else { "-" }, l.var.0))
        .collect::<Vec<_>>()
        .join(",");
    Proposition::CoreqTaken {
        student: format!("__card[{key}]"),
        course: i.to_string(),
        atom: j.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implies_emits_expected_clause_shape() {
        let mut builder = TheoryBuilder::new();
        let a = builder.lit(Proposition::Enrolled {
            student: "A".to_string(),
            course: "CS-101".to_string(),
        });
        let b = builder.lit(Proposition::Enrolled {
            student: "A".to_string(),
            course: "CS-102".to_string(),
        });
        builder.implies(a, b);
        let (formula, _) = builder.finish();
        assert_eq!(formula.clauses, vec![vec![a.negated(), b]]);
    }

    #[test]
    fn at_most_one_forbids_every_pair() {
        let mut builder = TheoryBuilder::new();
        let lits: Vec<Lit> = (0..3)
            .map(|i| {
                builder.lit(Proposition::Enrolled {
                    student: "A".to_string(),
                    course: format!("C{i}"),
                })
            })
            .collect();
        builder.at_most_one(&lits);
        let (formula, _) = builder.finish();
        assert_eq!(formula.len(), 3);
    }

    #[test]
    fn at_most_k_noop_when_k_exceeds_count() {
        let mut builder = TheoryBuilder::new();
        let lits: Vec<Lit> = (0..2)
            .map(|i| {
                builder.lit(Proposition::Enrolled {
                    student: "A".to_string(),
                    course: format!("C{i}"),
                })
            })
            .collect();
        builder.at_most_k(&lits, 5);
        let (formula, _) = builder.finish();
        assert!(formula.is_empty());
    }

    #[test]
    fn at_most_k_zero_forces_all_false() {
        let mut builder = TheoryBuilder::new();
        let lits: Vec<Lit> = (0..2)
            .map(|i| {
                builder.lit(Proposition::Enrolled {
                    student: "A".to_string(),
                    course: format!("C{i}"),
                })
            })
            .collect();
        builder.at_most_k(&lits, 0);
        let (formula, _) = builder.finish();
        assert_eq!(formula.clauses, vec![vec![lits[0].negated()], vec![lits[1].negated()]]);
    }
}
