//! Solution decoder: projects a satisfying model back onto
//! per-student, per-term section lists. No further post-processing —
//! section ids carry their own ordering by course code.

use crate::core::proposition::{Proposition, PropositionRegistry};
use crate::core::solver::Model;
use std::collections::BTreeMap;

/// One student's decoded schedule: term name to the sorted section ids chosen in it.
pub type StudentPlan = BTreeMap<String, Vec<String>>;

/// Every student's decoded schedule, keyed by student name.
pub type Plan = BTreeMap<String, StudentPlan>;

/// Project `model` back into a [`Plan`] by reading off every `InSection`
/// variable assigned true.
#[must_use]
pub fn decode(registry: &PropositionRegistry, model: &Model) -> Plan {
    let mut plan = Plan::new();

    for (var, prop) in registry.iter() {
        let Proposition::InSection {
            student,
            term,
            section,
            ..
        } = prop
        else {
            continue;
        };
        if !*model.get(&var).unwrap_or(&false) {
            continue;
        }

        plan.entry(student.clone())
            .or_default()
            .entry(term.to_string())
            .or_default()
            .push(section.clone());
    }

    for student_plan in plan.values_mut() {
        for sections in student_plan.values_mut() {
            sections.sort();
        }
    }

    plan
}
