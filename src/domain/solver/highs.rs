//! HiGHS solver implementation via good_lp.
//!
//! Used as a reference backend to cross-check [`SimplexSolver`](super::SimplexSolver).

use good_lp::solvers::highs::highs;
use good_lp::{
    constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel,
};

use super::{SolveResult, Solver};
use crate::domain::constraint::Relation;
use crate::domain::problem::Problem;
use crate::error::{Result, SolverError};

/// HiGHS-based LP solver.
#[derive(Debug, Default, Clone)]
pub struct HighsSolver;

impl HighsSolver {
    /// Create a new HiGHS solver instance.
    pub fn new() -> Self {
        Self
    }
}

impl Solver for HighsSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve(&self, problem: &Problem) -> Result<SolveResult> {
        let mut vars = variables!();
        let x1 = vars.add(variable().min(0.0));
        let x2 = vars.add(variable().min(0.0));

        let objective = problem.objective();
        let goal: Expression = objective.c1() * x1 + objective.c2() * x2;
        let mut model = vars.maximise(&goal).using(highs);

        for c in problem.constraints() {
            let lhs: Expression = c.a1() * x1 + c.a2() * x2;
            let rhs = c.b();
            model = match c.relation() {
                Relation::Le => model.with(constraint!(lhs <= rhs)),
                Relation::Ge => model.with(constraint!(lhs >= rhs)),
                Relation::Eq => model.with(constraint!(lhs == rhs)),
            };
        }

        match model.solve() {
            Ok(solution) => {
                let v1 = solution.value(x1).max(0.0) + 0.0;
                let v2 = solution.value(x2).max(0.0) + 0.0;
                Ok(SolveResult::Optimal {
                    x1: v1,
                    x2: v2,
                    value: objective.c1() * v1 + objective.c2() * v2 + 0.0,
                    iterations: 0,
                })
            }
            Err(ResolutionError::Infeasible) => Ok(SolveResult::Infeasible),
            Err(ResolutionError::Unbounded) => Ok(SolveResult::Unbounded),
            Err(err) => Err(SolverError::Backend {
                backend: "highs",
                reason: err.to_string(),
            }
            .into()),
        }
    }
}
