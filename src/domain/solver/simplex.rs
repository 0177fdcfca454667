//! Two-phase tableau simplex with Bland's anti-cycling rule.
//!
//! Every constraint is rewritten with a non-negative right-hand side (rows
//! with `b < 0` are negated and their relation flipped), then:
//!
//! - `<=` rows get a slack column, which starts basic;
//! - `>=` rows get a surplus column and an artificial column;
//! - `=` rows get an artificial column.
//!
//! Phase 1 minimises the sum of artificials. A positive optimum means the
//! program is infeasible. Remaining zero-level artificials are pivoted out
//! (or their redundant rows dropped) before phase 2 minimises the negated
//! objective. Both phases pick the lowest-index improving column and break
//! ratio ties on the lowest basic index, which rules out cycling.

#![allow(clippy::needless_range_loop)]

use tracing::{debug, warn};

use super::{SolveResult, Solver, SolverConfig};
use crate::domain::constraint::Relation;
use crate::domain::problem::Problem;
use crate::error::{Result, SolverError};

/// Number of decision variables.
const STRUCTURAL: usize = 2;

/// Entries smaller than this after a pivot are flushed to zero.
const SNAP: f64 = 1e-12;

/// From-scratch two-phase simplex solver.
#[derive(Debug, Clone, Default)]
pub struct SimplexSolver {
    config: SolverConfig,
}

impl SimplexSolver {
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

impl Solver for SimplexSolver {
    fn name(&self) -> &'static str {
        "simplex"
    }

    fn solve(&self, problem: &Problem) -> Result<SolveResult> {
        let tol = self.config.pivot_tolerance;
        let mut tableau = Tableau::build(problem);
        let mut iterations = 0;

        debug!(
            rows = tableau.rows.len(),
            columns = tableau.columns,
            artificials = tableau.columns - tableau.artificial_start,
            "built simplex tableau"
        );

        if tableau.has_artificials() {
            tableau.load_phase_one_costs();
            let all = tableau.columns;
            let (outcome, pivots) =
                tableau.run(all, tol, self.config.max_iterations, "phase 1")?;
            iterations += pivots;
            if outcome == PhaseOutcome::Unbounded {
                warn!("phase 1 reported an unbounded ray; checking residual anyway");
            }

            let residual = tableau.objective_value();
            debug!(residual, pivots, "phase 1 finished");
            if residual > self.config.feasibility_tolerance {
                return Ok(SolveResult::Infeasible);
            }
            tableau.drive_out_artificials(tol);
        }

        tableau.load_phase_two_costs(problem);
        let allowed = tableau.artificial_start;
        let (outcome, pivots) =
            tableau.run(allowed, tol, self.config.max_iterations, "phase 2")?;
        iterations += pivots;
        debug!(?outcome, pivots, "phase 2 finished");

        if outcome == PhaseOutcome::Unbounded {
            return Ok(SolveResult::Unbounded);
        }

        let (x1, x2) = tableau.structural_values();
        let objective = problem.objective();
        // Adding 0.0 turns a -0.0 into 0.0.
        let value = objective.c1() * x1 + objective.c2() * x2 + 0.0;

        Ok(SolveResult::Optimal {
            x1,
            x2,
            value,
            iterations,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhaseOutcome {
    Optimal,
    Unbounded,
}

/// Dense simplex tableau.
///
/// Columns are laid out as `[x1, x2, slack/surplus..., artificial...]`; the
/// last entry of every row is its right-hand side. `costs` holds the reduced
/// costs with `-z` in its right-hand-side slot.
#[derive(Debug, Clone)]
struct Tableau {
    rows: Vec<Vec<f64>>,
    costs: Vec<f64>,
    basis: Vec<usize>,
    columns: usize,
    artificial_start: usize,
}

impl Tableau {
    fn build(problem: &Problem) -> Self {
        // Scale every row to a largest coefficient of 1, then flip it to b >= 0.
        let normalised: Vec<(f64, f64, f64, Relation)> = problem
            .constraints()
            .iter()
            .map(|c| {
                let scale = c.a1().abs().max(c.a2().abs());
                let (a1, a2, b) = (c.a1() / scale, c.a2() / scale, c.b() / scale);
                if b < 0.0 {
                    (-a1, -a2, -b, c.relation().negated())
                } else {
                    (a1, a2, b, c.relation())
                }
            })
            .collect();

        let slacks = normalised
            .iter()
            .filter(|(.., rel)| *rel != Relation::Eq)
            .count();
        let artificials = normalised
            .iter()
            .filter(|(.., rel)| *rel != Relation::Le)
            .count();
        let artificial_start = STRUCTURAL + slacks;
        let columns = artificial_start + artificials;
        let rhs = columns;

        let mut rows = Vec::with_capacity(normalised.len());
        let mut basis = Vec::with_capacity(normalised.len());
        let mut next_slack = STRUCTURAL;
        let mut next_artificial = artificial_start;

        for (a1, a2, b, relation) in normalised {
            let mut row = vec![0.0; columns + 1];
            row[0] = a1;
            row[1] = a2;
            row[rhs] = b;
            match relation {
                Relation::Le => {
                    row[next_slack] = 1.0;
                    basis.push(next_slack);
                    next_slack += 1;
                }
                Relation::Ge => {
                    row[next_slack] = -1.0;
                    next_slack += 1;
                    row[next_artificial] = 1.0;
                    basis.push(next_artificial);
                    next_artificial += 1;
                }
                Relation::Eq => {
                    row[next_artificial] = 1.0;
                    basis.push(next_artificial);
                    next_artificial += 1;
                }
            }
            rows.push(row);
        }

        Self {
            rows,
            costs: vec![0.0; columns + 1],
            basis,
            columns,
            artificial_start,
        }
    }

    fn has_artificials(&self) -> bool {
        self.columns > self.artificial_start
    }

    fn rhs(&self) -> usize {
        self.columns
    }

    /// Current objective value `z` of the loaded cost row.
    fn objective_value(&self) -> f64 {
        -self.costs[self.rhs()]
    }

    /// Minimise the sum of artificial columns.
    fn load_phase_one_costs(&mut self) {
        let costs: Vec<f64> = (0..self.columns)
            .map(|j| if j >= self.artificial_start { 1.0 } else { 0.0 })
            .collect();
        self.load_costs(&costs);
    }

    /// Minimise `-c1 * x1 - c2 * x2`, scaled to a largest coefficient of 1;
    /// artificial columns cost nothing and are never allowed back into the
    /// basis.
    fn load_phase_two_costs(&mut self, problem: &Problem) {
        let objective = problem.objective();
        let scale = objective.c1().abs().max(objective.c2().abs());
        let scale = if scale > 0.0 { scale } else { 1.0 };
        let mut costs = vec![0.0; self.columns];
        costs[0] = -objective.c1() / scale;
        costs[1] = -objective.c2() / scale;
        self.load_costs(&costs);
    }

    /// Price out the current basis: `d_j = c_j - sum_r c_B(r) * a_rj`.
    fn load_costs(&mut self, costs: &[f64]) {
        let rhs = self.rhs();
        let mut reduced = vec![0.0; self.columns + 1];
        reduced[..self.columns].copy_from_slice(costs);
        for (row, &basic) in self.rows.iter().zip(&self.basis) {
            let cb = costs[basic];
            if cb == 0.0 {
                continue;
            }
            for j in 0..=rhs {
                reduced[j] -= cb * row[j];
            }
        }
        self.costs = reduced;
    }

    /// Pivot until no column below `allowed` has a negative reduced cost.
    fn run(
        &mut self,
        allowed: usize,
        tol: f64,
        limit: usize,
        phase: &'static str,
    ) -> Result<(PhaseOutcome, usize)> {
        let mut pivots = 0;
        loop {
            // Bland: lowest-index improving column.
            let Some(entering) = (0..allowed).find(|&j| self.costs[j] < -tol) else {
                return Ok((PhaseOutcome::Optimal, pivots));
            };

            let Some(leaving) = self.ratio_test(entering, tol) else {
                return Ok((PhaseOutcome::Unbounded, pivots));
            };

            if pivots >= limit {
                return Err(SolverError::IterationLimit { phase, limit }.into());
            }

            debug!(
                phase,
                entering,
                leaving = self.basis[leaving],
                "simplex pivot"
            );
            self.pivot(leaving, entering);
            pivots += 1;
        }
    }

    /// Minimum ratio row for `entering`, ties broken on the lowest basic index.
    fn ratio_test(&self, entering: usize, tol: f64) -> Option<usize> {
        let rhs = self.rhs();
        let mut best: Option<(usize, f64)> = None;
        for (r, row) in self.rows.iter().enumerate() {
            let a = row[entering];
            if a <= tol {
                continue;
            }
            let ratio = row[rhs] / a;
            best = match best {
                None => Some((r, ratio)),
                Some((best_row, best_ratio)) => {
                    let tie = (ratio - best_ratio).abs() <= tol * best_ratio.abs().max(1.0);
                    if (!tie && ratio < best_ratio)
                        || (tie && self.basis[r] < self.basis[best_row])
                    {
                        Some((r, ratio))
                    } else {
                        Some((best_row, best_ratio))
                    }
                }
            };
        }
        best.map(|(r, _)| r)
    }

    fn pivot(&mut self, pivot_row: usize, pivot_col: usize) {
        let rhs = self.rhs();
        let pivot_val = self.rows[pivot_row][pivot_col];
        for j in 0..=rhs {
            self.rows[pivot_row][j] /= pivot_val;
        }
        let pivot = self.rows[pivot_row].clone();

        for (i, row) in self.rows.iter_mut().enumerate() {
            if i == pivot_row {
                continue;
            }
            eliminate(row, &pivot, pivot_col);
        }
        eliminate(&mut self.costs, &pivot, pivot_col);

        self.basis[pivot_row] = pivot_col;
    }

    /// Replace zero-level basic artificials with structural or slack columns.
    ///
    /// A row with no such column to pivot on is a linear combination of the
    /// others and is dropped.
    fn drive_out_artificials(&mut self, tol: f64) {
        let mut r = 0;
        while r < self.rows.len() {
            if self.basis[r] < self.artificial_start {
                r += 1;
                continue;
            }
            let candidate = (0..self.artificial_start).find(|&j| self.rows[r][j].abs() > tol);
            match candidate {
                Some(col) => {
                    debug!(row = r, column = col, "pivoting artificial out of basis");
                    self.pivot(r, col);
                    r += 1;
                }
                None => {
                    debug!(row = r, "dropping redundant row");
                    self.rows.remove(r);
                    self.basis.remove(r);
                }
            }
        }
    }

    fn structural_values(&self) -> (f64, f64) {
        let rhs = self.rhs();
        let mut x = [0.0; STRUCTURAL];
        for (row, &basic) in self.rows.iter().zip(&self.basis) {
            if basic < STRUCTURAL {
                x[basic] = row[rhs].max(0.0) + 0.0;
            }
        }
        (x[0], x[1])
    }
}

/// `row -= row[col] * pivot`, flushing tiny residues to zero.
fn eliminate(row: &mut [f64], pivot: &[f64], col: usize) {
    let factor = row[col];
    if factor == 0.0 {
        return;
    }
    for (value, &p) in row.iter_mut().zip(pivot) {
        *value -= factor * p;
        if value.abs() < SNAP {
            *value = 0.0;
        }
    }
    row[col] = 0.0;
}
