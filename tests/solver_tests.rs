//! Solver behaviour on whole problems, through the public `Solver` port.

mod support;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use planar_lp::domain::solver::MemoizedSolver;
use planar_lp::domain::{
    feasible_region, BoundingBox, Point, Problem, Relation, SimplexSolver, SolveResult, Solver,
};
use support::problems::{self, problem};
use support::{assert_close, assert_point};

const TOL: f64 = 1e-6;

fn solve(problem: &Problem) -> SolveResult {
    SimplexSolver::default().solve(problem).expect("solver fault")
}

#[test]
fn two_resource_problem_reaches_the_shared_vertex() {
    let result = solve(&problems::two_resources());

    let point = result.point().expect("optimal");
    assert_point(point, 1.2, 3.2, TOL);
    assert_close(result.value().unwrap(), 16.4, TOL);
}

#[test]
fn negative_upper_bound_is_infeasible() {
    let p = problem(1.0, 1.0, &[(1.0, 0.0, -1.0, Relation::Le)]);
    assert_eq!(solve(&p), SolveResult::Infeasible);
}

#[test]
fn contradictory_rows_are_infeasible() {
    assert_eq!(solve(&problems::contradictory()), SolveResult::Infeasible);
}

#[test]
fn positive_objective_without_constraints_is_unbounded() {
    let p = problem(1.0, 1.0, &[]);
    assert_eq!(solve(&p), SolveResult::Unbounded);
}

#[test]
fn lower_bound_only_is_unbounded() {
    assert_eq!(solve(&problems::open_above()), SolveResult::Unbounded);
}

#[test]
fn minimizing_over_an_open_region_stays_at_a_vertex() {
    // max -x1 - x2 s.t. x1 + x2 >= 2 attains -2 along the whole edge.
    let p = problem(-1.0, -1.0, &[(1.0, 1.0, 2.0, Relation::Ge)]);
    let result = solve(&p);

    assert_close(result.value().expect("optimal"), -2.0, TOL);
    let point = result.point().unwrap();
    assert_close(point.x + point.y, 2.0, TOL);
}

#[test]
fn equality_row_pins_the_optimum_to_its_line() {
    let p = problem(
        1.0,
        2.0,
        &[(1.0, 1.0, 5.0, Relation::Eq), (1.0, 0.0, 1.0, Relation::Ge)],
    );
    let result = solve(&p);

    assert_point(result.point().expect("optimal"), 1.0, 4.0, TOL);
    assert_close(result.value().unwrap(), 9.0, TOL);
}

#[test]
fn redundant_parallel_rows_do_not_change_the_optimum() {
    let base = problems::triangle();
    let mut doubled = base.clone();
    doubled.add_constraint(2.0, 2.0, 8.0, Relation::Le).unwrap();
    doubled.add_constraint(1.0, 1.0, 6.0, Relation::Le).unwrap();

    assert_close(
        solve(&doubled).value().unwrap(),
        solve(&base).value().unwrap(),
        TOL,
    );
}

#[test]
fn repeated_solves_are_identical() {
    let p = problems::two_resources();
    let first = solve(&p);
    for _ in 0..5 {
        assert_eq!(solve(&p), first);
    }
}

#[test]
fn row_scale_does_not_change_the_answer() {
    let rows = [
        (2.0, 3.0, 12.0, Relation::Le),
        (4.0, 1.0, 8.0, Relation::Le),
        (1.0, 1.0, 1.0, Relation::Ge),
    ];
    let base = solve(&problem(3.0, 4.0, &rows));

    for factor in [1e-10, 1e-6, 1e6, 1e10] {
        let scaled: Vec<_> = rows
            .iter()
            .map(|&(a1, a2, b, rel)| (a1 * factor, a2 * factor, b * factor, rel))
            .collect();
        let p = problem(3.0, 4.0, &scaled);
        let result = solve(&p);

        assert!(result.is_optimal(), "factor {factor}: {result:?}");
        assert_point(result.point().unwrap(), 1.2, 3.2, TOL);
        assert_close(result.value().unwrap(), base.value().unwrap(), TOL);
        assert!(feasible_region(&p, &BoundingBox::default()).is_bounded());
    }
}

#[test]
fn tiny_scaled_row_is_bounded_like_its_region() {
    let p = problem(1.0, 0.0, &[(1e-10, 1e-10, 1e-10, Relation::Le)]);
    let result = solve(&p);

    assert_point(result.point().expect("optimal"), 1.0, 0.0, TOL);
    assert!(feasible_region(&p, &BoundingBox::default()).is_bounded());
}

#[test]
fn memoized_solver_matches_and_caches() {
    let memo = MemoizedSolver::new(SimplexSolver::default());
    let p = problems::two_resources();

    let first = memo.solve(&p).unwrap();
    let second = memo.solve(&p).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, solve(&p));
    assert_eq!(memo.len(), 1);
}

#[test]
fn optimum_lies_on_the_region_boundary() {
    let bbox = BoundingBox::default();
    for p in [problems::two_resources(), problems::triangle()] {
        let point = solve(&p).point().expect("optimal");
        let region = feasible_region(&p, &bbox);
        let polygon = region.polygon().expect("non-empty region");
        assert!(polygon.distance_to_boundary(point) <= TOL);
    }
}

fn random_problem(rng: &mut StdRng, rows: usize, mixed: bool) -> Problem {
    let mut p = problem(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), &[]);
    for row in 0..rows {
        // The first row is always an upper bound, which keeps the region bounded.
        let relation = if mixed && row > 0 && rng.gen_bool(0.3) {
            Relation::Ge
        } else {
            Relation::Le
        };
        let b = match relation {
            Relation::Ge => rng.gen_range(0.0..3.0),
            _ => rng.gen_range(1.0..10.0),
        };
        p.add_constraint(rng.gen_range(0.5..5.0), rng.gen_range(0.5..5.0), b, relation)
            .unwrap();
    }
    p
}

#[test]
fn random_bounded_problems_match_the_best_region_vertex() {
    let mut rng = StdRng::seed_from_u64(7);
    // Every intercept is at most 10 / 0.5, so the region fits in the box.
    let bbox = BoundingBox::new(100.0, 100.0).unwrap();

    for _ in 0..200 {
        let rows = rng.gen_range(1..6);
        let p = random_problem(&mut rng, rows, false);
        let result = solve(&p);
        let point = result.point().expect("bounded and feasible");

        assert!(p.is_feasible(point, TOL), "infeasible optimum for {p:?}");

        let region = feasible_region(&p, &bbox);
        assert!(region.is_bounded());
        let best = region
            .polygon()
            .unwrap()
            .vertices()
            .iter()
            .map(|v| p.objective().value_at(*v))
            .fold(f64::NEG_INFINITY, f64::max);
        assert_close(result.value().unwrap(), best, TOL);
    }
}

#[test]
fn random_mixed_problems_report_consistent_statuses() {
    let mut rng = StdRng::seed_from_u64(42);
    let bbox = BoundingBox::new(100.0, 100.0).unwrap();

    for _ in 0..200 {
        let rows = rng.gen_range(1..6);
        let p = random_problem(&mut rng, rows, true);
        let region = feasible_region(&p, &bbox);

        match solve(&p) {
            SolveResult::Optimal { x1, x2, .. } => {
                assert!(p.is_feasible(Point::new(x1, x2), TOL));
            }
            SolveResult::Infeasible => assert!(region.is_empty(), "region for {p:?}"),
            SolveResult::Unbounded => panic!("upper-bounded rows cannot be unbounded: {p:?}"),
        }
    }
}

#[cfg(feature = "highs")]
#[test]
fn simplex_agrees_with_highs() {
    use planar_lp::domain::solver::HighsSolver;

    let mut rng = StdRng::seed_from_u64(11);
    let highs = HighsSolver::new();
    for _ in 0..100 {
        let rows = rng.gen_range(1..6);
        let p = random_problem(&mut rng, rows, true);
        match (solve(&p), highs.solve(&p).unwrap()) {
            (SolveResult::Optimal { value: a, .. }, SolveResult::Optimal { value: b, .. }) => {
                assert_close(a, b, 1e-5);
            }
            (a, b) => assert_eq!(a, b),
        }
    }
}
