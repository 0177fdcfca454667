//! Composed results from the query service.

mod support;

use std::sync::Arc;

use planar_lp::domain::solver::MemoizedSolver;
use planar_lp::domain::{BoundingBox, Point, Region, SimplexSolver, SolveResult};
use planar_lp::service::{check_consistency, full_result, ConsistencyWarning, QueryService};
use support::problems;
use support::{assert_close, assert_point};

#[test]
fn full_result_composes_every_view() {
    let bbox = BoundingBox::default();
    let result = full_result(&problems::two_resources(), &bbox).unwrap();

    assert!(result.solve().is_optimal());
    assert!(result.region().is_bounded());
    assert!(result.is_consistent(), "{:?}", result.warnings());

    let labels: Vec<_> = result.boundaries().iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["2x1 + 3x2 ≤ 12", "4x1 + 1x2 ≤ 8"]);
    assert!(result.boundaries().iter().all(|b| b.segment.is_some()));

    let level = result.optimum_level().expect("level line");
    assert!(level.distance_to(Point::new(1.2, 3.2)) < 1e-9);
}

#[test]
fn field_samples_the_default_grid() {
    let result = full_result(&problems::two_resources(), &BoundingBox::default()).unwrap();
    let field = result.field();

    assert_eq!(field.len(), 400 * 400);
    let (lo, hi) = field.range();
    assert_close(lo, 0.0, 1e-12);
    assert_close(hi, 70.0, 1e-9);

    let levels = field.levels(20);
    assert_eq!(levels.len(), 20);
    assert!(levels.windows(2).all(|w| w[0] < w[1]));

    let last = result.field().last().unwrap();
    assert_point(Point::new(last.x, last.y), 10.0, 10.0, 1e-12);
    assert_close(last.z, 70.0, 1e-9);
}

#[test]
fn coarse_grid_is_configurable() {
    let service = QueryService::default().with_grid(3, 2);
    let result = service
        .full_result(&problems::triangle(), &BoundingBox::default())
        .unwrap();

    let samples: Vec<_> = result.field().collect();
    assert_eq!(samples.len(), 6);
    assert_point(Point::new(samples[1].x, samples[1].y), 5.0, 0.0, 1e-12);
    assert_point(Point::new(samples[3].x, samples[3].y), 0.0, 10.0, 1e-12);
}

#[test]
fn infeasible_problem_is_consistent_with_an_empty_region() {
    let result = full_result(&problems::contradictory(), &BoundingBox::default()).unwrap();

    assert_eq!(*result.solve(), SolveResult::Infeasible);
    assert_eq!(*result.region(), Region::Empty);
    assert!(result.optimum_level().is_none());
    assert!(result.is_consistent());
}

#[test]
fn unbounded_problem_is_consistent_with_an_open_region() {
    let result = full_result(&problems::open_above(), &BoundingBox::default()).unwrap();

    assert_eq!(*result.solve(), SolveResult::Unbounded);
    assert!(result.region().direction().is_some());
    assert!(result.is_consistent());
}

#[test]
fn optimum_outside_the_box_is_flagged() {
    let p = support::problems::problem(
        1.0,
        1.0,
        &[(1.0, 1.0, 30.0, planar_lp::domain::Relation::Le)],
    );
    let result = full_result(&p, &BoundingBox::default()).unwrap();

    assert!(result.solve().is_optimal());
    assert!(matches!(
        result.warnings(),
        [ConsistencyWarning::OptimumOutsideBoundingBox { .. }]
    ));
}

#[test]
fn disagreeing_statuses_are_reported() {
    let bbox = BoundingBox::default();
    let region = full_result(&problems::triangle(), &bbox)
        .unwrap()
        .region()
        .clone();

    let infeasible = check_consistency(&SolveResult::Infeasible, &region, &bbox, 1e-6);
    assert_eq!(infeasible, [ConsistencyWarning::InfeasibleButRegionNonEmpty]);

    let unbounded = check_consistency(&SolveResult::Unbounded, &region, &bbox, 1e-6);
    assert_eq!(unbounded, [ConsistencyWarning::UnboundedButRegionBounded]);

    let interior = SolveResult::Optimal {
        x1: 1.0,
        x2: 1.0,
        value: 2.0,
        iterations: 0,
    };
    let off = check_consistency(&interior, &region, &bbox, 1e-6);
    assert!(matches!(off.as_slice(), [ConsistencyWarning::OptimumOffBoundary { .. }]));

    let empty = check_consistency(&interior, &Region::Empty, &bbox, 1e-6);
    assert_eq!(empty, [ConsistencyWarning::OptimalButRegionEmpty]);
}

#[test]
fn memoized_service_returns_the_same_result() {
    let memo = Arc::new(MemoizedSolver::new(SimplexSolver::default()));
    let service = QueryService::new(memo.clone());
    let bbox = BoundingBox::default();
    let p = problems::two_resources();

    let first = service.full_result(&p, &bbox).unwrap();
    let second = service.full_result(&p, &bbox).unwrap();

    assert_eq!(first.solve(), second.solve());
    assert_eq!(first.region(), second.region());
    assert_eq!(memo.len(), 1);
}
