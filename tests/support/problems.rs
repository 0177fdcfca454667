//! Problem fixtures shared by integration tests.

use planar_lp::domain::{Objective, Problem, Relation};

/// Problem with objective `(c1, c2)` and rows `(a1, a2, b, relation)`.
pub fn problem(c1: f64, c2: f64, rows: &[(f64, f64, f64, Relation)]) -> Problem {
    let mut problem = Problem::new(Objective::new(c1, c2).expect("finite objective"));
    for &(a1, a2, b, relation) in rows {
        problem
            .add_constraint(a1, a2, b, relation)
            .expect("valid constraint");
    }
    problem
}

/// `max 3x1 + 4x2` with `2x1 + 3x2 <= 12`, `4x1 + x2 <= 8`.
pub fn two_resources() -> Problem {
    problem(
        3.0,
        4.0,
        &[(2.0, 3.0, 12.0, Relation::Le), (4.0, 1.0, 8.0, Relation::Le)],
    )
}

/// `max x1 + x2` with `x1 + x2 <= 4`: the triangle `(0,0), (4,0), (0,4)`.
pub fn triangle() -> Problem {
    problem(1.0, 1.0, &[(1.0, 1.0, 4.0, Relation::Le)])
}

/// `x1 + x2 <= 1` together with `x1 + x2 >= 3`.
pub fn contradictory() -> Problem {
    problem(
        1.0,
        1.0,
        &[(1.0, 1.0, 1.0, Relation::Le), (1.0, 1.0, 3.0, Relation::Ge)],
    )
}

/// `max 3x1 + 4x2` with only a lower bound `x1 + x2 >= 2`.
pub fn open_above() -> Problem {
    problem(3.0, 4.0, &[(1.0, 1.0, 2.0, Relation::Ge)])
}

/// Problem file text for [`two_resources`].
pub const TWO_RESOURCES_TOML: &str = r#"
objective = [3.0, 4.0]

[[constraints]]
a1 = 2.0
a2 = 3.0
b = 12.0
relation = "<="

[[constraints]]
a1 = 4.0
a2 = 1.0
b = 8.0
relation = "<="
"#;

/// Problem file text for [`contradictory`].
pub const CONTRADICTORY_TOML: &str = r#"
objective = [1.0, 1.0]

[[constraints]]
a1 = 1.0
a2 = 1.0
b = 1.0
relation = "<="

[[constraints]]
a1 = 1.0
a2 = 1.0
b = 3.0
relation = ">="
"#;
