//! Services composing the domain components into renderer-facing results.

pub mod query;

pub use query::{
    check_consistency, full_result, ConsistencyWarning, ConstraintBoundary, FullResult,
    QueryConfig, QueryService,
};
