#![forbid(unsafe_code)]

//! Path-sensitive verification of straight-line programs with single-level
//! branches. Two interchangeable abstractions drive the same walk: an exact
//! polynomial domain backed by an external feasibility oracle, and an
//! interval domain that refines bounds through comparisons.

pub mod engine;
pub mod error;
pub mod exact;
pub mod interval;
pub mod poly;
pub mod solver;

pub use engine::{verify_program, Fork, Strategy};
pub use error::VerifyError;
pub use exact::{ExactEnv, ExactStrategy};
pub use interval::{Bound, Interval, IntervalEnv, IntervalStrategy};
pub use poly::Polynomial;
pub use solver::{Constraint, Feasibility, Oracle};

use vera_ast::Program;

/// Verifies the program under the interval abstraction. Sound but
/// incomplete: a `false` verdict may be imprecision rather than a real
/// counterexample.
pub fn verify_interval(program: &Program) -> Result<bool, VerifyError> {
    let mut strategy = IntervalStrategy::new();
    verify_program(&mut strategy, program)
}

/// Verifies the program under the exact polynomial abstraction, refuting
/// the negated post-condition per path.
#[cfg(feature = "z3")]
pub fn verify_exact(program: &Program) -> Result<bool, VerifyError> {
    let mut strategy = ExactStrategy::new(solver::z3_oracle::Z3Oracle::default());
    verify_program(&mut strategy, program)
}

/// Without the `z3` feature there is no feasibility oracle; the exact
/// strategy fails on its first terminal check.
#[cfg(not(feature = "z3"))]
pub fn verify_exact(program: &Program) -> Result<bool, VerifyError> {
    let mut strategy = ExactStrategy::new(solver::NoOracle);
    verify_program(&mut strategy, program)
}
