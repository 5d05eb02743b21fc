#![forbid(unsafe_code)]

use miette::Diagnostic;
use thiserror::Error;
use vera_ast::Span;

/// Structural failures of a verification attempt.
///
/// Infeasibility is never represented here: an empty interval or an UNSAT
/// constraint set is an expected value that flows through the fork tree.
#[derive(Debug, Error, Diagnostic)]
pub enum VerifyError {
    #[error("multiplication of two non-constant values is not supported")]
    #[diagnostic(code(vera::verify::nonlinear))]
    NonlinearMul {
        #[label("this multiplication")]
        span: Span,
    },

    #[error("unbound variable '{name}'")]
    #[diagnostic(code(vera::verify::unbound))]
    UnboundVariable {
        name: String,
        #[label]
        span: Span,
    },

    #[error("'!=' cannot be refined here: the excluded values are not representable as one interval")]
    #[diagnostic(code(vera::verify::refine))]
    UnsupportedRefinement {
        #[label("this comparison")]
        span: Span,
    },

    #[error("arithmetic overflow while evaluating this expression")]
    #[diagnostic(code(vera::verify::overflow))]
    Overflow {
        #[label("this expression")]
        span: Span,
    },

    #[error("feasibility oracle is not enabled. Rebuild with `--features vera-verify/z3`.")]
    #[diagnostic(code(vera::verify::oracle))]
    OracleUnavailable,

    #[error("feasibility oracle could not decide the query: {reason}")]
    #[diagnostic(code(vera::verify::oracle))]
    OracleUndecided { reason: String },
}
