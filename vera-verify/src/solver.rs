#![forbid(unsafe_code)]

use std::collections::BTreeSet;
use std::fmt;

use vera_ast::CmpOp;

use crate::error::VerifyError;
use crate::poly::Polynomial;

/// One recorded relation between two symbolic values. Comparisons are never
/// resolved inside the exact domain; they accumulate here and are handed to
/// the oracle as a conjunction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constraint {
    pub op: CmpOp,
    pub left: Polynomial,
    pub right: Polynomial,
}

impl Constraint {
    pub fn collect_symbols(&self, out: &mut BTreeSet<String>) {
        self.left.collect_symbols(out);
        self.right.collect_symbols(out);
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feasibility {
    Sat,
    Unsat,
}

/// Decides satisfiability of a constraint conjunction over the integers.
///
/// Stateless per call: each invocation carries its full symbol set and
/// constraint list, so sibling branches may query independently.
pub trait Oracle {
    fn check(
        &mut self,
        symbols: &BTreeSet<String>,
        constraints: &[Constraint],
    ) -> Result<Feasibility, VerifyError>;
}

/// Fallback oracle when compiled without `--features vera-verify/z3`.
///
/// It fails loudly rather than guessing: an unavailable solver must never
/// be read as either SAT or UNSAT.
pub struct NoOracle;

impl Oracle for NoOracle {
    fn check(
        &mut self,
        _symbols: &BTreeSet<String>,
        _constraints: &[Constraint],
    ) -> Result<Feasibility, VerifyError> {
        Err(VerifyError::OracleUnavailable)
    }
}

#[cfg(feature = "z3")]
pub mod z3_oracle {
    use std::collections::{BTreeSet, HashMap};

    use z3::{
        ast::{Ast, Int},
        Config, Context, SatResult, Solver,
    };

    use vera_ast::CmpOp;

    use super::{Constraint, Feasibility, Oracle};
    use crate::error::VerifyError;
    use crate::poly::Polynomial;

    pub struct Z3Oracle {
        ctx: &'static Context,
    }

    impl Z3Oracle {
        pub fn new() -> Self {
            let cfg = Config::new();
            // Leak the context so constraints need no self-referential
            // lifetime plumbing; one verifier process uses one context.
            let ctx: &'static Context = Box::leak(Box::new(Context::new(&cfg)));
            Self { ctx }
        }
    }

    impl Default for Z3Oracle {
        fn default() -> Self {
            Self::new()
        }
    }

    fn encode_poly<'ctx>(
        ctx: &'ctx Context,
        vars: &HashMap<String, Int<'ctx>>,
        poly: &Polynomial,
    ) -> Int<'ctx> {
        let mut acc = Int::from_i64(ctx, poly.constant());
        for term in poly.terms() {
            let base = &vars[&term.sym];
            let mut monomial = base.clone();
            for _ in 1..term.power {
                monomial = &monomial * base;
            }
            acc = &acc + &(&monomial * &Int::from_i64(ctx, term.coeff));
        }
        acc
    }

    impl Oracle for Z3Oracle {
        fn check(
            &mut self,
            symbols: &BTreeSet<String>,
            constraints: &[Constraint],
        ) -> Result<Feasibility, VerifyError> {
            // Fresh solver per query: calls are stateless by contract.
            let solver = Solver::new(self.ctx);

            let mut names: BTreeSet<String> = symbols.clone();
            for c in constraints {
                c.collect_symbols(&mut names);
            }
            let vars: HashMap<String, Int<'static>> = names
                .into_iter()
                .map(|name| {
                    let v = Int::new_const(self.ctx, name.as_str());
                    (name, v)
                })
                .collect();

            for c in constraints {
                let l = encode_poly(self.ctx, &vars, &c.left);
                let r = encode_poly(self.ctx, &vars, &c.right);
                let assertion = match c.op {
                    CmpOp::Eq => l._eq(&r),
                    CmpOp::Ne => l._eq(&r).not(),
                    CmpOp::Lt => l.lt(&r),
                    CmpOp::Gt => l.gt(&r),
                    CmpOp::Le => l.le(&r),
                    CmpOp::Ge => l.ge(&r),
                };
                solver.assert(&assertion);
            }

            match solver.check() {
                SatResult::Sat => Ok(Feasibility::Sat),
                SatResult::Unsat => Ok(Feasibility::Unsat),
                SatResult::Unknown => Err(VerifyError::OracleUndecided {
                    reason: solver
                        .get_reason_unknown()
                        .unwrap_or_else(|| "unknown".to_string()),
                }),
            }
        }
    }
}
