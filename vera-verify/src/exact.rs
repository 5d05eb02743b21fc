#![forbid(unsafe_code)]

use std::collections::{BTreeSet, HashMap};

use vera_ast::{Assignment, CmpOp, Comparison, Expr, ExprKind, Program};

use crate::engine::{Fork, Strategy};
use crate::error::VerifyError;
use crate::poly::Polynomial;
use crate::solver::{Constraint, Feasibility, Oracle};

/// Per-path state of the exact strategy: each program variable's closed-form
/// polynomial over input symbols, plus the branch constraints accumulated on
/// the way here. Environments never narrow; only the constraint list grows.
#[derive(Clone, Debug, Default)]
pub struct ExactEnv {
    pub vars: HashMap<String, Polynomial>,
    pub constraints: Vec<Constraint>,
}

/// The solver-backed strategy: verification is refutation. A path is
/// verified exactly when its constraints, the pinned final values, and the
/// negated post-condition are jointly unsatisfiable.
pub struct ExactStrategy<O: Oracle> {
    oracle: O,
    fresh: u64,
}

impl<O: Oracle> ExactStrategy<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle, fresh: 0 }
    }

    /// Input symbols are the program variable's name with a `_` suffix,
    /// keeping the symbol distinct from the variable that holds it.
    fn input_symbol_for(name: &str) -> String {
        format!("{name}_")
    }

    fn fresh_symbol(&mut self) -> String {
        self.fresh += 1;
        format!("in{}_", self.fresh)
    }

    fn eval(&mut self, env: &ExactEnv, expr: &Expr) -> Result<Polynomial, VerifyError> {
        match &expr.kind {
            ExprKind::Int(n) => Ok(Polynomial::from_constant(*n)),
            ExprKind::Var(id) => match env.vars.get(&id.node) {
                Some(poly) => Ok(poly.clone()),
                None => Err(VerifyError::UnboundVariable {
                    name: id.node.clone(),
                    span: id.span,
                }),
            },
            // An input nested inside an expression has no binding name to
            // derive a symbol from; mint one.
            ExprKind::Input => Ok(Polynomial::from_symbol(self.fresh_symbol())),
            ExprKind::Binary { left, op, right } => {
                let l = self.eval(env, left)?;
                let r = self.eval(env, right)?;
                combine(l, *op, r, expr.span)
            }
        }
    }

    /// Post-condition operands may mention variables no command on this path
    /// ever assigned; those are unconstrained, so they become free symbols
    /// the oracle may pick any value for.
    fn eval_post(&mut self, env: &ExactEnv, expr: &Expr) -> Result<Polynomial, VerifyError> {
        match &expr.kind {
            ExprKind::Var(id) if !env.vars.contains_key(&id.node) => {
                Ok(Polynomial::from_symbol(id.node.clone()))
            }
            ExprKind::Binary { left, op, right } => {
                let l = self.eval_post(env, left)?;
                let r = self.eval_post(env, right)?;
                combine(l, *op, r, expr.span)
            }
            _ => self.eval(env, expr),
        }
    }
}

fn combine(
    l: Polynomial,
    op: vera_ast::ArithOp,
    r: Polynomial,
    span: vera_ast::Span,
) -> Result<Polynomial, VerifyError> {
    match op {
        vera_ast::ArithOp::Add => l
            .checked_add(&r)
            .ok_or(VerifyError::Overflow { span }),
        vera_ast::ArithOp::Sub => l
            .checked_sub(&r)
            .ok_or(VerifyError::Overflow { span }),
        vera_ast::ArithOp::Mul => {
            if !l.is_constant() && !r.is_constant() {
                return Err(VerifyError::NonlinearMul { span });
            }
            l.checked_mul(&r).ok_or(VerifyError::Overflow { span })
        }
    }
}

impl<O: Oracle> Strategy for ExactStrategy<O> {
    type Env = ExactEnv;

    fn initial_env(&mut self, _program: &Program) -> Self::Env {
        ExactEnv::default()
    }

    fn assign(&mut self, env: &mut Self::Env, assign: &Assignment) -> Result<(), VerifyError> {
        let value = if let ExprKind::Input = assign.rhs.kind {
            Polynomial::from_symbol(Self::input_symbol_for(&assign.lhs.node))
        } else {
            self.eval(env, &assign.rhs)?
        };
        env.vars.insert(assign.lhs.node.clone(), value);
        Ok(())
    }

    fn fork(&mut self, env: &Self::Env, cond: &Comparison) -> Result<Fork<Self::Env>, VerifyError> {
        let left = self.eval(env, &cond.left)?;
        let right = self.eval(env, &cond.right)?;

        // Environments diverge only through body execution; branching just
        // records the condition one way and its opposite the other.
        let mut holds = env.clone();
        holds.constraints.push(Constraint {
            op: cond.op,
            left: left.clone(),
            right: right.clone(),
        });
        let mut fails = env.clone();
        fails.constraints.push(Constraint {
            op: cond.op.opposite(),
            left,
            right,
        });

        Ok(Fork {
            holds: vec![holds],
            fails: vec![fails],
        })
    }

    fn check_post(&mut self, env: Self::Env, post: &Comparison) -> Result<bool, VerifyError> {
        let left = self.eval_post(&env, &post.left)?;
        let right = self.eval_post(&env, &post.right)?;

        let mut constraints = env.constraints;
        constraints.push(Constraint {
            op: post.op.opposite(),
            left,
            right,
        });

        // Pin every variable's final value: the symbol named after the
        // variable equals its derived polynomial.
        for (name, poly) in &env.vars {
            constraints.push(Constraint {
                op: CmpOp::Eq,
                left: Polynomial::from_symbol(name.clone()),
                right: poly.clone(),
            });
        }

        let mut symbols: BTreeSet<String> = BTreeSet::new();
        for c in &constraints {
            c.collect_symbols(&mut symbols);
        }
        symbols.extend(env.vars.keys().cloned());

        // Refutation: the post-condition holds on this path iff its negation
        // is infeasible alongside everything the path established.
        let verdict = self.oracle.check(&symbols, &constraints)?;
        Ok(verdict == Feasibility::Unsat)
    }
}
