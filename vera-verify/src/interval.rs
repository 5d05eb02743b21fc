#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::fmt;

use vera_ast::{Assignment, CmpOp, Comparison, Expr, ExprKind, Program};

use crate::engine::{Fork, Strategy};
use crate::error::VerifyError;

/// An extended-integer bound. Derived `Ord` relies on the declaration order:
/// `NegInf < Int(_) < PosInf`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Bound {
    NegInf,
    Int(i64),
    PosInf,
}

impl Bound {
    /// `None` means the finite sum does not fit an `i64`; the caller widens
    /// toward whichever infinity keeps the interval an over-approximation.
    fn checked_add(self, other: Bound) -> Option<Bound> {
        match (self, other) {
            (Bound::Int(a), Bound::Int(b)) => a.checked_add(b).map(Bound::Int),
            (Bound::NegInf, _) | (_, Bound::NegInf) => Some(Bound::NegInf),
            _ => Some(Bound::PosInf),
        }
    }

    fn checked_neg(self) -> Option<Bound> {
        match self {
            Bound::NegInf => Some(Bound::PosInf),
            Bound::Int(n) => n.checked_neg().map(Bound::Int),
            Bound::PosInf => Some(Bound::NegInf),
        }
    }

    /// Scale by a non-zero constant; a negative factor flips infinities.
    fn checked_scale(self, c: i64) -> Option<Bound> {
        match self {
            Bound::Int(n) => n.checked_mul(c).map(Bound::Int),
            Bound::NegInf => {
                if c > 0 {
                    Some(Bound::NegInf)
                } else {
                    Some(Bound::PosInf)
                }
            }
            Bound::PosInf => {
                if c > 0 {
                    Some(Bound::PosInf)
                } else {
                    Some(Bound::NegInf)
                }
            }
        }
    }

    /// The greatest integer admitted by an upper bound with this inclusivity.
    /// An exclusive bound at `i64::MIN` admits nothing below it.
    fn tighten_hi(self, incl: bool) -> Bound {
        match self {
            Bound::Int(b) if !incl => b.checked_sub(1).map_or(Bound::NegInf, Bound::Int),
            other => other,
        }
    }

    /// The least integer admitted by a lower bound with this inclusivity.
    fn tighten_lo(self, incl: bool) -> Bound {
        match self {
            Bound::Int(a) if !incl => a.checked_add(1).map_or(Bound::PosInf, Bound::Int),
            other => other,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::NegInf => f.write_str("-inf"),
            Bound::Int(n) => write!(f, "{n}"),
            Bound::PosInf => f.write_str("inf"),
        }
    }
}

/// A refinable range of integers. Infinite bounds are never inclusive.
///
/// The interval is *perfect* when it pins exactly one value, and *Bottom*
/// (no feasible value) when the bounds cross, when equal bounds are both
/// exclusive, or when finite exclusive bounds leave no integer between them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interval {
    pub lo: Bound,
    pub hi: Bound,
    pub lo_incl: bool,
    pub hi_incl: bool,
}

impl Interval {
    pub fn new(lo: Bound, lo_incl: bool, hi: Bound, hi_incl: bool) -> Self {
        Self {
            lo,
            hi,
            lo_incl: lo_incl && matches!(lo, Bound::Int(_)),
            hi_incl: hi_incl && matches!(hi, Bound::Int(_)),
        }
    }

    pub fn point(c: i64) -> Self {
        Self::new(Bound::Int(c), true, Bound::Int(c), true)
    }

    pub fn unbounded() -> Self {
        Self::new(Bound::NegInf, false, Bound::PosInf, false)
    }

    pub fn empty() -> Self {
        Self::new(Bound::Int(0), false, Bound::Int(0), false)
    }

    pub fn is_perfect(&self) -> bool {
        matches!(self.lo, Bound::Int(_)) && self.lo == self.hi && (self.lo_incl || self.hi_incl)
    }

    pub fn value(&self) -> Option<i64> {
        if !self.is_perfect() {
            return None;
        }
        match self.lo {
            Bound::Int(n) => Some(n),
            _ => None,
        }
    }

    pub fn is_bottom(&self) -> bool {
        match self.lo.cmp(&self.hi) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Equal => match self.lo {
                Bound::Int(_) => !(self.lo_incl || self.hi_incl),
                // (-inf, -inf) and (inf, inf) admit nothing.
                _ => true,
            },
            std::cmp::Ordering::Less => {
                let (Bound::Int(a), Bound::Int(b)) = (self.lo, self.hi) else {
                    return false;
                };
                let lo_eff = if self.lo_incl { a } else { a + 1 };
                let hi_eff = if self.hi_incl { b } else { b - 1 };
                // Over the integers an open sliver like (4, 5) is empty.
                lo_eff > hi_eff
            }
        }
    }

    pub fn contains(&self, v: i64) -> bool {
        if let Some(p) = self.value() {
            return v == p;
        }
        if self.is_bottom() {
            return false;
        }
        let above_lo = match self.lo {
            Bound::NegInf => true,
            Bound::Int(a) => v > a || (v == a && self.lo_incl),
            Bound::PosInf => false,
        };
        let below_hi = match self.hi {
            Bound::PosInf => true,
            Bound::Int(b) => v < b || (v == b && self.hi_incl),
            Bound::NegInf => false,
        };
        above_lo && below_hi
    }

    pub fn add(&self, other: &Self) -> Self {
        Self::new(
            self.lo.checked_add(other.lo).unwrap_or(Bound::NegInf),
            self.lo_incl && other.lo_incl,
            self.hi.checked_add(other.hi).unwrap_or(Bound::PosInf),
            self.hi_incl && other.hi_incl,
        )
    }

    pub fn sub(&self, other: &Self) -> Self {
        let lo = other
            .hi
            .checked_neg()
            .and_then(|n| self.lo.checked_add(n))
            .unwrap_or(Bound::NegInf);
        let hi = other
            .lo
            .checked_neg()
            .and_then(|n| self.hi.checked_add(n))
            .unwrap_or(Bound::PosInf);
        Self::new(lo, self.lo_incl && other.hi_incl, hi, self.hi_incl && other.lo_incl)
    }

    /// Defined only when one operand is a single point; `None` signals the
    /// non-constant × non-constant modeling limitation.
    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        if let Some(c) = self.value() {
            Some(other.scale(c))
        } else {
            other.value().map(|c| self.scale(c))
        }
    }

    fn scale(&self, c: i64) -> Self {
        if c == 0 {
            return Self::point(0);
        }
        let (lo_src, lo_incl, hi_src, hi_incl) = if c > 0 {
            (self.lo, self.lo_incl, self.hi, self.hi_incl)
        } else {
            (self.hi, self.hi_incl, self.lo, self.lo_incl)
        };
        Self::new(
            lo_src.checked_scale(c).unwrap_or(Bound::NegInf),
            lo_incl,
            hi_src.checked_scale(c).unwrap_or(Bound::PosInf),
            hi_incl,
        )
    }

    pub fn intersect(&self, other: &Self) -> Self {
        let (lo, lo_incl) = match self.lo.cmp(&other.lo) {
            std::cmp::Ordering::Greater => (self.lo, self.lo_incl),
            std::cmp::Ordering::Less => (other.lo, other.lo_incl),
            std::cmp::Ordering::Equal => (self.lo, self.lo_incl && other.lo_incl),
        };
        let (hi, hi_incl) = match self.hi.cmp(&other.hi) {
            std::cmp::Ordering::Less => (self.hi, self.hi_incl),
            std::cmp::Ordering::Greater => (other.hi, other.hi_incl),
            std::cmp::Ordering::Equal => (self.hi, self.hi_incl && other.hi_incl),
        };
        // A collapse to equal finite bounds inherits one flag from each
        // operand; the single remaining point is feasible only when both
        // operands actually contain it.
        if let (Bound::Int(a), Bound::Int(b)) = (lo, hi) {
            if a == b {
                let feasible = self.contains(a) && other.contains(a);
                return Self::new(lo, feasible, hi, feasible);
            }
        }
        Self::new(lo, lo_incl, hi, hi_incl)
    }

    fn below(hi: Bound, hi_incl: bool) -> Self {
        Self::new(Bound::NegInf, false, hi, hi_incl)
    }

    fn above(lo: Bound, lo_incl: bool) -> Self {
        Self::new(lo, lo_incl, Bound::PosInf, false)
    }

    /// Comparison-as-refinement: narrow `self` and `other` to the values
    /// consistent with `self op other` holding, as a pair. Either side of
    /// the pair may come back Bottom, meaning the relation can never hold.
    ///
    /// `None` is returned only for a `!=` whose excluded values cannot be
    /// carved out of one contiguous interval.
    pub fn refine(&self, op: CmpOp, other: &Self) -> Option<(Self, Self)> {
        let sup_r = other.hi.tighten_hi(other.hi_incl);
        let inf_r = other.lo.tighten_lo(other.lo_incl);
        let sup_l = self.hi.tighten_hi(self.hi_incl);
        let inf_l = self.lo.tighten_lo(self.lo_incl);
        let pair = match op {
            CmpOp::Eq => {
                let m = self.intersect(other);
                (m.clone(), m)
            }
            CmpOp::Lt => (
                self.intersect(&Self::below(sup_r, false)),
                other.intersect(&Self::above(inf_l, false)),
            ),
            CmpOp::Le => (
                self.intersect(&Self::below(sup_r, true)),
                other.intersect(&Self::above(inf_l, true)),
            ),
            CmpOp::Gt => (
                self.intersect(&Self::above(inf_r, false)),
                other.intersect(&Self::below(sup_l, false)),
            ),
            CmpOp::Ge => (
                self.intersect(&Self::above(inf_r, true)),
                other.intersect(&Self::below(sup_l, true)),
            ),
            CmpOp::Ne => return self.refine_ne(other),
        };
        Some(pair)
    }

    fn refine_ne(&self, other: &Self) -> Option<(Self, Self)> {
        if self.intersect(other).is_bottom() {
            // Disjoint ranges: the relation already holds everywhere.
            return Some((self.clone(), other.clone()));
        }
        if let Some(p) = other.value() {
            return self.trim_point(p).map(|l| (l, other.clone()));
        }
        if let Some(p) = self.value() {
            return other.trim_point(p).map(|r| (self.clone(), r));
        }
        // Two overlapping ranges: the pairs to exclude form a diagonal no
        // interval can represent.
        None
    }

    /// Remove a single point, when that leaves one contiguous interval.
    fn trim_point(&self, p: i64) -> Option<Self> {
        if !self.contains(p) {
            return Some(self.clone());
        }
        if self.value() == Some(p) {
            return Some(Self::empty());
        }
        if self.lo == Bound::Int(p) {
            let mut t = self.clone();
            t.lo_incl = false;
            return Some(t);
        }
        if self.hi == Bound::Int(p) {
            let mut t = self.clone();
            t.hi_incl = false;
            return Some(t);
        }
        None
    }

    /// The sub-intervals of `self` not covered by `refined` (which must be a
    /// refinement of `self`): 0, 1, or 2 pieces. Pieces that contain no
    /// integer are dropped.
    pub fn except(&self, refined: &Self) -> Vec<Self> {
        let mut pieces = Vec::new();
        let left_carved = self.lo < refined.lo
            || (self.lo == refined.lo && self.lo_incl && !refined.lo_incl);
        if left_carved {
            pieces.push(Self::new(self.lo, self.lo_incl, refined.lo, !refined.lo_incl));
        }
        let right_carved = self.hi > refined.hi
            || (self.hi == refined.hi && self.hi_incl && !refined.hi_incl);
        if right_carved {
            pieces.push(Self::new(refined.hi, !refined.hi_incl, self.hi, self.hi_incl));
        }
        pieces.retain(|p| !p.is_bottom());
        pieces
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.lo_incl { '[' } else { '(' };
        let close = if self.hi_incl { ']' } else { ')' };
        write!(f, "{open}{}, {}{close}", self.lo, self.hi)
    }
}

/// Per-path state of the interval strategy: program variable → range.
pub type IntervalEnv = HashMap<String, Interval>;

/// The lattice-only strategy: feasibility is a local emptiness check and the
/// false branch of a fork is reconstructed by complement enumeration.
#[derive(Debug)]
pub struct IntervalStrategy;

impl Default for IntervalStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl IntervalStrategy {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Unbound {
    Fatal,
    Unconstrained,
}

fn eval(env: &IntervalEnv, expr: &Expr, unbound: Unbound) -> Result<Interval, VerifyError> {
    match &expr.kind {
        ExprKind::Int(n) => Ok(Interval::point(*n)),
        ExprKind::Input => Ok(Interval::unbounded()),
        ExprKind::Var(id) => match env.get(&id.node) {
            Some(iv) => Ok(iv.clone()),
            None if unbound == Unbound::Unconstrained => Ok(Interval::unbounded()),
            None => Err(VerifyError::UnboundVariable {
                name: id.node.clone(),
                span: id.span,
            }),
        },
        ExprKind::Binary { left, op, right } => {
            let l = eval(env, left, unbound)?;
            let r = eval(env, right, unbound)?;
            match op {
                vera_ast::ArithOp::Add => Ok(l.add(&r)),
                vera_ast::ArithOp::Sub => Ok(l.sub(&r)),
                vera_ast::ArithOp::Mul => {
                    l.checked_mul(&r)
                        .ok_or(VerifyError::NonlinearMul { span: expr.span })
                }
            }
        }
    }
}

/// The false-branch pieces contributed by one comparison operand: carved
/// complements for a variable, a single no-op entry for anything else.
fn pieces_for(
    operand: &Expr,
    original: &Interval,
    refined: &Interval,
) -> Vec<Option<(String, Interval)>> {
    match &operand.kind {
        ExprKind::Var(id) => original
            .except(refined)
            .into_iter()
            .map(|iv| Some((id.node.clone(), iv)))
            .collect(),
        _ => vec![None],
    }
}

fn write_back(env: &mut IntervalEnv, operand: &Expr, refined: &Interval) {
    if let ExprKind::Var(id) = &operand.kind {
        env.insert(id.node.clone(), refined.clone());
    }
}

impl Strategy for IntervalStrategy {
    type Env = IntervalEnv;

    fn initial_env(&mut self, _program: &Program) -> Self::Env {
        HashMap::new()
    }

    fn assign(&mut self, env: &mut Self::Env, assign: &Assignment) -> Result<(), VerifyError> {
        let value = eval(env, &assign.rhs, Unbound::Fatal)?;
        env.insert(assign.lhs.node.clone(), value);
        Ok(())
    }

    fn fork(&mut self, env: &Self::Env, cond: &Comparison) -> Result<Fork<Self::Env>, VerifyError> {
        let left = eval(env, &cond.left, Unbound::Fatal)?;
        let right = eval(env, &cond.right, Unbound::Fatal)?;
        let Some((l_ref, r_ref)) = left.refine(cond.op, &right) else {
            return Err(VerifyError::UnsupportedRefinement { span: cond.span });
        };

        if l_ref.is_bottom() || r_ref.is_bottom() {
            // The condition can never hold: the true branch is vacuous and
            // the unrefined environment is exactly the false branch.
            return Ok(Fork {
                holds: Vec::new(),
                fails: vec![env.clone()],
            });
        }

        let mut true_env = env.clone();
        write_back(&mut true_env, &cond.left, &l_ref);
        write_back(&mut true_env, &cond.right, &r_ref);

        let left_pieces = pieces_for(&cond.left, &left, &l_ref);
        let right_pieces = pieces_for(&cond.right, &right, &r_ref);
        let mut fails = Vec::new();
        for lp in &left_pieces {
            for rp in &right_pieces {
                let mut e = env.clone();
                if let Some((name, iv)) = lp {
                    e.insert(name.clone(), iv.clone());
                }
                if let Some((name, iv)) = rp {
                    e.insert(name.clone(), iv.clone());
                }
                fails.push(e);
            }
        }

        Ok(Fork {
            holds: vec![true_env],
            fails,
        })
    }

    fn check_post(&mut self, env: Self::Env, post: &Comparison) -> Result<bool, VerifyError> {
        // A variable the path never assigned is unconstrained here, not an
        // error: the post-condition must then hold for every value, which
        // an unbounded range faithfully demands.
        let left = eval(&env, &post.left, Unbound::Unconstrained)?;
        let right = eval(&env, &post.right, Unbound::Unconstrained)?;

        if post.op == CmpOp::Ne {
            // `l != r` holds for every pair exactly when the ranges share
            // no value at all.
            return Ok(left.intersect(&right).is_bottom());
        }

        let Some((l_ref, r_ref)) = left.refine(post.op, &right) else {
            return Err(VerifyError::UnsupportedRefinement { span: post.span });
        };
        Ok(!l_ref.is_bottom()
            && !r_ref.is_bottom()
            && left.except(&l_ref).is_empty()
            && right.except(&r_ref).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed(a: i64, b: i64) -> Interval {
        Interval::new(Bound::Int(a), true, Bound::Int(b), true)
    }

    #[test]
    fn point_is_perfect_and_unbounded_is_not() {
        assert_eq!(Interval::point(5).value(), Some(5));
        assert!(Interval::unbounded().value().is_none());
        assert!(!Interval::unbounded().is_bottom());
    }

    #[test]
    fn equal_bounds_with_one_inclusive_flag_stay_perfect() {
        let half = Interval::new(Bound::Int(5), true, Bound::Int(5), false);
        assert!(half.is_perfect());
        assert_eq!(half.value(), Some(5));
        assert!(!half.is_bottom());
    }

    #[test]
    fn bottom_detection() {
        assert!(Interval::empty().is_bottom());
        assert!(Interval::new(Bound::Int(3), true, Bound::Int(1), true).is_bottom());
        // An open sliver with no integer inside.
        assert!(Interval::new(Bound::Int(-1), false, Bound::Int(0), false).is_bottom());
        assert!(!Interval::new(Bound::Int(-1), false, Bound::Int(1), false).is_bottom());
    }

    #[test]
    fn add_keeps_inclusivity_only_when_both_sides_do() {
        let a = closed(0, 10);
        let b = Interval::new(Bound::Int(1), false, Bound::Int(2), true);
        let sum = a.add(&b);
        assert_eq!(sum, Interval::new(Bound::Int(1), false, Bound::Int(12), true));
    }

    #[test]
    fn add_with_unconstrained_operand_is_unbounded() {
        let sum = closed(3, 4).add(&Interval::unbounded());
        assert_eq!(sum, Interval::unbounded());
    }

    #[test]
    fn sub_flips_the_contributing_bounds() {
        let a = closed(0, 10);
        let b = closed(2, 3);
        assert_eq!(a.sub(&b), closed(-3, 8));
    }

    #[test]
    fn mul_scales_by_a_point_with_sign_swap() {
        let a = closed(2, 5);
        assert_eq!(a.checked_mul(&Interval::point(3)).unwrap(), closed(6, 15));
        assert_eq!(a.checked_mul(&Interval::point(-2)).unwrap(), closed(-10, -4));
        assert_eq!(
            Interval::unbounded().checked_mul(&Interval::point(-1)).unwrap(),
            Interval::unbounded()
        );
        assert_eq!(a.checked_mul(&Interval::point(0)).unwrap(), Interval::point(0));
    }

    #[test]
    fn mul_of_two_ranges_is_rejected() {
        assert!(closed(1, 2).checked_mul(&closed(3, 4)).is_none());
        assert!(Interval::unbounded().checked_mul(&Interval::unbounded()).is_none());
    }

    #[test]
    fn refine_gt_against_a_literal() {
        let x = Interval::unbounded();
        let (l, _r) = x.refine(CmpOp::Gt, &Interval::point(0)).unwrap();
        assert_eq!(l, Interval::new(Bound::Int(0), false, Bound::PosInf, false));
    }

    #[test]
    fn refine_is_idempotent_on_an_already_consistent_range() {
        let x = closed(1, 4);
        let (l, _) = x.refine(CmpOp::Le, &Interval::point(10)).unwrap();
        assert_eq!(l, x);
        assert!(x.except(&l).is_empty());
    }

    #[test]
    fn refine_to_an_impossible_relation_is_bottom() {
        let x = closed(1, 4);
        let (l, _) = x.refine(CmpOp::Gt, &Interval::point(9)).unwrap();
        assert!(l.is_bottom());
        let (l, _) = Interval::point(3).refine(CmpOp::Eq, &Interval::point(4)).unwrap();
        assert!(l.is_bottom());
    }

    #[test]
    fn strict_refinement_on_a_shared_boundary_is_bottom() {
        let p = Interval::point(5);
        let (l, _) = p.refine(CmpOp::Lt, &p).unwrap();
        assert!(l.is_bottom());
        assert_eq!(l.value(), None);

        let (l, _) = closed(0, 5).refine(CmpOp::Gt, &Interval::point(5)).unwrap();
        assert!(l.is_bottom());
    }

    #[test]
    fn refine_eq_against_a_half_open_operand_excludes_its_open_end() {
        let half = Interval::new(Bound::Int(5), false, Bound::Int(8), true);
        let (l, _) = Interval::point(5).refine(CmpOp::Eq, &half).unwrap();
        assert!(l.is_bottom());
    }

    #[test]
    fn intersection_collapsing_to_one_point_requires_both_operands_to_hold_it() {
        // Both contain the point: it survives.
        assert_eq!(closed(0, 5).intersect(&closed(5, 9)), Interval::point(5));
        // Only one does: the collapse is empty, not a resurrected endpoint.
        let open_hi = Interval::new(Bound::Int(0), true, Bound::Int(5), false);
        assert!(open_hi.intersect(&closed(5, 9)).is_bottom());
    }

    #[test]
    fn arithmetic_overflow_widens_to_infinity() {
        let near_max = closed(i64::MAX - 1, i64::MAX);
        let sum = near_max.add(&Interval::point(2));
        assert_eq!(sum.hi, Bound::PosInf);
        assert!(sum.contains(i64::MAX));

        let scaled = closed(1, i64::MAX).checked_mul(&Interval::point(2)).unwrap();
        assert_eq!(
            scaled,
            Interval::new(Bound::Int(2), true, Bound::PosInf, false)
        );
    }

    #[test]
    fn refine_eq_narrows_both_sides_to_the_intersection() {
        let x = closed(0, 5);
        let y = closed(3, 8);
        let (l, r) = x.refine(CmpOp::Eq, &y).unwrap();
        assert_eq!(l, closed(3, 5));
        assert_eq!(r, closed(3, 5));
    }

    #[test]
    fn refine_lt_between_two_ranges_narrows_both_ends() {
        let x = closed(0, 9);
        let y = closed(2, 4);
        let (l, r) = x.refine(CmpOp::Lt, &y).unwrap();
        // x < y with y <= 4 leaves x in [0, 4); y keeps its own tighter range.
        assert_eq!(l, Interval::new(Bound::Int(0), true, Bound::Int(4), false));
        assert_eq!(r, y);
    }

    #[test]
    fn refine_lt_is_integer_exact_against_an_open_bound() {
        // y in [0, 10): x < y admits x up to 8.
        let x = Interval::unbounded();
        let y = Interval::new(Bound::Int(0), true, Bound::Int(10), false);
        let (l, _) = x.refine(CmpOp::Lt, &y).unwrap();
        assert!(l.contains(8));
        assert!(!l.contains(9));
    }

    #[test]
    fn refine_ne_trims_a_boundary_point() {
        let x = closed(0, 5);
        let (l, _) = x.refine(CmpOp::Ne, &Interval::point(5)).unwrap();
        assert_eq!(l, Interval::new(Bound::Int(0), true, Bound::Int(5), false));
        // The carved-out complement is exactly the excluded point.
        assert_eq!(x.except(&l), vec![Interval::point(5)]);
    }

    #[test]
    fn refine_ne_on_disjoint_ranges_changes_nothing() {
        let x = closed(0, 2);
        let y = closed(5, 9);
        assert_eq!(x.refine(CmpOp::Ne, &y).unwrap(), (x.clone(), y));
    }

    #[test]
    fn refine_ne_with_an_interior_hole_is_unrepresentable() {
        assert!(closed(0, 9).refine(CmpOp::Ne, &Interval::point(5)).is_none());
        assert!(closed(0, 9).refine(CmpOp::Ne, &closed(3, 6)).is_none());
    }

    #[test]
    fn refine_ne_of_a_matching_point_is_bottom() {
        let (l, _) = Interval::point(5).refine(CmpOp::Ne, &Interval::point(5)).unwrap();
        assert!(l.is_bottom());
    }

    #[test]
    fn except_produces_zero_one_or_two_pieces() {
        let v = closed(0, 10);
        assert!(v.except(&v).is_empty());

        let upper = v.refine(CmpOp::Ge, &Interval::point(4)).unwrap().0;
        assert_eq!(
            v.except(&upper),
            vec![Interval::new(Bound::Int(0), true, Bound::Int(4), false)]
        );

        let middle = closed(4, 6);
        let pieces = v.except(&middle);
        assert_eq!(
            pieces,
            vec![
                Interval::new(Bound::Int(0), true, Bound::Int(4), false),
                Interval::new(Bound::Int(6), false, Bound::Int(10), true),
            ]
        );
    }

    #[test]
    fn except_drops_integer_empty_slivers() {
        // Refining (0, inf) by >= 1 carves (0, 1), which holds no integer.
        let v = Interval::new(Bound::Int(0), false, Bound::PosInf, false);
        let refined = v.refine(CmpOp::Ge, &Interval::point(1)).unwrap().0;
        assert!(v.except(&refined).is_empty());
    }

    #[test]
    fn display_uses_bracket_notation() {
        assert_eq!(Interval::point(3).to_string(), "[3, 3]");
        assert_eq!(Interval::unbounded().to_string(), "(-inf, inf)");
    }
}
