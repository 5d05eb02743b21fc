#![forbid(unsafe_code)]

use std::collections::BTreeSet;
use std::fmt;

/// A non-constant term: `coeff * sym^power`.
///
/// `sym` names an input symbol, not a program variable. Program variables are
/// mutable; input symbols are the fixed unknowns a path's final state is
/// expressed in terms of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term {
    pub sym: String,
    pub power: u32,
    pub coeff: i64,
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coeff == 0 {
            return f.write_str("0");
        }
        if self.power == 0 {
            return write!(f, "{}", self.coeff);
        }
        if self.coeff != 1 {
            write!(f, "{}*", self.coeff)?;
        }
        f.write_str(&self.sym)?;
        if self.power != 1 {
            write!(f, "^{}", self.power)?;
        }
        Ok(())
    }
}

/// A closed-form value: `Σ coeff·sym^power + constant`.
///
/// Kept normalized: terms sorted by symbol then power, zero coefficients
/// dropped. Equality and printing therefore never see a degenerate term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial {
    terms: Vec<Term>,
    constant: i64,
}

impl Polynomial {
    pub fn from_constant(constant: i64) -> Self {
        Self {
            terms: Vec::new(),
            constant,
        }
    }

    pub fn from_symbol(sym: impl Into<String>) -> Self {
        Self {
            terms: vec![Term {
                sym: sym.into(),
                power: 1,
                coeff: 1,
            }],
            constant: 0,
        }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn constant(&self) -> i64 {
        self.constant
    }

    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn as_constant(&self) -> Option<i64> {
        self.terms.is_empty().then_some(self.constant)
    }

    fn normalize(mut self) -> Self {
        self.terms.retain(|t| t.coeff != 0);
        self.terms
            .sort_by(|a, b| (&a.sym, a.power).cmp(&(&b.sym, b.power)));
        self
    }

    /// `None` means a coefficient or the constant no longer fits an `i64`.
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        let mut terms = self.terms.clone();
        for t in &other.terms {
            match terms
                .iter_mut()
                .find(|e| e.sym == t.sym && e.power == t.power)
            {
                Some(like) => like.coeff = like.coeff.checked_add(t.coeff)?,
                None => terms.push(t.clone()),
            }
        }
        Some(
            Self {
                terms,
                constant: self.constant.checked_add(other.constant)?,
            }
            .normalize(),
        )
    }

    pub fn checked_neg(&self) -> Option<Self> {
        let terms = self
            .terms
            .iter()
            .map(|t| {
                Some(Term {
                    sym: t.sym.clone(),
                    power: t.power,
                    coeff: t.coeff.checked_neg()?,
                })
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self {
            terms,
            constant: self.constant.checked_neg()?,
        })
    }

    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.checked_add(&other.checked_neg()?)
    }

    /// Multiplication is defined only when one operand is a pure constant;
    /// callers distinguish that case via `is_constant` before reading a
    /// `None` as coefficient overflow.
    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        let (c, var) = if let Some(c) = self.as_constant() {
            (c, other)
        } else if let Some(c) = other.as_constant() {
            (c, self)
        } else {
            return None;
        };
        let terms = var
            .terms
            .iter()
            .map(|t| {
                Some(Term {
                    sym: t.sym.clone(),
                    power: t.power,
                    coeff: t.coeff.checked_mul(c)?,
                })
            })
            .collect::<Option<Vec<_>>>()?;
        Some(
            Self {
                terms,
                constant: var.constant.checked_mul(c)?,
            }
            .normalize(),
        )
    }

    pub fn collect_symbols(&self, out: &mut BTreeSet<String>) {
        for t in &self.terms {
            out.insert(t.sym.clone());
        }
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "{}", self.constant);
        }
        let mut first = true;
        for t in &self.terms {
            if !first {
                f.write_str(" + ")?;
            }
            write!(f, "{t}")?;
            first = false;
        }
        if self.constant != 0 {
            write!(f, " + {}", self.constant)?;
        }
        Ok(())
    }
}
