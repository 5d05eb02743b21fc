#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use vera_ast::{
    span_between, ArithOp, Assignment, CmpOp, Command, Comparison, Expr, ExprKind, Ident,
    IfCommand, Program, Span, Spanned,
};
use vera_lex::{Token, TokenKind};

use crate::error::ParseError;

pub struct Parser<'a> {
    tokens: &'a [Token],
    idx: usize,
}

fn join(a: Span, b: Span) -> Span {
    let start = a.offset().min(b.offset());
    let end = (a.offset() + a.len()).max(b.offset() + b.len());
    span_between(start, end)
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, idx: 0 }
    }

    /// Parses a full program: commands, then a single trailing
    /// `assert(comparison)` post-condition.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut commands = Vec::new();
        let mut inputs: BTreeSet<String> = BTreeSet::new();

        loop {
            match self.peek_kind() {
                Some(TokenKind::KwAssert) => break,
                Some(TokenKind::KwIf) => {
                    commands.push(Command::If(self.parse_if()?));
                }
                Some(TokenKind::Ident(_)) => {
                    let assign = self.parse_assignment()?;
                    self.note_input(&assign, &mut inputs)?;
                    commands.push(Command::Assign(assign));
                }
                _ => {
                    return Err(ParseError {
                        message: "expected an assignment, `if`, or the final `assert`"
                            .to_string(),
                        span: self.peek_span(),
                    });
                }
            }
        }

        let post = self.parse_assert()?;
        if !self.at_eof() {
            return Err(ParseError {
                message: "`assert` must be the last statement of the program".to_string(),
                span: self.peek_span(),
            });
        }

        Ok(Program {
            commands,
            inputs,
            post,
        })
    }

    fn note_input(
        &self,
        assign: &Assignment,
        inputs: &mut BTreeSet<String>,
    ) -> Result<(), ParseError> {
        if !matches!(assign.rhs.kind, ExprKind::Input) {
            return Ok(());
        }
        if !inputs.insert(assign.lhs.node.clone()) {
            return Err(ParseError {
                message: format!(
                    "variable '{}' is assigned from input() more than once",
                    assign.lhs.node
                ),
                span: assign.span,
            });
        }
        Ok(())
    }

    fn parse_if(&mut self) -> Result<IfCommand, ParseError> {
        let start = self.expect(TokenKind::KwIf)?;
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_comparison()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::LBrace)?;

        // Bodies hold straight-line assignments only; nested control flow
        // is not part of the language.
        let mut body = Vec::new();
        while !self.at(TokenKind::RBrace) {
            if !matches!(self.peek_kind(), Some(TokenKind::Ident(_))) {
                return Err(ParseError {
                    message: "an `if` body may contain only assignments".to_string(),
                    span: self.peek_span(),
                });
            }
            body.push(self.parse_assignment()?);
        }
        let end = self.expect(TokenKind::RBrace)?;

        Ok(IfCommand {
            span: join(start.span, end.span),
            condition,
            body,
        })
    }

    fn parse_assignment(&mut self) -> Result<Assignment, ParseError> {
        let lhs = self.expect_ident()?;
        self.expect(TokenKind::Assign)?;
        let rhs = self.parse_expr()?;
        let span = join(lhs.span, rhs.span);
        Ok(Assignment { span, lhs, rhs })
    }

    fn parse_assert(&mut self) -> Result<Comparison, ParseError> {
        self.expect(TokenKind::KwAssert)?;
        self.expect(TokenKind::LParen)?;
        let cmp = self.parse_comparison()?;
        self.expect(TokenKind::RParen)?;
        Ok(cmp)
    }

    fn parse_comparison(&mut self) -> Result<Comparison, ParseError> {
        let left = self.parse_expr()?;
        let op = match self.peek_kind() {
            Some(TokenKind::EqEq) => CmpOp::Eq,
            Some(TokenKind::Neq) => CmpOp::Ne,
            Some(TokenKind::Lt) => CmpOp::Lt,
            Some(TokenKind::Gt) => CmpOp::Gt,
            Some(TokenKind::Le) => CmpOp::Le,
            Some(TokenKind::Ge) => CmpOp::Ge,
            _ => {
                return Err(ParseError {
                    message: "expected a comparison operator".to_string(),
                    span: self.peek_span(),
                });
            }
        };
        self.next();
        let right = self.parse_expr()?;
        let span = join(left.span, right.span);
        Ok(Comparison {
            span,
            op,
            left,
            right,
        })
    }

    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => ArithOp::Add,
                Some(TokenKind::Minus) => ArithOp::Sub,
                _ => break,
            };
            self.next();
            let right = self.parse_term()?;
            let span = join(left.span, right.span);
            left = Expr {
                span,
                kind: ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
            };
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_factor()?;
        while self.at(TokenKind::Star) {
            self.next();
            let right = self.parse_factor()?;
            let span = join(left.span, right.span);
            left = Expr {
                span,
                kind: ExprKind::Binary {
                    left: Box::new(left),
                    op: ArithOp::Mul,
                    right: Box::new(right),
                },
            };
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        match self.peek_kind().cloned() {
            Some(TokenKind::Int(n)) => {
                let tok = self.expect_any()?;
                Ok(Expr {
                    span: tok.span,
                    kind: ExprKind::Int(n),
                })
            }
            Some(TokenKind::Minus) => {
                let minus = self.expect_any()?;
                let inner = self.parse_factor()?;
                let span = join(minus.span, inner.span);
                // Fold a negated literal; anything else becomes `0 - expr`.
                if let ExprKind::Int(n) = inner.kind {
                    return Ok(Expr {
                        span,
                        kind: ExprKind::Int(-n),
                    });
                }
                Ok(Expr {
                    span,
                    kind: ExprKind::Binary {
                        left: Box::new(Expr {
                            span: minus.span,
                            kind: ExprKind::Int(0),
                        }),
                        op: ArithOp::Sub,
                        right: Box::new(inner),
                    },
                })
            }
            Some(TokenKind::Ident(_)) => {
                let id = self.expect_ident()?;
                Ok(Expr {
                    span: id.span,
                    kind: ExprKind::Var(id),
                })
            }
            Some(TokenKind::KwInput) => {
                let kw = self.expect_any()?;
                self.expect(TokenKind::LParen)?;
                let end = self.expect(TokenKind::RParen)?;
                Ok(Expr {
                    span: join(kw.span, end.span),
                    kind: ExprKind::Input,
                })
            }
            Some(TokenKind::LParen) => {
                self.next();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(ParseError {
                message: "expected an expression".to_string(),
                span: self.peek_span(),
            }),
        }
    }

    fn expect_ident(&mut self) -> Result<Ident, ParseError> {
        match self.peek_kind().cloned() {
            Some(TokenKind::Ident(s)) => {
                let tok = self.expect_any()?;
                Ok(Spanned::new(tok.span, s))
            }
            _ => Err(ParseError {
                message: "expected an identifier".to_string(),
                span: self.peek_span(),
            }),
        }
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        if self.at(expected.clone()) {
            return self.expect_any();
        }
        Err(ParseError {
            message: format!("expected {expected:?}"),
            span: self.peek_span(),
        })
    }

    fn expect_any(&mut self) -> Result<Token, ParseError> {
        let tok = self.tokens.get(self.idx).cloned().ok_or_else(|| ParseError {
            message: "unexpected end of input".to_string(),
            span: span_between(0, 0),
        })?;
        self.idx += 1;
        Ok(tok)
    }

    fn next(&mut self) {
        self.idx += 1;
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(&kind)
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek_kind(), Some(TokenKind::Eof) | None)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.tokens.get(self.idx).map(|t| &t.kind)
    }

    fn peek_span(&self) -> Span {
        self.tokens
            .get(self.idx)
            .map(|t| t.span)
            .unwrap_or_else(|| span_between(0, 0))
    }
}
