//! Operator identities that reduce every formula to AND, OR and NOT.
//!
//! Each identity is one bottom-up pass that rebuilds the whole tree. The passes run in the
//! order XOR, IFF, IMPLIES because removing IFF introduces implications.

use crate::sat::expr::{Expr, Operator};
use log::trace;

/// Rebuilds `expr` bottom-up, handing every rebuilt binary node to `rewrite`.
fn rewrite_binary(expr: &Expr, rewrite: &impl Fn(Operator, Expr, Expr) -> Expr) -> Expr {
    match expr {
        Expr::Literal(_) => expr.clone(),
        Expr::Unary(op, e) => Expr::Unary(*op, Box::new(rewrite_binary(e, rewrite))),
        Expr::Binary(op, p, q) => rewrite(
            *op,
            rewrite_binary(p, rewrite),
            rewrite_binary(q, rewrite),
        ),
    }
}

/// `a + b` becomes `~(a <-> b)`.
#[must_use]
pub fn xor_equivalence(expr: &Expr) -> Expr {
    rewrite_binary(expr, &|op, p, q| match op {
        Operator::Xor => Expr::not(Expr::iff(p, q)),
        op => Expr::binary(op, p, q),
    })
}

/// `a <-> b` becomes `(a -> b) & (b -> a)`.
#[must_use]
pub fn iff_equivalence(expr: &Expr) -> Expr {
    rewrite_binary(expr, &|op, p, q| match op {
        Operator::Iff => Expr::and(Expr::implies(p.clone(), q.clone()), Expr::implies(q, p)),
        op => Expr::binary(op, p, q),
    })
}

/// `a -> b` becomes `~a | b`.
#[must_use]
pub fn implication_equivalence(expr: &Expr) -> Expr {
    rewrite_binary(expr, &|op, p, q| match op {
        Operator::Implies => Expr::or(Expr::not(p), q),
        op => Expr::binary(op, p, q),
    })
}

/// Removes XOR, IFF and IMPLIES, in that order.
#[must_use]
pub fn simplify_operators(expr: &Expr) -> Expr {
    let expr = xor_equivalence(expr);
    let expr = iff_equivalence(&expr);
    let expr = implication_equivalence(&expr);
    trace!("basic operators: {expr}");
    expr
}
