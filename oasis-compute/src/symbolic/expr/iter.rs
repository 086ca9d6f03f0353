use super::{Expr, Primary};

/// A depth-first walk over an expression and every expression nested in it, including the
/// arguments of calls. Parents come before their children.
///
/// Created by [`Expr::subexprs`].
pub struct Subexprs<'a> {
    pending: Vec<&'a Expr>,
}

impl<'a> Subexprs<'a> {
    pub(super) fn new(root: &'a Expr) -> Self {
        Self { pending: vec![root] }
    }
}

impl<'a> Iterator for Subexprs<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        let expr = self.pending.pop()?;
        match expr {
            Expr::Primary(Primary::Call(_, args)) => self.pending.extend(args.iter().rev()),
            Expr::Primary(_) => (),
            Expr::Add(children) | Expr::Mul(children) => self.pending.extend(children.iter().rev()),
            Expr::Exp(base, exp) => self.pending.extend([&**exp, &**base]),
        }
        Some(expr)
    }
}
