//! Formatting rules that do not depend on a particular node: indentation,
//! vertical spacing between top-level items, operator binding strength and
//! string literal quoting.

use prettypy_lang::ast::operators::{BinOperator, BoolOperator, UnaryOperator};
use prettypy_lang::ast::{Constant, Expr, ExprContext, Stmt};

pub fn indentation(level: usize, indent_size: usize) -> String {
    " ".repeat(level * indent_size)
}

/// A top-level unit the driver places on the page.
#[derive(Clone, Copy, Debug)]
pub enum Item<'a> {
    Stmt(&'a Stmt),
    /// A comment drained just before the next statement.
    Comment,
}

impl Item<'_> {
    pub fn kind_name(&self) -> &str {
        match self {
            Item::Stmt(stmt) => stmt.kind_name(),
            Item::Comment => "Comment",
        }
    }

    fn is_definition(&self) -> bool {
        matches!(self, Item::Stmt(stmt) if stmt.is_definition())
    }

    fn is_import(&self) -> bool {
        matches!(self, Item::Stmt(stmt) if stmt.is_import())
    }
}

/// Number of empty lines between two consecutive top-level items.
pub fn blank_lines(prev: &Item, next: &Item) -> usize {
    if next.is_definition() || prev.is_definition() {
        2
    } else if prev.is_import() && !next.is_import() {
        2
    } else if prev.kind_name() != next.kind_name() {
        1
    } else {
        0
    }
}

/// Binding strength of an expression, loosest first.
///
/// A child is wrapped in parentheses when its own precedence is lower than the
/// minimum its position in the parent requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// A bare `a, b` tuple, only valid where a whole statement operand is expected.
    Tuple,
    Lambda,
    IfExp,
    Or,
    And,
    Not,
    Compare,
    BitOr,
    BitXor,
    BitAnd,
    Shift,
    Arith,
    Term,
    /// Unary `+x`, `-x`, `~x`.
    Factor,
    Power,
    Atom,
}

impl Precedence {
    /// The next tighter level.
    pub fn next(self) -> Self {
        use Precedence::*;
        match self {
            Tuple => Lambda,
            Lambda => IfExp,
            IfExp => Or,
            Or => And,
            And => Not,
            Not => Compare,
            Compare => BitOr,
            BitOr => BitXor,
            BitXor => BitAnd,
            BitAnd => Shift,
            Shift => Arith,
            Arith => Term,
            Term => Factor,
            Factor => Power,
            Power | Atom => Atom,
        }
    }

    pub fn of_binop(op: BinOperator) -> Self {
        match op {
            BinOperator::Add | BinOperator::Sub => Precedence::Arith,
            BinOperator::Mult
            | BinOperator::MatMult
            | BinOperator::Div
            | BinOperator::FloorDiv
            | BinOperator::Mod => Precedence::Term,
            BinOperator::Pow => Precedence::Power,
            BinOperator::LShift | BinOperator::RShift => Precedence::Shift,
            BinOperator::BitOr => Precedence::BitOr,
            BinOperator::BitXor => Precedence::BitXor,
            BinOperator::BitAnd => Precedence::BitAnd,
        }
    }

    pub fn of_boolop(op: BoolOperator) -> Self {
        match op {
            BoolOperator::And => Precedence::And,
            BoolOperator::Or => Precedence::Or,
        }
    }

    pub fn of_unary(op: UnaryOperator) -> Self {
        if op.is_keyword() {
            Precedence::Not
        } else {
            Precedence::Factor
        }
    }

    pub fn of(expr: &Expr) -> Self {
        match expr {
            Expr::Tuple {
                elts,
                ctx: ExprContext::Store,
            } if !elts.is_empty() => Precedence::Tuple,
            Expr::Lambda { .. } => Precedence::Lambda,
            Expr::IfExp { .. } => Precedence::IfExp,
            Expr::BoolOp { op, .. } => Self::of_boolop(*op),
            Expr::UnaryOp { op, .. } => Self::of_unary(*op),
            Expr::Compare { .. } => Precedence::Compare,
            Expr::BinOp { op, .. } => Self::of_binop(*op),
            Expr::Starred { .. } => Precedence::Factor,
            // a literal `-1` reads like a unary minus
            Expr::Constant {
                value: Constant::Int(i),
            } if *i < 0 => Precedence::Factor,
            Expr::Constant {
                value: Constant::Float(text),
            } if text.starts_with('-') => Precedence::Factor,
            _ => Precedence::Atom,
        }
    }
}

/// Renders string contents as a single-line literal.
///
/// Single quotes are preferred; double quotes are used when the content itself
/// contains a single quote. Everything outside printable ASCII is escaped.
pub fn quote_string(content: &str) -> String {
    let quote = if content.contains('\'') { '"' } else { '\'' };
    let mut res = String::with_capacity(content.len() + 2);
    res.push(quote);
    for c in content.chars() {
        let code = c as u32;
        match c {
            '\\' => res.push_str("\\\\"),
            '\n' => res.push_str("\\n"),
            '\r' => res.push_str("\\r"),
            '\t' => res.push_str("\\t"),
            _ if c == quote => {
                res.push('\\');
                res.push(c);
            }
            _ if code < 0x20 || (0x7f..=0xff).contains(&code) => {
                res.push_str(&format!("\\x{code:02x}"))
            }
            _ if (0x100..=0xffff).contains(&code) => res.push_str(&format!("\\u{code:04x}")),
            _ if code > 0xffff => res.push_str(&format!("\\U{code:08x}")),
            _ => res.push(c),
        }
    }
    res.push(quote);
    res
}
