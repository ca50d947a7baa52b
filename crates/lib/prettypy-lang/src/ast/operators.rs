use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOperator {
    Add,      // +
    Sub,      // -
    Mult,     // *
    MatMult,  // @
    Div,      // /
    FloorDiv, // //
    Mod,      // %
    Pow,      // **
    LShift,   // <<
    RShift,   // >>
    BitOr,    // |
    BitXor,   // ^
    BitAnd,   // &
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    Not,    // not
    USub,   // -
    UAdd,   // +
    Invert, // ~
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoolOperator {
    And,
    Or,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmpOperator {
    Eq,    // ==
    NotEq, // !=
    Lt,    // <
    LtE,   // <=
    Gt,    // >
    GtE,   // >=
    Is,    // is
    IsNot, // is not
    In,    // in
    NotIn, // not in
}

impl UnaryOperator {
    /// Word operators need a space before their operand, symbols are glued to it.
    pub fn is_keyword(&self) -> bool {
        matches!(self, UnaryOperator::Not)
    }
}

impl fmt::Display for BinOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BinOperator::Add => write!(f, "+"),
            BinOperator::Sub => write!(f, "-"),
            BinOperator::Mult => write!(f, "*"),
            BinOperator::MatMult => write!(f, "@"),
            BinOperator::Div => write!(f, "/"),
            BinOperator::FloorDiv => write!(f, "//"),
            BinOperator::Mod => write!(f, "%"),
            BinOperator::Pow => write!(f, "**"),
            BinOperator::LShift => write!(f, "<<"),
            BinOperator::RShift => write!(f, ">>"),
            BinOperator::BitOr => write!(f, "|"),
            BinOperator::BitXor => write!(f, "^"),
            BinOperator::BitAnd => write!(f, "&"),
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnaryOperator::Not => write!(f, "not"),
            UnaryOperator::USub => write!(f, "-"),
            UnaryOperator::UAdd => write!(f, "+"),
            UnaryOperator::Invert => write!(f, "~"),
        }
    }
}

impl fmt::Display for BoolOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoolOperator::And => write!(f, "and"),
            BoolOperator::Or => write!(f, "or"),
        }
    }
}

impl fmt::Display for CmpOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CmpOperator::Eq => write!(f, "=="),
            CmpOperator::NotEq => write!(f, "!="),
            CmpOperator::Lt => write!(f, "<"),
            CmpOperator::LtE => write!(f, "<="),
            CmpOperator::Gt => write!(f, ">"),
            CmpOperator::GtE => write!(f, ">="),
            CmpOperator::Is => write!(f, "is"),
            CmpOperator::IsNot => write!(f, "is not"),
            CmpOperator::In => write!(f, "in"),
            CmpOperator::NotIn => write!(f, "not in"),
        }
    }
}
