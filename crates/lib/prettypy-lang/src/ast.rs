pub mod builder;
pub mod operators;
mod serde_impl;

use serde::{Deserialize, Serialize};

use crate::ast::operators::{BinOperator, BoolOperator, CmpOperator, UnaryOperator};

pub type Line = usize;
pub type Identifier = String;

/// A node paired with the source line it started on. Only top-level statements carry one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Located<T> {
    pub node: T,
    pub line: Line,
}

impl<T> Located<T> {
    pub fn new(node: T, line: Line) -> Self {
        Self { node, line }
    }
}

/// Root of a parsed file.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Module {
    #[serde(default)]
    pub body: Vec<Located<Stmt>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alias {
    pub name: Identifier,
    #[serde(default)]
    pub asname: Option<Identifier>,
}

/// `arg=value` in a call or class header. `arg == None` stands for `**value`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    #[serde(default)]
    pub arg: Option<Identifier>,
    pub value: Expr,
}

/// Parameter list of a `def` or `lambda`.
///
/// `defaults` are aligned to the *last* entries of `args`, as in `def f(a, b=1, c=2)`.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Arguments {
    #[serde(default)]
    pub args: Vec<Identifier>,
    #[serde(default)]
    pub defaults: Vec<Expr>,
    #[serde(default)]
    pub vararg: Option<Identifier>,
    #[serde(default)]
    pub kwarg: Option<Identifier>,
}

impl Arguments {
    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.vararg.is_none() && self.kwarg.is_none()
    }
}

/// One `for target in iter if cond...` clause of a comprehension.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comprehension {
    pub target: Expr,
    pub iter: Expr,
    #[serde(default)]
    pub ifs: Vec<Expr>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExprContext {
    #[default]
    Load,
    Store,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Constant {
    Str(String),
    Int(i64),
    // kept as written in the source so that `1.0` and `1e3` survive unchanged
    Float(String),
    Bool(bool),
    None,
}

#[derive(Clone, Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
#[serde(remote = "Self", tag = "kind")]
pub enum Stmt {
    Import {
        names: Vec<Alias>,
    },
    ImportFrom {
        #[serde(default)]
        module: Option<Identifier>,
        names: Vec<Alias>,
        #[serde(default)]
        level: usize,
    },
    FunctionDef {
        name: Identifier,
        #[serde(default)]
        args: Arguments,
        body: Vec<Stmt>,
        #[serde(default)]
        decorators: Vec<Expr>,
    },
    ClassDef {
        name: Identifier,
        #[serde(default)]
        bases: Vec<Expr>,
        #[serde(default)]
        keywords: Vec<Keyword>,
        body: Vec<Stmt>,
        #[serde(default)]
        decorators: Vec<Expr>,
    },
    Return {
        #[serde(default)]
        value: Option<Expr>,
    },
    Assign {
        targets: Vec<Expr>,
        value: Expr,
    },
    AugAssign {
        target: Expr,
        op: BinOperator,
        value: Expr,
    },
    If {
        test: Expr,
        body: Vec<Stmt>,
        #[serde(default)]
        orelse: Vec<Stmt>,
    },
    While {
        test: Expr,
        body: Vec<Stmt>,
        #[serde(default)]
        orelse: Vec<Stmt>,
    },
    For {
        target: Expr,
        iter: Expr,
        body: Vec<Stmt>,
        #[serde(default)]
        orelse: Vec<Stmt>,
    },
    With {
        context_expr: Expr,
        #[serde(default)]
        optional_vars: Option<Expr>,
        body: Vec<Stmt>,
    },
    Raise {
        #[serde(default)]
        exc: Option<Expr>,
        #[serde(default)]
        cause: Option<Expr>,
    },
    Assert {
        test: Expr,
        #[serde(default)]
        msg: Option<Expr>,
    },
    Global {
        names: Vec<Identifier>,
    },
    Break,
    Continue,
    Pass,
    Expr {
        value: Expr,
    },
    /// Any statement kind outside of the set above, e.g. `try` or `async def`.
    #[serde(skip)]
    Unsupported {
        kind: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
#[serde(remote = "Self", tag = "kind")]
pub enum Expr {
    Name {
        id: Identifier,
    },
    Attribute {
        value: Box<Expr>,
        attr: Identifier,
    },
    Subscript {
        value: Box<Expr>,
        slice: Box<Expr>,
    },
    Slice {
        #[serde(default)]
        lower: Option<Box<Expr>>,
        #[serde(default)]
        upper: Option<Box<Expr>>,
        #[serde(default)]
        step: Option<Box<Expr>>,
    },
    Call {
        func: Box<Expr>,
        #[serde(default)]
        args: Vec<Expr>,
        #[serde(default)]
        keywords: Vec<Keyword>,
    },
    Starred {
        value: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    BinOp {
        left: Box<Expr>,
        op: BinOperator,
        right: Box<Expr>,
    },
    BoolOp {
        op: BoolOperator,
        values: Vec<Expr>,
    },
    Compare {
        left: Box<Expr>,
        ops: Vec<CmpOperator>,
        comparators: Vec<Expr>,
    },
    IfExp {
        test: Box<Expr>,
        body: Box<Expr>,
        orelse: Box<Expr>,
    },
    Lambda {
        #[serde(default)]
        args: Arguments,
        body: Box<Expr>,
    },
    Tuple {
        #[serde(default)]
        elts: Vec<Expr>,
        #[serde(default)]
        ctx: ExprContext,
    },
    List {
        #[serde(default)]
        elts: Vec<Expr>,
    },
    Set {
        elts: Vec<Expr>,
    },
    /// A `None` key is a `**mapping` entry.
    Dict {
        #[serde(default)]
        keys: Vec<Option<Expr>>,
        #[serde(default)]
        values: Vec<Expr>,
    },
    ListComp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    SetComp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    GeneratorExp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    DictComp {
        key: Box<Expr>,
        value: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    Constant {
        value: Constant,
    },
    /// Any expression kind outside of the set above, e.g. `yield` or f-strings.
    #[serde(skip)]
    Unsupported {
        kind: String,
    },
}

/// Statement kinds the loader recognizes. Anything else becomes [`Stmt::Unsupported`].
pub const STMT_KINDS: &[&str] = &[
    "Import",
    "ImportFrom",
    "FunctionDef",
    "ClassDef",
    "Return",
    "Assign",
    "AugAssign",
    "If",
    "While",
    "For",
    "With",
    "Raise",
    "Assert",
    "Global",
    "Break",
    "Continue",
    "Pass",
    "Expr",
];

/// Expression kinds the loader recognizes. Anything else becomes [`Expr::Unsupported`].
pub const EXPR_KINDS: &[&str] = &[
    "Name",
    "Attribute",
    "Subscript",
    "Slice",
    "Call",
    "Starred",
    "UnaryOp",
    "BinOp",
    "BoolOp",
    "Compare",
    "IfExp",
    "Lambda",
    "Tuple",
    "List",
    "Set",
    "Dict",
    "ListComp",
    "SetComp",
    "GeneratorExp",
    "DictComp",
    "Constant",
];

impl Stmt {
    pub fn kind_name(&self) -> &str {
        match self {
            Stmt::Import { .. } => "Import",
            Stmt::ImportFrom { .. } => "ImportFrom",
            Stmt::FunctionDef { .. } => "FunctionDef",
            Stmt::ClassDef { .. } => "ClassDef",
            Stmt::Return { .. } => "Return",
            Stmt::Assign { .. } => "Assign",
            Stmt::AugAssign { .. } => "AugAssign",
            Stmt::If { .. } => "If",
            Stmt::While { .. } => "While",
            Stmt::For { .. } => "For",
            Stmt::With { .. } => "With",
            Stmt::Raise { .. } => "Raise",
            Stmt::Assert { .. } => "Assert",
            Stmt::Global { .. } => "Global",
            Stmt::Break => "Break",
            Stmt::Continue => "Continue",
            Stmt::Pass => "Pass",
            Stmt::Expr { .. } => "Expr",
            Stmt::Unsupported { kind } => kind.as_str(),
        }
    }

    /// `def` and `class` statements.
    pub fn is_definition(&self) -> bool {
        matches!(self, Stmt::FunctionDef { .. } | Stmt::ClassDef { .. })
    }

    pub fn is_import(&self) -> bool {
        matches!(self, Stmt::Import { .. } | Stmt::ImportFrom { .. })
    }
}

impl Expr {
    pub fn kind_name(&self) -> &str {
        match self {
            Expr::Name { .. } => "Name",
            Expr::Attribute { .. } => "Attribute",
            Expr::Subscript { .. } => "Subscript",
            Expr::Slice { .. } => "Slice",
            Expr::Call { .. } => "Call",
            Expr::Starred { .. } => "Starred",
            Expr::UnaryOp { .. } => "UnaryOp",
            Expr::BinOp { .. } => "BinOp",
            Expr::BoolOp { .. } => "BoolOp",
            Expr::Compare { .. } => "Compare",
            Expr::IfExp { .. } => "IfExp",
            Expr::Lambda { .. } => "Lambda",
            Expr::Tuple { .. } => "Tuple",
            Expr::List { .. } => "List",
            Expr::Set { .. } => "Set",
            Expr::Dict { .. } => "Dict",
            Expr::ListComp { .. } => "ListComp",
            Expr::SetComp { .. } => "SetComp",
            Expr::GeneratorExp { .. } => "GeneratorExp",
            Expr::DictComp { .. } => "DictComp",
            Expr::Constant { .. } => "Constant",
            Expr::Unsupported { kind } => kind.as_str(),
        }
    }
}
