//! Shorthand macros for building trees by hand, mostly for tests.

#[macro_export]
macro_rules! name {
    ($id:expr) => {
        $crate::ast::Expr::Name {
            id: $id.to_string(),
        }
    };
}

#[macro_export]
macro_rules! int {
    ($v:expr) => {
        $crate::ast::Expr::Constant {
            value: $crate::ast::Constant::Int($v),
        }
    };
}

#[macro_export]
macro_rules! float {
    ($text:expr) => {
        $crate::ast::Expr::Constant {
            value: $crate::ast::Constant::Float($text.to_string()),
        }
    };
}

#[macro_export]
macro_rules! string {
    ($s:expr) => {
        $crate::ast::Expr::Constant {
            value: $crate::ast::Constant::Str($s.to_string()),
        }
    };
}

#[macro_export]
macro_rules! none {
    () => {
        $crate::ast::Expr::Constant {
            value: $crate::ast::Constant::None,
        }
    };
}

#[macro_export]
macro_rules! attr {
    ($value:expr, $attr:expr) => {
        $crate::ast::Expr::Attribute {
            value: Box::new($value),
            attr: $attr.to_string(),
        }
    };
}

#[macro_export]
macro_rules! call {
    ($func:expr $(, $arg:expr)* $(,)?) => {
        $crate::ast::Expr::Call {
            func: Box::new($func),
            args: vec![$($arg),*],
            keywords: vec![],
        }
    };
}

#[macro_export]
macro_rules! binop {
    ($left:expr, $op:ident, $right:expr) => {
        $crate::ast::Expr::BinOp {
            left: Box::new($left),
            op: $crate::ast::operators::BinOperator::$op,
            right: Box::new($right),
        }
    };
}

#[macro_export]
macro_rules! tuple {
    ($($elt:expr),* $(,)?) => {
        $crate::ast::Expr::Tuple {
            elts: vec![$($elt),*],
            ctx: $crate::ast::ExprContext::Load,
        }
    };
}

#[macro_export]
macro_rules! list {
    ($($elt:expr),* $(,)?) => {
        $crate::ast::Expr::List {
            elts: vec![$($elt),*],
        }
    };
}

#[macro_export]
macro_rules! expr_stmt {
    ($value:expr) => {
        $crate::ast::Stmt::Expr { value: $value }
    };
}

#[macro_export]
macro_rules! assign {
    ($target:expr, $value:expr) => {
        $crate::ast::Stmt::Assign {
            targets: vec![$target],
            value: $value,
        }
    };
}

#[macro_export]
macro_rules! ret {
    () => {
        $crate::ast::Stmt::Return { value: None }
    };
    ($value:expr) => {
        $crate::ast::Stmt::Return {
            value: Some($value),
        }
    };
}

#[macro_export]
macro_rules! import {
    ($($name:expr),+ $(,)?) => {
        $crate::ast::Stmt::Import {
            names: vec![$($crate::ast::Alias { name: $name.to_string(), asname: None }),+],
        }
    };
}

#[macro_export]
macro_rules! located {
    ($node:expr, $line:expr) => {
        $crate::ast::Located::new($node, $line)
    };
}

#[cfg(test)]
mod builder_test {
    use crate::ast::{Constant, Expr, ExprContext, Located, Stmt, operators::BinOperator};

    #[test]
    fn buildertest() {
        let e = binop!(call!(name!("f"), int!(1)), Add, attr!(name!("a"), "b"));
        let answer = Expr::BinOp {
            left: Box::new(Expr::Call {
                func: Box::new(Expr::Name { id: "f".into() }),
                args: vec![Expr::Constant {
                    value: Constant::Int(1),
                }],
                keywords: vec![],
            }),
            op: BinOperator::Add,
            right: Box::new(Expr::Attribute {
                value: Box::new(Expr::Name { id: "a".into() }),
                attr: "b".into(),
            }),
        };
        assert_eq!(e, answer);
    }

    #[test]
    fn statements() {
        let stmt = located!(assign!(name!("x"), tuple!(int!(1), none!())), 3);
        let answer = Located {
            node: Stmt::Assign {
                targets: vec![Expr::Name { id: "x".into() }],
                value: Expr::Tuple {
                    elts: vec![
                        Expr::Constant {
                            value: Constant::Int(1),
                        },
                        Expr::Constant {
                            value: Constant::None,
                        },
                    ],
                    ctx: ExprContext::Load,
                },
            },
            line: 3,
        };
        assert_eq!(stmt, answer);
    }
}
