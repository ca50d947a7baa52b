use itertools::Either;
use prettypy_lang::ast::{Alias, Arguments, Expr, Keyword, Stmt};

use crate::Config;
use crate::buffer::{ChunkBuffer, delimited};
use crate::error::FormatError;
use crate::layout::{self, Precedence};

/// State of one formatting pass: the output buffer and the settings it was started with.
pub struct PrintContext<'a> {
    pub buffer: ChunkBuffer,
    config: &'a Config,
}

impl AsMut<ChunkBuffer> for PrintContext<'_> {
    fn as_mut(&mut self) -> &mut ChunkBuffer {
        &mut self.buffer
    }
}

impl<'a> PrintContext<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            buffer: ChunkBuffer::new(),
            config,
        }
    }

    pub fn push(&mut self, fragment: impl Into<String>) {
        self.buffer.append(fragment);
    }

    pub fn indent(&mut self, level: usize) {
        if level > 0 {
            let unit = layout::indentation(level, self.config.indent_size);
            self.buffer.append(unit);
        }
    }

    pub fn finish(self) -> String {
        self.buffer.render()
    }
}

/// How an `if` statement was reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum IfContext {
    #[default]
    Fresh,
    /// The caller already wrote `elif `, only the condition and body remain.
    Elif,
}

fn unsupported(ctx: &mut PrintContext, kind: &str) {
    log::warn!("no formatting rule for node kind `{kind}`, emitting a placeholder");
    ctx.push(format!("<{kind}>"));
}

/// Emits a statement without leading indentation and without a trailing newline.
/// Lines inside nested blocks are indented relative to `indent`.
pub fn emit_stmt(
    ctx: &mut PrintContext,
    stmt: &Stmt,
    indent: usize,
    if_ctx: IfContext,
) -> Result<(), FormatError> {
    statement::emit(ctx, stmt, indent, if_ctx)
}

/// Emits an expression on a single line, parenthesized if it binds looser than `min`.
pub fn emit_expr(ctx: &mut PrintContext, expr: &Expr, min: Precedence) -> Result<(), FormatError> {
    expr::emit(ctx, expr, min)
}

fn emit_alias(ctx: &mut PrintContext, alias: &Alias) -> Result<(), FormatError> {
    ctx.push(alias.name.as_str());
    if let Some(asname) = &alias.asname {
        ctx.push(format!(" as {asname}"));
    }
    Ok(())
}

fn emit_keyword(ctx: &mut PrintContext, keyword: &Keyword) -> Result<(), FormatError> {
    match &keyword.arg {
        Some(arg) => {
            ctx.push(format!("{arg}="));
            expr::emit(ctx, &keyword.value, Precedence::Lambda)
        }
        None => {
            ctx.push("**");
            expr::emit(ctx, &keyword.value, Precedence::BitOr)
        }
    }
}

/// Positional values followed by keywords, as in a call or a class header.
fn emit_call_args(
    ctx: &mut PrintContext,
    args: &[Expr],
    keywords: &[Keyword],
) -> Result<(), FormatError> {
    let items = args
        .iter()
        .map(Either::Left)
        .chain(keywords.iter().map(Either::Right));
    delimited(ctx, items, ", ", |ctx, item| match item {
        Either::Left(arg) => expr::emit(ctx, arg, Precedence::Lambda),
        Either::Right(keyword) => emit_keyword(ctx, keyword),
    })
}

enum Param<'a> {
    Plain(&'a str),
    WithDefault(&'a str, &'a Expr),
    Vararg(&'a str),
    Kwarg(&'a str),
}

fn emit_arguments(ctx: &mut PrintContext, arguments: &Arguments) -> Result<(), FormatError> {
    let Arguments {
        args,
        defaults,
        vararg,
        kwarg,
    } = arguments;
    let Some(first_default) = args.len().checked_sub(defaults.len()) else {
        return Err(FormatError::structure(
            "Arguments",
            format!(
                "{} defaults for {} positional arguments",
                defaults.len(),
                args.len()
            ),
        ));
    };
    let positional = args.iter().enumerate().map(move |(i, arg)| {
        if i < first_default {
            Param::Plain(arg)
        } else {
            Param::WithDefault(arg, &defaults[i - first_default])
        }
    });
    let params = positional
        .chain(vararg.as_deref().map(Param::Vararg))
        .chain(kwarg.as_deref().map(Param::Kwarg));
    delimited(ctx, params, ", ", |ctx, param| {
        match param {
            Param::Plain(name) => ctx.push(name),
            Param::WithDefault(name, default) => {
                ctx.push(format!("{name}="));
                expr::emit(ctx, default, Precedence::Lambda)?;
            }
            Param::Vararg(name) => ctx.push(format!("*{name}")),
            Param::Kwarg(name) => ctx.push(format!("**{name}")),
        }
        Ok(())
    })
}

mod statement {
    use prettypy_lang::ast::Stmt;

    use super::*;

    fn block(
        ctx: &mut PrintContext,
        kind: &'static str,
        body: &[Stmt],
        indent: usize,
    ) -> Result<(), FormatError> {
        if body.is_empty() {
            return Err(FormatError::structure(kind, "block body is empty"));
        }
        ctx.push(":\n");
        delimited(ctx, body, "\n", |ctx, stmt| {
            ctx.indent(indent + 1);
            emit(ctx, stmt, indent + 1, IfContext::Fresh)
        })
    }

    fn else_block(
        ctx: &mut PrintContext,
        kind: &'static str,
        orelse: &[Stmt],
        indent: usize,
    ) -> Result<(), FormatError> {
        if orelse.is_empty() {
            return Ok(());
        }
        ctx.push("\n");
        ctx.indent(indent);
        ctx.push("else");
        block(ctx, kind, orelse, indent)
    }

    fn decorators(ctx: &mut PrintContext, decorators: &[Expr], indent: usize) -> Result<(), FormatError> {
        for decorator in decorators {
            ctx.push("@");
            expr::emit(ctx, decorator, Precedence::Atom)?;
            ctx.push("\n");
            ctx.indent(indent);
        }
        Ok(())
    }

    fn emit_if(
        ctx: &mut PrintContext,
        test: &Expr,
        body: &[Stmt],
        orelse: &[Stmt],
        indent: usize,
        if_ctx: IfContext,
    ) -> Result<(), FormatError> {
        if if_ctx == IfContext::Fresh {
            ctx.push("if ");
        }
        expr::emit(ctx, test, Precedence::Tuple)?;
        block(ctx, "If", body, indent)?;
        match orelse {
            [] => Ok(()),
            [
                Stmt::If {
                    test,
                    body,
                    orelse,
                },
            ] => {
                ctx.push("\n");
                ctx.indent(indent);
                ctx.push("elif ");
                emit_if(ctx, test, body, orelse, indent, IfContext::Elif)
            }
            _ => else_block(ctx, "If", orelse, indent),
        }
    }

    pub(super) fn emit(
        ctx: &mut PrintContext,
        stmt: &Stmt,
        indent: usize,
        if_ctx: IfContext,
    ) -> Result<(), FormatError> {
        match stmt {
            Stmt::Import { names } => {
                if names.is_empty() {
                    return Err(FormatError::structure("Import", "no names to import"));
                }
                ctx.push("import ");
                delimited(ctx, names, ", ", emit_alias)
            }
            Stmt::ImportFrom {
                module,
                names,
                level,
            } => {
                if names.is_empty() {
                    return Err(FormatError::structure("ImportFrom", "no names to import"));
                }
                if module.is_none() && *level == 0 {
                    return Err(FormatError::structure(
                        "ImportFrom",
                        "neither a module nor a relative level is given",
                    ));
                }
                ctx.push(format!(
                    "from {}{} import ",
                    ".".repeat(*level),
                    module.as_deref().unwrap_or_default()
                ));
                delimited(ctx, names, ", ", emit_alias)
            }
            Stmt::FunctionDef {
                name,
                args,
                body,
                decorators: decos,
            } => {
                decorators(ctx, decos, indent)?;
                ctx.push(format!("def {name}("));
                emit_arguments(ctx, args)?;
                ctx.push(")");
                block(ctx, "FunctionDef", body, indent)
            }
            Stmt::ClassDef {
                name,
                bases,
                keywords,
                body,
                decorators: decos,
            } => {
                decorators(ctx, decos, indent)?;
                ctx.push(format!("class {name}"));
                if !bases.is_empty() || !keywords.is_empty() {
                    ctx.push("(");
                    emit_call_args(ctx, bases, keywords)?;
                    ctx.push(")");
                }
                block(ctx, "ClassDef", body, indent)
            }
            Stmt::Return { value } => {
                ctx.push("return");
                if let Some(value) = value {
                    ctx.push(" ");
                    expr::emit(ctx, value, Precedence::Tuple)?;
                }
                Ok(())
            }
            Stmt::Assign { targets, value } => {
                if targets.is_empty() {
                    return Err(FormatError::structure("Assign", "no assignment targets"));
                }
                delimited(ctx, targets, " = ", |ctx, target| {
                    expr::emit(ctx, target, Precedence::Tuple)
                })?;
                ctx.push(" = ");
                expr::emit(ctx, value, Precedence::Tuple)
            }
            Stmt::AugAssign { target, op, value } => {
                expr::emit(ctx, target, Precedence::Tuple)?;
                ctx.push(format!(" {op}= "));
                expr::emit(ctx, value, Precedence::Tuple)
            }
            Stmt::If { test, body, orelse } => emit_if(ctx, test, body, orelse, indent, if_ctx),
            Stmt::While { test, body, orelse } => {
                ctx.push("while ");
                expr::emit(ctx, test, Precedence::Tuple)?;
                block(ctx, "While", body, indent)?;
                else_block(ctx, "While", orelse, indent)
            }
            Stmt::For {
                target,
                iter,
                body,
                orelse,
            } => {
                ctx.push("for ");
                expr::emit(ctx, target, Precedence::Tuple)?;
                ctx.push(" in ");
                expr::emit(ctx, iter, Precedence::Tuple)?;
                block(ctx, "For", body, indent)?;
                else_block(ctx, "For", orelse, indent)
            }
            Stmt::With {
                context_expr,
                optional_vars,
                body,
            } => {
                ctx.push("with ");
                expr::emit(ctx, context_expr, Precedence::Lambda)?;
                if let Some(vars) = optional_vars {
                    ctx.push(" as ");
                    expr::emit(ctx, vars, Precedence::Lambda)?;
                }
                block(ctx, "With", body, indent)
            }
            Stmt::Raise { exc, cause } => {
                ctx.push("raise");
                match (exc, cause) {
                    (None, Some(_)) => {
                        return Err(FormatError::structure(
                            "Raise",
                            "a cause is given without an exception",
                        ));
                    }
                    (Some(exc), cause) => {
                        ctx.push(" ");
                        expr::emit(ctx, exc, Precedence::Lambda)?;
                        if let Some(cause) = cause {
                            ctx.push(" from ");
                            expr::emit(ctx, cause, Precedence::Lambda)?;
                        }
                    }
                    (None, None) => {}
                }
                Ok(())
            }
            Stmt::Assert { test, msg } => {
                ctx.push("assert ");
                expr::emit(ctx, test, Precedence::Lambda)?;
                if let Some(msg) = msg {
                    ctx.push(", ");
                    expr::emit(ctx, msg, Precedence::Lambda)?;
                }
                Ok(())
            }
            Stmt::Global { names } => {
                if names.is_empty() {
                    return Err(FormatError::structure("Global", "no names declared"));
                }
                ctx.push("global ");
                delimited(ctx, names, ", ", |ctx, name| {
                    ctx.push(name.as_str());
                    Ok(())
                })
            }
            Stmt::Break => {
                ctx.push("break");
                Ok(())
            }
            Stmt::Continue => {
                ctx.push("continue");
                Ok(())
            }
            Stmt::Pass => {
                ctx.push("pass");
                Ok(())
            }
            Stmt::Expr { value } => expr::emit(ctx, value, Precedence::Tuple),
            Stmt::Unsupported { kind } => {
                unsupported(ctx, kind);
                Ok(())
            }
        }
    }
}

mod expr {
    use prettypy_lang::ast::{Comprehension, Constant, ExprContext};

    use super::*;

    fn is_number(expr: &Expr) -> bool {
        matches!(
            expr,
            Expr::Constant {
                value: Constant::Int(_) | Constant::Float(_)
            }
        )
    }

    fn elements(ctx: &mut PrintContext, elts: &[Expr]) -> Result<(), FormatError> {
        delimited(ctx, elts, ", ", |ctx, elt| emit(ctx, elt, Precedence::Lambda))
    }

    fn generators(
        ctx: &mut PrintContext,
        kind: &'static str,
        generators: &[Comprehension],
    ) -> Result<(), FormatError> {
        if generators.is_empty() {
            return Err(FormatError::structure(kind, "comprehension has no `for` clause"));
        }
        for Comprehension { target, iter, ifs } in generators {
            ctx.push(" for ");
            emit(ctx, target, Precedence::Tuple)?;
            ctx.push(" in ");
            emit(ctx, iter, Precedence::Or)?;
            for cond in ifs {
                ctx.push(" if ");
                emit(ctx, cond, Precedence::Or)?;
            }
        }
        Ok(())
    }

    fn constant(ctx: &mut PrintContext, value: &Constant) {
        let text = match value {
            Constant::Str(s) => layout::quote_string(s),
            Constant::Int(i) => i.to_string(),
            Constant::Float(text) => text.clone(),
            Constant::Bool(true) => "True".to_string(),
            Constant::Bool(false) => "False".to_string(),
            Constant::None => "None".to_string(),
        };
        ctx.push(text);
    }

    pub(super) fn emit(ctx: &mut PrintContext, expr: &Expr, min: Precedence) -> Result<(), FormatError> {
        let parenthesize = Precedence::of(expr) < min;
        if parenthesize {
            ctx.push("(");
        }
        emit_inner(ctx, expr)?;
        if parenthesize {
            ctx.push(")");
        }
        Ok(())
    }

    fn emit_inner(ctx: &mut PrintContext, expr: &Expr) -> Result<(), FormatError> {
        match expr {
            Expr::Name { id } => ctx.push(id.as_str()),
            Expr::Attribute { value, attr } => {
                // `1.real` would lex as a float literal
                if is_number(value) {
                    ctx.push("(");
                    emit(ctx, value, Precedence::Tuple)?;
                    ctx.push(")");
                } else {
                    emit(ctx, value, Precedence::Atom)?;
                }
                ctx.push(format!(".{attr}"));
            }
            Expr::Subscript { value, slice } => {
                emit(ctx, value, Precedence::Atom)?;
                ctx.push("[");
                match slice.as_ref() {
                    // `a[1:2, 0]`: slices are only valid directly inside the brackets
                    Expr::Tuple { elts, .. } if !elts.is_empty() => {
                        elements(ctx, elts)?;
                        if elts.len() == 1 {
                            ctx.push(",");
                        }
                    }
                    _ => emit(ctx, slice, Precedence::Tuple)?,
                }
                ctx.push("]");
            }
            Expr::Slice { lower, upper, step } => {
                if let Some(lower) = lower {
                    emit(ctx, lower, Precedence::IfExp)?;
                }
                ctx.push(":");
                if let Some(upper) = upper {
                    emit(ctx, upper, Precedence::IfExp)?;
                }
                if let Some(step) = step {
                    ctx.push(":");
                    emit(ctx, step, Precedence::IfExp)?;
                }
            }
            Expr::Call {
                func,
                args,
                keywords,
            } => {
                emit(ctx, func, Precedence::Atom)?;
                ctx.push("(");
                emit_call_args(ctx, args, keywords)?;
                ctx.push(")");
            }
            Expr::Starred { value } => {
                ctx.push("*");
                emit(ctx, value, Precedence::BitOr)?;
            }
            Expr::UnaryOp { op, operand } => {
                if op.is_keyword() {
                    ctx.push(format!("{op} "));
                } else {
                    ctx.push(op.to_string());
                }
                emit(ctx, operand, Precedence::of_unary(*op))?;
            }
            Expr::BinOp { left, op, right } => {
                let prec = Precedence::of_binop(*op);
                // `**` groups to the right, everything else to the left
                let (left_min, right_min) = if prec == Precedence::Power {
                    (Precedence::Atom, Precedence::Factor)
                } else {
                    (prec, prec.next())
                };
                emit(ctx, left, left_min)?;
                ctx.push(format!(" {op} "));
                emit(ctx, right, right_min)?;
            }
            Expr::BoolOp { op, values } => {
                if values.len() < 2 {
                    return Err(FormatError::structure(
                        "BoolOp",
                        format!("`{op}` needs at least two operands, found {}", values.len()),
                    ));
                }
                let operand = Precedence::of_boolop(*op).next();
                delimited(ctx, values, &format!(" {op} "), |ctx, value| {
                    emit(ctx, value, operand)
                })?;
            }
            Expr::Compare {
                left,
                ops,
                comparators,
            } => {
                if ops.is_empty() || ops.len() != comparators.len() {
                    return Err(FormatError::structure(
                        "Compare",
                        format!(
                            "{} operators for {} comparators",
                            ops.len(),
                            comparators.len()
                        ),
                    ));
                }
                emit(ctx, left, Precedence::BitOr)?;
                for (op, comparator) in ops.iter().zip(comparators) {
                    ctx.push(format!(" {op} "));
                    emit(ctx, comparator, Precedence::BitOr)?;
                }
            }
            Expr::IfExp { test, body, orelse } => {
                emit(ctx, body, Precedence::Or)?;
                ctx.push(" if ");
                emit(ctx, test, Precedence::Or)?;
                ctx.push(" else ");
                emit(ctx, orelse, Precedence::IfExp)?;
            }
            Expr::Lambda { args, body } => {
                ctx.push("lambda");
                if !args.is_empty() {
                    ctx.push(" ");
                    emit_arguments(ctx, args)?;
                }
                ctx.push(": ");
                emit(ctx, body, Precedence::Lambda)?;
            }
            Expr::Tuple { elts, ctx: tuple_ctx } => match (tuple_ctx, elts.as_slice()) {
                (ExprContext::Store, [single]) => {
                    emit(ctx, single, Precedence::Lambda)?;
                    ctx.push(",");
                }
                (ExprContext::Store, [_, ..]) => elements(ctx, elts)?,
                (_, [single]) => {
                    ctx.push("(");
                    emit(ctx, single, Precedence::Lambda)?;
                    ctx.push(",)");
                }
                _ => {
                    ctx.push("(");
                    elements(ctx, elts)?;
                    ctx.push(")");
                }
            },
            Expr::List { elts } => {
                ctx.push("[");
                elements(ctx, elts)?;
                ctx.push("]");
            }
            Expr::Set { elts } => {
                if elts.is_empty() {
                    return Err(FormatError::structure(
                        "Set",
                        "a set display needs at least one element",
                    ));
                }
                ctx.push("{");
                elements(ctx, elts)?;
                ctx.push("}");
            }
            Expr::Dict { keys, values } => {
                if keys.len() != values.len() {
                    return Err(FormatError::structure(
                        "Dict",
                        format!("{} keys for {} values", keys.len(), values.len()),
                    ));
                }
                ctx.push("{");
                delimited(ctx, keys.iter().zip(values), ", ", |ctx, (key, value)| {
                    match key {
                        Some(key) => {
                            emit(ctx, key, Precedence::IfExp)?;
                            ctx.push(": ");
                            emit(ctx, value, Precedence::Lambda)
                        }
                        None => {
                            ctx.push("**");
                            emit(ctx, value, Precedence::BitOr)
                        }
                    }
                })?;
                ctx.push("}");
            }
            Expr::ListComp { elt, generators: gens } => {
                ctx.push("[");
                emit(ctx, elt, Precedence::IfExp)?;
                generators(ctx, "ListComp", gens)?;
                ctx.push("]");
            }
            Expr::SetComp { elt, generators: gens } => {
                ctx.push("{");
                emit(ctx, elt, Precedence::IfExp)?;
                generators(ctx, "SetComp", gens)?;
                ctx.push("}");
            }
            Expr::GeneratorExp { elt, generators: gens } => {
                ctx.push("(");
                emit(ctx, elt, Precedence::IfExp)?;
                generators(ctx, "GeneratorExp", gens)?;
                ctx.push(")");
            }
            Expr::DictComp {
                key,
                value,
                generators: gens,
            } => {
                ctx.push("{");
                emit(ctx, key, Precedence::IfExp)?;
                ctx.push(": ");
                emit(ctx, value, Precedence::IfExp)?;
                generators(ctx, "DictComp", gens)?;
                ctx.push("}");
            }
            Expr::Constant { value } => constant(ctx, value),
            Expr::Unsupported { kind } => unsupported(ctx, kind),
        }
        Ok(())
    }
}
