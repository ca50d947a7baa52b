//! Top-level pass: lays out module statements and the comments between them.

use prettypy_lang::ast::{Located, Module};
use prettypy_lang::comment::{Comment, find_unsorted};

use crate::error::FormatError;
use crate::layout::{self, Item};
use crate::print::{self, IfContext, PrintContext};
use crate::{Config, TrailingComments};

fn separate(ctx: &mut PrintContext, prev: Option<Item>, next: Item) {
    if let Some(prev) = prev {
        let blank = layout::blank_lines(&prev, &next);
        ctx.push("\n".repeat(blank + 1));
    }
}

/// A comment goes on its own line, directly below whatever was emitted before it.
fn emit_comment(ctx: &mut PrintContext, comment: &Comment) {
    if !ctx.buffer.is_empty() {
        ctx.push("\n");
    }
    ctx.push(format!("{}{}", " ".repeat(comment.column), comment.text));
}

/// Formats a module and re-inserts `comments` at their source lines.
///
/// Every comment is placed before the first statement that starts on or after
/// its line. A comment counts as the previous item for the blank-line policy,
/// so the blank lines of a statement come between its comments and itself.
pub fn pretty(
    module: &Module,
    comments: &[Comment],
    config: &Config,
) -> Result<String, FormatError> {
    if let Some((line, previous)) = find_unsorted(comments) {
        return Err(FormatError::UnsortedComments { line, previous });
    }
    let mut ctx = PrintContext::new(config);
    let mut pending = comments.iter().peekable();
    let mut prev = None;
    for Located { node, line } in module.body.iter() {
        while let Some(comment) = pending.next_if(|c| c.line <= *line) {
            emit_comment(&mut ctx, comment);
            prev = Some(Item::Comment);
        }
        let next = Item::Stmt(node);
        separate(&mut ctx, prev, next);
        print::emit_stmt(&mut ctx, node, 0, IfContext::Fresh)?;
        prev = Some(next);
    }

    let trailing = pending.collect::<Vec<_>>();
    if !trailing.is_empty() {
        match config.trailing_comments {
            TrailingComments::Flush => {
                for comment in trailing {
                    emit_comment(&mut ctx, comment);
                }
            }
            TrailingComments::Drop => {
                log::debug!(
                    "dropping {} comments after the last statement",
                    trailing.len()
                );
            }
        }
    }

    if !ctx.buffer.is_empty() {
        ctx.push("\n");
    }
    log::debug!(
        "formatted {} statements into {} chunks",
        module.body.len(),
        ctx.buffer.len()
    );
    Ok(ctx.finish())
}

#[cfg(test)]
mod tests {
    use prettypy_lang::ast::{Alias, Arguments, Stmt};
    use prettypy_lang::{assign, expr_stmt, call, import, int, located, name, ret};

    use super::*;

    fn format(body: Vec<Located<Stmt>>, comments: &[Comment]) -> String {
        pretty(&Module { body }, comments, &Config::default()).expect("formatting failed")
    }

    fn def(name: &str, line: usize) -> Located<Stmt> {
        located!(
            Stmt::FunctionDef {
                name: name.into(),
                args: Arguments::default(),
                body: vec![Stmt::Pass],
                decorators: vec![],
            },
            line
        )
    }

    #[test]
    fn empty_module() {
        assert_eq!(format(vec![], &[]), "");
    }

    #[test]
    fn single_statement_ends_with_newline() {
        let res = format(vec![located!(assign!(name!("x"), int!(1)), 1)], &[]);
        assert_eq!(res, "x = 1\n");
    }

    #[test]
    fn import_then_function() {
        let def = Stmt::FunctionDef {
            name: "f".into(),
            args: Arguments {
                args: vec!["x".into(), "y".into()],
                defaults: vec![int!(1)],
                ..Default::default()
            },
            body: vec![ret!(name!("x"))],
            decorators: vec![],
        };
        let res = format(vec![located!(import!("os"), 1), located!(def, 4)], &[]);
        assert_eq!(res, "import os\n\n\ndef f(x, y=1):\n    return x\n");
    }

    #[test]
    fn blank_lines_between_statements() {
        let body = vec![
            located!(import!("os"), 1),
            located!(import!("sys"), 2),
            located!(assign!(name!("a"), int!(1)), 4),
            located!(assign!(name!("b"), int!(2)), 5),
            located!(expr_stmt!(call!(name!("run"))), 6),
            def("main", 8),
            def("helper", 11),
            located!(expr_stmt!(call!(name!("main"))), 14),
        ];
        let expected = "import os\nimport sys\n\n\na = 1\nb = 2\n\nrun()\n\n\ndef main():\n    pass\n\n\ndef helper():\n    pass\n\n\nmain()\n";
        assert_eq!(format(body, &[]), expected);
    }

    #[test]
    fn comment_between_statements() {
        let body = vec![
            located!(assign!(name!("a"), int!(1)), 5),
            located!(assign!(name!("b"), int!(2)), 10),
        ];
        let comments = [Comment::new("# between", 7, 0)];
        assert_eq!(format(body, &comments), "a = 1\n# between\n\nb = 2\n");
    }

    #[test]
    fn comments_keep_their_column() {
        let body = vec![located!(Stmt::Pass, 3)];
        let comments = [Comment::new("# top", 1, 0), Comment::new("# inner", 2, 4)];
        assert_eq!(format(body, &comments), "# top\n    # inner\n\npass\n");
    }

    #[test]
    fn blank_lines_go_below_comments() {
        let body = vec![located!(import!("os"), 1), def("f", 3)];
        let comments = [Comment::new("# the function", 2, 0)];
        assert_eq!(
            format(body, &comments),
            "import os\n# the function\n\n\ndef f():\n    pass\n"
        );
    }

    #[test]
    fn comment_resets_the_previous_kind() {
        // after a comment, two imports are no longer the same kind in a row
        let body = vec![located!(import!("os"), 1), located!(import!("sys"), 3)];
        let comments = [Comment::new("# more", 2, 0)];
        assert_eq!(
            format(body, &comments),
            "import os\n# more\n\nimport sys\n"
        );
    }

    #[test]
    fn comment_on_the_statement_line_comes_first() {
        let body = vec![located!(assign!(name!("x"), int!(1)), 2)];
        let comments = [Comment::new("# same line", 2, 6)];
        assert_eq!(format(body, &comments), "      # same line\n\nx = 1\n");
    }

    #[test]
    fn trailing_comments_are_flushed() {
        let body = vec![located!(assign!(name!("x"), int!(1)), 1)];
        let comments = [Comment::new("# end", 3, 0), Comment::new("# really", 4, 0)];
        assert_eq!(format(body, &comments), "x = 1\n# end\n# really\n");
    }

    #[test]
    fn trailing_comments_after_definition() {
        let comments = [Comment::new("# end", 9, 0)];
        assert_eq!(
            format(vec![def("f", 1)], &comments),
            "def f():\n    pass\n# end\n"
        );
    }

    #[test]
    fn trailing_comments_can_be_dropped() {
        let config = Config {
            trailing_comments: TrailingComments::Drop,
            ..Default::default()
        };
        let module = Module {
            body: vec![located!(Stmt::Pass, 1)],
        };
        let comments = [Comment::new("# end", 3, 0)];
        assert_eq!(pretty(&module, &comments, &config).unwrap(), "pass\n");
    }

    #[test]
    fn comments_only() {
        let comments = [Comment::new("# a", 1, 0), Comment::new("# b", 2, 0)];
        assert_eq!(format(vec![], &comments), "# a\n# b\n");
    }

    #[test]
    fn unsorted_comments_are_rejected() {
        let comments = [Comment::new("# late", 9, 0), Comment::new("# early", 2, 0)];
        let res = pretty(&Module::default(), &comments, &Config::default());
        assert_eq!(
            res,
            Err(FormatError::UnsortedComments {
                line: 2,
                previous: 9
            })
        );
    }

    #[test]
    fn structural_errors_abort_the_pass() {
        let body = vec![
            located!(Stmt::Pass, 1),
            located!(Stmt::Import { names: vec![] }, 2),
        ];
        let res = pretty(&Module { body }, &[], &Config::default());
        assert!(matches!(
            res,
            Err(FormatError::Structure { kind: "Import", .. })
        ));
    }

    #[test]
    fn unsupported_statement_keeps_the_pass_going() {
        let body = vec![
            located!(Stmt::Unsupported { kind: "Try".into() }, 1),
            located!(
                Stmt::ImportFrom {
                    module: Some("os".into()),
                    names: vec![Alias {
                        name: "path".into(),
                        asname: None
                    }],
                    level: 0
                },
                5
            ),
        ];
        assert_eq!(format(body, &[]), "<Try>\n\nfrom os import path\n");
    }

    #[test]
    fn formatting_is_deterministic() {
        let body = vec![located!(import!("os"), 1), def("f", 3)];
        let comments = [Comment::new("# c", 2, 0)];
        assert_eq!(format(body.clone(), &comments), format(body, &comments));
    }
}
