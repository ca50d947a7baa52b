use serde::{Deserialize, Serialize};

use crate::ast::Line;

/// A `#` comment lifted out of the source text by the parser.
///
/// `text` includes the leading `#`. `column` is the 0-based offset of the `#`
/// on its line and is reproduced as leading spaces when the comment is printed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub line: Line,
    #[serde(default)]
    pub column: usize,
}

impl Comment {
    pub fn new(text: impl Into<String>, line: Line, column: usize) -> Self {
        Self {
            text: text.into(),
            line,
            column,
        }
    }
}

/// Returns the first comment that starts on an earlier line than its predecessor,
/// together with that predecessor's line.
pub fn find_unsorted(comments: &[Comment]) -> Option<(Line, Line)> {
    comments
        .windows(2)
        .find(|w| w[1].line < w[0].line)
        .map(|w| (w[1].line, w[0].line))
}
