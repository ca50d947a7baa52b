use prettypy_lang::ast::Line;
use thiserror::Error;

/// Reasons a formatting pass can fail. No partial output is produced in either case.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("malformed {kind} node: {reason}")]
    Structure { kind: &'static str, reason: String },
    #[error("comments are not sorted: comment on line {line} follows one on line {previous}")]
    UnsortedComments { line: Line, previous: Line },
}

impl FormatError {
    pub(crate) fn structure(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::Structure {
            kind,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = FormatError::structure("Set", "a set display needs at least one element");
        assert_eq!(
            e.to_string(),
            "malformed Set node: a set display needs at least one element"
        );
        let e = FormatError::UnsortedComments {
            line: 2,
            previous: 7,
        };
        assert!(e.to_string().contains("line 2"));
    }
}
