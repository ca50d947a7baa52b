//! The JSON interchange document handed over by the parser.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ast::Module;
use crate::comment::Comment;
use crate::utils::fileloader;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    File(#[from] fileloader::Error),
    #[error("invalid syntax tree document: {0}")]
    Json(#[from] serde_json::Error),
}

/// A parsed file: the statement tree plus its comments in source order.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(flatten)]
    pub module: Module,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Document {
    pub fn new(module: Module, comments: Vec<Comment>) -> Self {
        Self { module, comments }
    }

    pub fn from_json(src: &str) -> Result<Self, LoadError> {
        let doc: Document = serde_json::from_str(src)?;
        log::debug!(
            "loaded document with {} statements and {} comments",
            doc.module.body.len(),
            doc.comments.len()
        );
        Ok(doc)
    }

    pub fn to_json(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a document from `path`, or from stdin when `path` is `None`.
    pub fn load(path: Option<&str>) -> Result<Self, LoadError> {
        let src = match path {
            Some(p) => fileloader::load(p)?,
            None => fileloader::load_stdin()?,
        };
        Self::from_json(&src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Alias, Located, Stmt};

    const SRC: &str = r##"{
        "body": [
            {"line": 1, "node": {"kind": "Import", "names": [{"name": "os"}]}},
            {"line": 3, "node": {"kind": "Pass"}}
        ],
        "comments": [{"text": "# hello", "line": 2, "column": 0}]
    }"##;

    #[test]
    fn load_document() {
        let doc = Document::from_json(SRC).unwrap();
        assert_eq!(
            doc.module.body,
            vec![
                Located::new(
                    Stmt::Import {
                        names: vec![Alias {
                            name: "os".into(),
                            asname: None
                        }]
                    },
                    1
                ),
                Located::new(Stmt::Pass, 3),
            ]
        );
        assert_eq!(doc.comments, vec![Comment::new("# hello", 2, 0)]);
    }

    #[test]
    fn comments_are_optional() {
        let doc = Document::from_json(r#"{"body": []}"#).unwrap();
        assert_eq!(doc, Document::default());
    }

    #[test]
    fn reload_is_identical() {
        let doc = Document::from_json(SRC).unwrap();
        let again = Document::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(doc, again);
    }

    #[test]
    fn bad_json() {
        let err = Document::from_json(r#"{"body": [{"line": 1}]}"#).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }
}
