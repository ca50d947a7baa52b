// Fixtures are pairs of a syntax tree document and its expected rendering.
// To regenerate an expected file run
// cargo run -- tests/fixtures/mixed.json --output tests/fixtures/mixed.py
mod main {
    use prettypy_fmt::{Config, TrailingComments, pretty_print};
    use prettypy_lang::document::Document;

    fn load(src: &str) -> Document {
        Document::from_json(src).expect("failed to load document")
    }

    fn check(src: &str, ans: &str, config: &Config) {
        let ans = ans.replace("\r\n", "\n");
        let doc = load(src);
        let res = pretty_print(&doc, config).expect("failed to pretty print");
        assert_eq!(res, ans); // format success
        let res2 = pretty_print(&doc, config).expect("failed to pretty print");
        assert_eq!(res, res2); // same tree, same text
        let reloaded = load(&doc.to_json().expect("failed to serialize"));
        let res3 = pretty_print(&reloaded, config).expect("failed to pretty print");
        assert_eq!(res, res3) // serialized tree prints identically
    }

    #[test]
    fn basic() {
        check(
            include_str!("fixtures/basic.json"),
            include_str!("fixtures/basic.py"),
            &Config::default(),
        );
    }

    #[test]
    fn mixed() {
        check(
            include_str!("fixtures/mixed.json"),
            include_str!("fixtures/mixed.py"),
            &Config::default(),
        );
    }

    #[test]
    fn mixed_indent2_without_trailing_comments() {
        let config = Config {
            indent_size: 2,
            trailing_comments: TrailingComments::Drop,
        };
        check(
            include_str!("fixtures/mixed.json"),
            include_str!("fixtures/mixed_indent2.py"),
            &config,
        );
    }

    #[test]
    fn malformed_document_is_rejected() {
        let src = r#"{"body": [{"line": 1, "node": {"kind": "If", "test": {"kind": "Name", "id": "x"}, "body": []}}]}"#;
        let res = pretty_print(&load(src), &Config::default());
        assert_eq!(
            res.unwrap_err().to_string(),
            "malformed If node: block body is empty"
        );
    }
}
