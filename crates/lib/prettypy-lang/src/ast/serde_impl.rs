// Manual Serialize/Deserialize for Stmt and Expr.
// The derived impls (generated with `remote = "Self"`) only know the closed set of kinds.
// A node tagged with any other kind is loaded as `Unsupported` so that the printer can
// emit a placeholder for it instead of rejecting the whole file.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{EXPR_KINDS, Expr, STMT_KINDS, Stmt};

fn read_kind<E: de::Error>(value: &Value) -> Result<String, E> {
    match value.get("kind") {
        Some(Value::String(kind)) => Ok(kind.clone()),
        Some(other) => Err(E::custom(format!("node kind must be a string, found {other}"))),
        None => Err(E::missing_field("kind")),
    }
}

fn serialize_unsupported<S: Serializer>(kind: &str, serializer: S) -> Result<S::Ok, S::Error> {
    let mut st = serializer.serialize_struct("Unsupported", 1)?;
    st.serialize_field("kind", kind)?;
    st.end()
}

impl Serialize for Stmt {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Stmt::Unsupported { kind } => serialize_unsupported(kind, serializer),
            _ => Stmt::serialize(self, serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Stmt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = read_kind::<D::Error>(&value)?;
        if STMT_KINDS.contains(&kind.as_str()) {
            Stmt::deserialize(value).map_err(de::Error::custom)
        } else {
            log::trace!("loading statement of unknown kind `{kind}` as unsupported");
            Ok(Stmt::Unsupported { kind })
        }
    }
}

impl Serialize for Expr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Expr::Unsupported { kind } => serialize_unsupported(kind, serializer),
            _ => Expr::serialize(self, serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Expr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = read_kind::<D::Error>(&value)?;
        if EXPR_KINDS.contains(&kind.as_str()) {
            Expr::deserialize(value).map_err(de::Error::custom)
        } else {
            log::trace!("loading expression of unknown kind `{kind}` as unsupported");
            Ok(Expr::Unsupported { kind })
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ast::{Constant, ExprContext};

    #[test]
    fn known_statement() {
        let stmt: Stmt = serde_json::from_value(json!({
            "kind": "Return",
            "value": {"kind": "Name", "id": "x"}
        }))
        .unwrap();
        assert_eq!(
            stmt,
            Stmt::Return {
                value: Some(Expr::Name { id: "x".into() })
            }
        );
    }

    #[test]
    fn unknown_kinds_become_unsupported() {
        let stmt: Stmt = serde_json::from_value(json!({"kind": "Try", "body": []})).unwrap();
        assert_eq!(
            stmt,
            Stmt::Unsupported {
                kind: "Try".into()
            }
        );
        let expr: Expr = serde_json::from_value(json!({"kind": "Yield"})).unwrap();
        assert_eq!(
            expr,
            Expr::Unsupported {
                kind: "Yield".into()
            }
        );
    }

    #[test]
    fn nested_unknown_kind() {
        let stmt: Stmt = serde_json::from_value(json!({
            "kind": "Expr",
            "value": {"kind": "Await", "value": {"kind": "Name", "id": "x"}}
        }))
        .unwrap();
        assert_eq!(
            stmt,
            Stmt::Expr {
                value: Expr::Unsupported {
                    kind: "Await".into()
                }
            }
        );
    }

    #[test]
    fn malformed_known_kind_is_an_error() {
        let res = serde_json::from_value::<Stmt>(json!({"kind": "Assign", "targets": []}));
        assert!(res.is_err());
        let res = serde_json::from_value::<Expr>(json!({"id": "x"}));
        assert!(res.unwrap_err().to_string().contains("kind"));
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let expr: Expr = serde_json::from_value(json!({"kind": "Tuple"})).unwrap();
        assert_eq!(
            expr,
            Expr::Tuple {
                elts: vec![],
                ctx: ExprContext::Load
            }
        );
    }

    #[test]
    fn serialize_keeps_the_tag() {
        let expr = Expr::Constant {
            value: Constant::Int(3),
        };
        assert_eq!(
            serde_json::to_value(&expr).unwrap(),
            json!({"kind": "Constant", "value": {"Int": 3}})
        );
        let unsupported = Stmt::Unsupported {
            kind: "Try".into(),
        };
        assert_eq!(
            serde_json::to_value(&unsupported).unwrap(),
            json!({"kind": "Try"})
        );
    }
}
