use serde::Serialize;
use std::fmt;

/// Node identifier as supplied by the caller.
///
/// Text and integer ids never compare equal: `Text("1")` and `Int(1)` are distinct nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Text(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Text(s) => write!(f, "{s:?}"),
            NodeId::Int(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::Text(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId::Text(s)
    }
}

impl From<i64> for NodeId {
    fn from(v: i64) -> Self {
        NodeId::Int(v)
    }
}

impl From<i32> for NodeId {
    fn from(v: i32) -> Self {
        NodeId::Int(i64::from(v))
    }
}

#[cfg(test)]
mod tests {
    use super::NodeId;
    use serde_json::json;

    #[test]
    fn text_and_int_ids_are_distinct() {
        assert_ne!(NodeId::from("1"), NodeId::from(1));
        assert_eq!(NodeId::from("a"), NodeId::Text("a".to_string()));
    }

    #[test]
    fn serializes_as_bare_scalar() {
        assert_eq!(serde_json::to_value(NodeId::from("x")).unwrap(), json!("x"));
        assert_eq!(serde_json::to_value(NodeId::from(7)).unwrap(), json!(7));
    }

    #[test]
    fn display_quotes_text_ids() {
        assert_eq!(NodeId::from("1").to_string(), "\"1\"");
        assert_eq!(NodeId::from(1).to_string(), "1");
    }
}
