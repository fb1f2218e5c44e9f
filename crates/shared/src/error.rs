use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error body returned by the prediction service on non-2xx responses.
///
/// `detail` is usually a string, but request validation failures carry a
/// list of issues instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(default)]
    pub loc: Vec<Value>,
    pub msg: String,
}

impl ValidationIssue {
    /// Last path segment of `loc`, which names the offending field.
    pub fn field(&self) -> Option<String> {
        match self.loc.last()? {
            Value::String(name) => Some(name.clone()),
            Value::Number(index) => Some(index.to_string()),
            _ => None,
        }
    }
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(Value::String(detail.into())),
        }
    }

    /// Human readable detail, if the body carries a usable one.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Array(items) => {
                let issues: Vec<String> = items
                    .iter()
                    .filter_map(|item| serde_json::from_value::<ValidationIssue>(item.clone()).ok())
                    .map(|issue| match issue.field() {
                        Some(field) => format!("{field}: {}", issue.msg),
                        None => issue.msg,
                    })
                    .collect();
                (!issues.is_empty()).then(|| issues.join("; "))
            }
            _ => None,
        }
    }
}
