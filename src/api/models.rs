use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RemoteContact {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RemoteMessage {
    pub id: String,
    pub text: String,
    pub out: bool,
    /// Producers disagree on the representation; some omit it entirely.
    #[serde(default)]
    pub at: Option<WireTimestamp>,
}

/// Either an ISO-8601 style string or nanoseconds since the Unix epoch.
///
/// Numbers that do not fit an `i64` land in `Number`, and anything else in
/// `Other`, so a single odd timestamp never fails a whole page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum WireTimestamp {
    Text(String),
    Nanos(i64),
    Number(serde_json::Number),
    Other(serde_json::Value),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    pub contact_id: String,
    pub text: String,
}
