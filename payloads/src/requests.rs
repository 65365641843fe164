use serde::{Deserialize, Serialize};

/// Body of `POST /api/rag/search`.
///
/// A missing `query` is read as the empty string; the proxy forwards it
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RagSearch {
    #[serde(default)]
    pub query: String,
}
