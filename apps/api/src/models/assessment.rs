use serde::{Deserialize, Serialize};

/// Placeholder value for fields with no catalog source.
pub const UNKNOWN: &str = "Unknown";

/// One recommended assessment as returned by `POST /recommend`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub name: String,
    pub url: String,
    pub adaptive_support: String,
    pub description: String,
    pub duration: String,
    pub remote_support: String,
    pub test_type: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommended_assessments: Vec<Assessment>,
}
