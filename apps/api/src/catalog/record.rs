use serde::{Deserialize, Serialize};

const NAME_LABEL: &str = "Assessment Name: ";

/// One row of the assessment catalog CSV.
/// Field names follow the CSV headers; empty cells load as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    #[serde(rename = "Assessment Name")]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Job Levels", default)]
    pub job_levels: String,
    #[serde(rename = "Test Type", default)]
    pub test_type: String,
    #[serde(rename = "Remote Testing Support", default)]
    pub remote_support: String,
    #[serde(rename = "Adaptive/IRT Support", default)]
    pub adaptive_support: String,
    #[serde(rename = "Languages", default)]
    pub languages: String,
    #[serde(rename = "Assessment Length", default)]
    pub duration: String,
    #[serde(rename = "URL", default)]
    pub url: String,
}

impl CatalogRecord {
    /// Renders the record as the document text that was embedded for it.
    /// The embedding file rows are aligned with these documents, so the layout must stay stable.
    pub fn render_document(&self) -> String {
        format!(
            "Assessment Name: {}\n\
             Description: {}\n\
             Job Levels: {}\n\
             Test Type: {}\n\
             Remote Support: {}\n\
             Adaptive Support: {}\n\
             Languages: {}\n\
             Duration: {}",
            self.name,
            self.description,
            self.job_levels,
            self.test_type,
            self.remote_support,
            self.adaptive_support,
            self.languages,
            self.duration,
        )
    }

    /// Test types as a list. An empty catalog cell yields an empty list.
    pub fn test_types(&self) -> Vec<String> {
        let test_type = self.test_type.trim();
        if test_type.is_empty() {
            Vec::new()
        } else {
            vec![test_type.to_string()]
        }
    }
}

/// Reads the assessment name back out of a rendered document.
pub fn name_from_document(document: &str) -> Option<&str> {
    document
        .lines()
        .find_map(|line| line.strip_prefix(NAME_LABEL))
        .map(str::trim)
}
