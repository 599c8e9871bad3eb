use crate::catalog::index::{documents_sha256, EmbeddingsFile};
use crate::catalog::store::Catalog;
use crate::test_utils::fakes::KeywordEmbedder;

pub const CATALOG_BASE_URL: &str = "https://www.shl.com/solutions/products/product-catalog/";

/// Four-row catalog in the production CSV layout. Ends with a newline so rows can be appended.
pub const CATALOG_CSV: &str = "\
Assessment Name,Description,Job Levels,Test Type,Remote Testing Support,Adaptive/IRT Support,Languages,Assessment Length,URL
Java Platform Enterprise Edition 7 (Java EE 7),Multi-choice test that measures knowledge of Java EE 7 for developer roles.,\"Mid-Professional, Professional Individual Contributor\",Knowledge & Skills,Yes,No,English (USA),30 minutes,https://www.shl.com/solutions/products/product-catalog/view/java-platform-enterprise-edition-7-java-ee-7/
Core Java (Entry Level) (New),Measures knowledge of basic Java programming.,\"Entry-Level, Graduate\",Knowledge & Skills,Yes,No,English (USA),13 minutes,https://www.shl.com/solutions/products/product-catalog/view/core-java-entry-level-new/
Verify - Numerical Ability,Measures the ability to make correct decisions from numerical data.,\"Graduate, Manager, Professional Individual Contributor\",Ability & Aptitude,Yes,Yes,\"English (USA), French\",18 minutes,https://www.shl.com/solutions/products/product-catalog/view/verify-numerical-ability/
Occupational Personality Questionnaire OPQ32r,Describes personality and preferred behavioural style at work.,\"Manager, Director, Executive\",Personality & Behavior,Yes,No,English (International),25 minutes,https://www.shl.com/solutions/products/product-catalog/view/occupational-personality-questionnaire-opq32r/
";

pub fn sample_catalog() -> Catalog {
    Catalog::from_reader(CATALOG_CSV.as_bytes(), "fixture").unwrap()
}

/// One-hot rows: each document is nearest to its own vector and equidistant from the rest.
pub fn sample_embeddings(catalog: &Catalog) -> EmbeddingsFile {
    let n = catalog.len();
    let vectors = (0..n)
        .map(|row| {
            let mut v = vec![0.0; n];
            v[row] = 1.0;
            v
        })
        .collect();
    EmbeddingsFile {
        model: Some("fixture".to_string()),
        catalog_sha256: Some(documents_sha256(&catalog.documents())),
        dimension: n,
        vectors,
    }
}

/// Embeddings from `KeywordEmbedder`, so fake query vectors rank documents by shared keywords.
pub fn keyword_embeddings(catalog: &Catalog) -> EmbeddingsFile {
    let documents = catalog.documents();
    EmbeddingsFile {
        model: Some("keyword".to_string()),
        catalog_sha256: Some(documents_sha256(&documents)),
        dimension: KeywordEmbedder::DIMENSION,
        vectors: documents.iter().map(|d| KeywordEmbedder::vector(d)).collect(),
    }
}
