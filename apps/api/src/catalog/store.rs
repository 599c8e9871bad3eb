use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::warn;

use crate::catalog::record::CatalogRecord;
use crate::catalog::CatalogError;

/// The immutable assessment catalog.
/// Lookup is a case-insensitive exact match on the assessment name; the first row wins
/// when several rows share a name.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let origin = path.display().to_string();
        let file = File::open(path).map_err(|e| CatalogError::Csv {
            path: origin.clone(),
            source: e.into(),
        })?;
        Self::from_reader(file, &origin)
    }

    /// Parses a catalog from any CSV source. `origin` only labels errors.
    pub fn from_reader<R: Read>(input: R, origin: &str) -> Result<Self, CatalogError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input);
        let mut records = Vec::new();
        for row in reader.deserialize::<CatalogRecord>() {
            let record = row.map_err(|source| CatalogError::Csv {
                path: origin.to_string(),
                source,
            })?;
            if record.name.is_empty() {
                warn!("Skipping catalog row {} with an empty assessment name", records.len() + 1);
                continue;
            }
            records.push(record);
        }
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<CatalogRecord>) -> Result<Self, CatalogError> {
        if records.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_name = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            let key = normalize_name(&record.name);
            if by_name.contains_key(&key) {
                warn!("Duplicate catalog name '{}' at row {}; keeping the first", record.name, i + 1);
                continue;
            }
            by_name.insert(key, i);
        }

        Ok(Self { records, by_name })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Case-insensitive exact-name lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogRecord> {
        self.by_name
            .get(&normalize_name(name))
            .map(|&i| &self.records[i])
    }

    /// Renders every record as its embedded document, in row order.
    pub fn documents(&self) -> Vec<String> {
        self.records.iter().map(CatalogRecord::render_document).collect()
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
