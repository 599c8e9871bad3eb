//! Recommendation Assembler: reconciles model-proposed exam names against the catalog.
//!
//! 1. Groups candidates by their exact exam-name tuple; repeated tuples concatenate their
//!    durations in encounter order.
//! 2. The i-th name of a group takes the i-th flattened duration, or "Unknown".
//! 3. Names found in the catalog (case-insensitive exact match) take catalog fields,
//!    including the catalog description rather than the model's exam name;
//!    unknown names become placeholder assessments described by their exam name.
//!
//! Output order: first-encounter order of groups, then name order within a group.

use std::collections::HashMap;

use crate::catalog::record::CatalogRecord;
use crate::catalog::store::Catalog;
use crate::models::assessment::{Assessment, UNKNOWN};
use crate::recommendation::generator::RecommendationCandidate;

/// Candidates sharing one exam-name tuple, with their durations flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateGroup {
    pub exam_names: Vec<String>,
    pub durations: Vec<String>,
}

pub fn group_candidates(candidates: Vec<RecommendationCandidate>) -> Vec<CandidateGroup> {
    let mut groups: Vec<CandidateGroup> = Vec::new();
    let mut position: HashMap<Vec<String>, usize> = HashMap::new();

    for candidate in candidates {
        match position.get(&candidate.exam_names) {
            Some(&i) => groups[i].durations.extend(candidate.durations),
            None => {
                position.insert(candidate.exam_names.clone(), groups.len());
                groups.push(CandidateGroup {
                    exam_names: candidate.exam_names,
                    durations: candidate.durations,
                });
            }
        }
    }

    groups
}

/// Builds the final ordered assessment list. Deterministic for a given input.
pub fn assemble(
    candidates: Vec<RecommendationCandidate>,
    catalog: &Catalog,
    catalog_base_url: &str,
) -> Vec<Assessment> {
    group_candidates(candidates)
        .into_iter()
        .flat_map(|group| {
            let CandidateGroup {
                exam_names,
                durations,
            } = group;
            exam_names
                .into_iter()
                .enumerate()
                .map(|(i, exam)| {
                    let duration = durations
                        .get(i)
                        .cloned()
                        .unwrap_or_else(|| UNKNOWN.to_string());
                    match catalog.find_by_name(&exam) {
                        Some(record) => from_record(record, duration),
                        None => placeholder(exam, duration, catalog_base_url),
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

fn from_record(record: &CatalogRecord, duration: String) -> Assessment {
    Assessment {
        name: record.name.clone(),
        url: record.url.clone(),
        adaptive_support: record.adaptive_support.clone(),
        description: record.description.clone(),
        duration,
        remote_support: record.remote_support.clone(),
        test_type: record.test_types(),
    }
}

fn placeholder(exam: String, duration: String, catalog_base_url: &str) -> Assessment {
    Assessment {
        description: exam.clone(),
        name: exam,
        url: catalog_base_url.to_string(),
        adaptive_support: UNKNOWN.to_string(),
        duration,
        remote_support: UNKNOWN.to_string(),
        test_type: vec![UNKNOWN.to_string()],
    }
}
