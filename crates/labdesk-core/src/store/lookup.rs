//! Read-side queries: search, categories, per-patient history.

use std::collections::BTreeSet;

use strsim::jaro_winkler;

use super::LabStore;
use crate::models::{Invoice, LabTest, Patient, Report, ReportStatus};

/// Minimum Jaro-Winkler similarity for a fuzzy (non-substring) match.
const MIN_FUZZY_SCORE: f64 = 0.85;

/// Score `query` against a set of fields: 1.0 for a substring hit, otherwise
/// the best word-level Jaro-Winkler similarity.
fn match_score(query: &str, fields: &[&str]) -> f64 {
    let mut best: f64 = 0.0;
    for field in fields {
        let field = field.to_lowercase();
        if field.contains(query) {
            return 1.0;
        }
        best = best.max(jaro_winkler(query, &field));
        for word in field.split_whitespace() {
            best = best.max(jaro_winkler(query, word));
        }
    }
    best
}

/// Rank items by score, best first; ties keep insertion order.
fn rank<'a, T>(items: &'a [T], query: &str, limit: usize, fields: impl Fn(&T) -> Vec<&str>) -> Vec<&'a T> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.iter().take(limit).collect();
    }

    let mut scored: Vec<(f64, &T)> = items
        .iter()
        .map(|item| (match_score(&query, &fields(item)), item))
        .filter(|(score, _)| *score >= MIN_FUZZY_SCORE)
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().take(limit).map(|(_, item)| item).collect()
}

impl LabStore {
    pub fn patients(&self) -> &[Patient] {
        &self.document.patients
    }

    pub fn tests(&self) -> &[LabTest] {
        &self.document.tests
    }

    pub fn reports(&self) -> &[Report] {
        &self.document.reports
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.document.invoices
    }

    /// Search patients by name, mobile number or slip number, tolerating typos in names.
    pub fn search_patients(&self, query: &str, limit: usize) -> Vec<&Patient> {
        rank(&self.document.patients, query, limit, |p| {
            vec![p.full_name.as_str(), p.mobile.as_str(), p.slip_no.as_str()]
        })
    }

    /// Search the catalog by test name or code.
    pub fn search_tests(&self, query: &str, limit: usize) -> Vec<&LabTest> {
        rank(&self.document.tests, query, limit, |t| {
            vec![t.name.as_str(), t.code.as_str()]
        })
    }

    /// Distinct, sorted categories currently used by the catalog.
    pub fn categories(&self) -> Vec<String> {
        self.document
            .tests
            .iter()
            .map(|t| t.category.trim())
            .filter(|c| !c.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn reports_for_patient(&self, patient_id: &str) -> Vec<&Report> {
        self.document
            .reports
            .iter()
            .filter(|r| r.patient_id == patient_id)
            .collect()
    }

    pub fn invoices_for_patient(&self, patient_id: &str) -> Vec<&Invoice> {
        self.document
            .invoices
            .iter()
            .filter(|i| i.patient_id == patient_id)
            .collect()
    }

    /// Reports still waiting for results, oldest first.
    pub fn pending_reports(&self) -> Vec<&Report> {
        self.document
            .reports
            .iter()
            .filter(|r| r.status == ReportStatus::Pending)
            .collect()
    }
}
