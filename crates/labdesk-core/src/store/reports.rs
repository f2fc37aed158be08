//! Report mutations and result entry.

use tracing::info;

use super::{IdPrefix, LabStore, StoreError, StoreResult};
use crate::models::{NewReport, Report, ReportStatus, ResultEntry};

impl LabStore {
    /// Append a report. Patient and test ids are not checked.
    pub fn add_report(&mut self, new: NewReport) -> StoreResult<Report> {
        let report = self.commit("add_report", |doc, ids| {
            let report = new.into_report(ids.next(IdPrefix::Report));
            doc.reports.push(report.clone());
            Ok(report)
        })?;

        info!(report_id = %report.id, patient_id = %report.patient_id, "Report added");
        Ok(report)
    }

    /// Replace the report with the same id; `false` if none exists.
    pub fn update_report(&mut self, report: Report) -> StoreResult<bool> {
        if self.document.report(&report.id).is_none() {
            return Ok(false);
        }

        let id = report.id.clone();
        self.commit("update_report", |doc, _| {
            if let Some(slot) = doc.reports.iter_mut().find(|r| r.id == report.id) {
                *slot = report;
            }
            Ok(())
        })?;

        info!(report_id = %id, "Report updated");
        Ok(true)
    }

    /// Remove a report. Not guarded.
    pub fn delete_report(&mut self, id: &str) -> StoreResult<bool> {
        let removed = self.commit("delete_report", |doc, _| {
            let before = doc.reports.len();
            doc.reports.retain(|r| r.id != id);
            Ok(doc.reports.len() < before)
        })?;

        if removed {
            info!(report_id = id, "Report deleted");
        }
        Ok(removed)
    }

    /// Record results and mark the report `Completed`.
    ///
    /// Entering results on an already completed report replaces them; the
    /// report stays `Completed`.
    pub fn enter_results(&mut self, report_id: &str, results: Vec<ResultEntry>) -> StoreResult<Report> {
        let report = self.commit("enter_results", |doc, _| {
            if results.is_empty() {
                return Err(StoreError::Validation(
                    "At least one result is required to complete a report".into(),
                ));
            }
            let report = doc
                .reports
                .iter_mut()
                .find(|r| r.id == report_id)
                .ok_or_else(|| StoreError::NotFound(format!("report {}", report_id)))?;

            report.results = Some(results);
            report.status = ReportStatus::Completed;
            Ok(report.clone())
        })?;

        info!(
            report_id = %report.id,
            abnormal = report.abnormal_results().len(),
            "Report results entered"
        );
        Ok(report)
    }
}
