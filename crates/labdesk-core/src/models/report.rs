//! Report models.

use serde::{Deserialize, Serialize};

/// Report lifecycle: created `Pending` when ordered, `Completed` once results are in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    #[default]
    Pending,
    Completed,
    #[serde(untagged)]
    Unrecognized(String),
}

impl ReportStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Unrecognized(status) => status,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn parse_lenient(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| Self::Unrecognized(s.to_string()))
    }
}

/// One measured parameter within a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResultEntry {
    pub parameter: String,
    /// Raw text as entered ("14.2", "Negative", "160 mg/dL")
    pub value: String,
    /// Textual range ("13.5-17.5", "<150", ">40")
    pub reference_range: String,
    pub unit: String,
}

impl ResultEntry {
    pub fn new(
        parameter: impl Into<String>,
        value: impl Into<String>,
        reference_range: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            parameter: parameter.into(),
            value: value.into(),
            reference_range: reference_range.into(),
            unit: unit.into(),
        }
    }

    /// Whether the value falls outside its reference range.
    pub fn is_abnormal(&self) -> bool {
        crate::derived::is_abnormal(&self.reference_range, &self.value)
    }
}

/// One ordered test for one patient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Report {
    /// `r` + creation millis
    pub id: String,
    pub test_id: String,
    pub patient_id: String,
    pub date: String,
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<ResultEntry>>,
}

/// Report data without the store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub test_id: String,
    pub patient_id: String,
    pub date: String,
    pub status: ReportStatus,
    pub results: Option<Vec<ResultEntry>>,
}

impl NewReport {
    /// A pending report dated today.
    pub fn pending(patient_id: impl Into<String>, test_id: impl Into<String>) -> Self {
        Self {
            test_id: test_id.into(),
            patient_id: patient_id.into(),
            date: super::today(),
            status: ReportStatus::Pending,
            results: None,
        }
    }

    pub(crate) fn into_report(self, id: String) -> Report {
        Report {
            id,
            test_id: self.test_id,
            patient_id: self.patient_id,
            date: self.date,
            status: self.status,
            results: self.results,
        }
    }
}

impl Report {
    pub fn is_completed(&self) -> bool {
        self.status == ReportStatus::Completed
    }

    /// Result rows flagged outside their reference range.
    pub fn abnormal_results(&self) -> Vec<&ResultEntry> {
        self.results
            .iter()
            .flatten()
            .filter(|entry| entry.is_abnormal())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_report_has_no_results_on_wire() {
        let report = NewReport::pending("p1", "t1").into_report("r1".into());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["testId"], "t1");
        assert!(json.get("results").is_none());
    }

    #[test]
    fn test_abnormal_results() {
        let mut report = NewReport::pending("p1", "t1").into_report("r1".into());
        report.status = ReportStatus::Completed;
        report.results = Some(vec![
            ResultEntry::new("Hemoglobin", "20", "13.5-17.5", "g/dL"),
            ResultEntry::new("WBC", "7000", "4000-11000", "/cumm"),
            ResultEntry::new("Triglycerides", "160", "<150", "mg/dL"),
        ]);

        let abnormal: Vec<&str> = report
            .abnormal_results()
            .iter()
            .map(|e| e.parameter.as_str())
            .collect();
        assert_eq!(abnormal, vec!["Hemoglobin", "Triglycerides"]);
        assert!(report.is_completed());
    }
}
