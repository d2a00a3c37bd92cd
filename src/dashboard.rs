//! Read-only records behind the clinical dashboard: patients, segmentation
//! metrics, the running job and the inference server.

use serde::{Serialize, Serializer};
use time::Date;
use time::macros::date;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DashboardError {
    #[error("patient not found")]
    PatientNotFound(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Completed,
    Processing,
    Queued,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InferenceResult {
    Success,
    Failed,
    Processing,
    Queued,
}

/// `YYYY-MM-DD`, as the dashboard tables display it.
#[must_use]
pub fn iso_day(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

fn serialize_date<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&iso_day(*date))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub age: u32,
    pub status: ProcessingStatus,
    /// Seconds; absent until inference has run.
    pub inference_time: Option<f64>,
    pub result: InferenceResult,
    #[serde(serialize_with = "serialize_date")]
    pub date: Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricValue {
    pub metric: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub patient_id: &'static str,
    pub progress: u8,
    pub stage: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    pub online: bool,
    pub version: &'static str,
    pub gpu: &'static str,
    pub model_version: &'static str,
}

const fn patient(
    id: &'static str,
    name: &'static str,
    age: u32,
    status: ProcessingStatus,
    inference_time: Option<f64>,
    result: InferenceResult,
    date: Date,
) -> PatientRecord {
    PatientRecord {
        id,
        name,
        age,
        status,
        inference_time,
        result,
        date,
    }
}

static PATIENTS: [PatientRecord; 6] = [
    patient(
        "Patient_001",
        "John Doe",
        65,
        ProcessingStatus::Completed,
        Some(4.2),
        InferenceResult::Success,
        date!(2026 - 02 - 28),
    ),
    patient(
        "Patient_002",
        "Jane Smith",
        72,
        ProcessingStatus::Completed,
        Some(3.8),
        InferenceResult::Success,
        date!(2026 - 02 - 28),
    ),
    patient(
        "Patient_003",
        "Robert Chen",
        58,
        ProcessingStatus::Processing,
        None,
        InferenceResult::Processing,
        date!(2026 - 03 - 01),
    ),
    patient(
        "Patient_004",
        "Maria Garcia",
        61,
        ProcessingStatus::Completed,
        Some(5.1),
        InferenceResult::Failed,
        date!(2026 - 02 - 27),
    ),
    patient(
        "Patient_005",
        "David Kim",
        55,
        ProcessingStatus::Completed,
        Some(3.5),
        InferenceResult::Success,
        date!(2026 - 02 - 27),
    ),
    patient(
        "Patient_006",
        "Sarah Wilson",
        68,
        ProcessingStatus::Queued,
        None,
        InferenceResult::Queued,
        date!(2026 - 03 - 01),
    ),
];

const fn triple(cl_dice: f64, dice: f64, iou: f64) -> [MetricValue; 3] {
    [
        MetricValue {
            metric: "clDice",
            value: cl_dice,
        },
        MetricValue {
            metric: "Dice Score",
            value: dice,
        },
        MetricValue {
            metric: "IoU",
            value: iou,
        },
    ]
}

static METRICS: [(&str, [MetricValue; 3]); 4] = [
    ("Patient_001", triple(0.92, 0.88, 0.81)),
    ("Patient_002", triple(0.89, 0.85, 0.78)),
    ("Patient_004", triple(0.45, 0.38, 0.30)),
    ("Patient_005", triple(0.95, 0.91, 0.85)),
];

#[must_use]
pub fn patients() -> &'static [PatientRecord] {
    &PATIENTS
}

#[must_use]
pub fn find_patient(id: &str) -> Option<&'static PatientRecord> {
    PATIENTS.iter().find(|p| p.id == id)
}

/// Segmentation quality of a finished patient.
///
/// Only patients whose inference produced a result have metrics; anything
/// else, including unknown ids, is [`DashboardError::PatientNotFound`].
pub fn metrics(patient_id: &str) -> Result<&'static [MetricValue], DashboardError> {
    METRICS
        .iter()
        .find(|(id, _)| *id == patient_id)
        .map(|(_, values)| values.as_slice())
        .ok_or_else(|| DashboardError::PatientNotFound(patient_id.to_string()))
}

#[must_use]
pub fn processing_status() -> JobStatus {
    let patient_id = "Patient_003";
    let progress = 80;
    JobStatus {
        patient_id,
        progress,
        stage: "Vessel Segmentation",
        message: format!("Processing {patient_id}... {progress}%"),
    }
}

#[must_use]
pub fn server_status() -> ServerStatus {
    ServerStatus {
        online: true,
        version: "v1.2.0",
        gpu: "Apple M2 Pro",
        model_version: "VascularNet v2.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    #[test]
    fn test_patients() {
        assert_eq!(patients().len(), 6);
        let chen = find_patient("Patient_003").unwrap();
        assert_eq!(chen.name, "Robert Chen");
        assert_eq!(chen.status, ProcessingStatus::Processing);
        assert_eq!(chen.inference_time, None);
        assert_eq!(chen.date.month(), Month::March);
        assert!(find_patient("Patient_999").is_none());
    }

    #[test]
    fn test_metrics_lookup() {
        let values = metrics("Patient_004").unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values[0].metric, "clDice");
        assert_eq!(values[0].value, 0.45);
        assert_eq!(values[2].metric, "IoU");

        let err = metrics("Patient_003").unwrap_err();
        assert_eq!(err, DashboardError::PatientNotFound("Patient_003".to_string()));
        assert_eq!(err.to_string(), "patient not found");
        assert!(metrics("nobody").is_err());
    }

    #[test]
    fn test_status_records() {
        let job = processing_status();
        assert_eq!(job.message, "Processing Patient_003... 80%");
        assert_eq!(job.progress, 80);
        let server = server_status();
        assert!(server.online);
        assert_eq!(server.model_version, "VascularNet v2.1");
    }

    #[test]
    fn test_iso_day() {
        assert_eq!(iso_day(date!(2026 - 02 - 07)), "2026-02-07");
        assert_eq!(iso_day(patients()[5].date), "2026-03-01");
    }
}
