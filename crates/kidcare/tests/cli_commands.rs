//! Command tests
//!
//! Runs the command functions against a data file in a temporary directory
//! and reads their JSON output back from an output file.

#![cfg(feature = "cli")]

use chrono::{NaiveDate, NaiveTime};
use kidcare::cli::{Session, appointments, children, medications, output::OutputFormat, prompt, vaccinations};
use kidcare::engine::{NewMedication, VaccineStatus};
use kidcare::model::{Doctor, DoctorId, Gender, Snapshot, UserId};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn data(&self) -> PathBuf {
        self.dir.path().join("kidcare.json")
    }

    fn out(&self) -> PathBuf {
        self.dir.path().join("out.json")
    }

    fn session(&self) -> Session {
        Session::new(self.data(), Some(date(2025, 5, 10)))
            .with_format(OutputFormat::Json)
            .with_output(Some(self.out()))
    }

    fn output(&self) -> Value {
        read_json(&self.out())
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::from_file(self.data()).unwrap()
    }

    async fn register(&self, parent: UserId, issues: &[&str]) -> kidcare::model::ChildId {
        let config = children::RegisterConfig {
            parent,
            name: "Anaya".to_string(),
            date_of_birth: date(2025, 3, 1),
            gender: Gender::Female,
            place_of_birth: Some("Pune".to_string()),
            health_issues: issues.iter().map(|s| s.to_string()).collect(),
        };
        children::register(&self.session(), config).await.unwrap();
        serde_json::from_value(self.output()["child"]["id"].clone()).unwrap()
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

// ============================================================================
// Vaccinations
// ============================================================================

#[tokio::test]
async fn test_register_creates_data_file_with_records() {
    let ws = Workspace::new();
    let parent = UserId::new();
    let child = ws.register(parent, &[]).await;

    assert_eq!(ws.output()["vaccination_records"], 30);
    let snapshot = ws.snapshot();
    assert_eq!(snapshot.children.len(), 1);
    assert_eq!(snapshot.children[0].id, child);
    assert_eq!(snapshot.vaccination_records.len(), 30);
}

#[tokio::test]
async fn test_status_and_toggle() {
    let ws = Workspace::new();
    let child = ws.register(UserId::new(), &[]).await;

    vaccinations::status(&ws.session(), vaccinations::StatusConfig { child, only: None })
        .await
        .unwrap();
    let status = ws.output();
    // Born 2025-03-01, evaluated 2025-05-10: day 70
    assert_eq!(status["summary"]["total"], 30);
    assert_eq!(status["summary"]["completed"], 0);
    assert_eq!(status["summary"]["due"], 11);
    assert_eq!(status["groups"].as_object().unwrap().len(), 12);

    let record = status["groups"]["At birth"][0]["record_id"].clone();
    let record = serde_json::from_value(record).unwrap();
    vaccinations::toggle(&ws.session(), vaccinations::ToggleConfig { child, record })
        .await
        .unwrap();
    let toggled = ws.output();
    assert_eq!(toggled["toggled"]["is_completed"], true);
    assert_eq!(toggled["toggled"]["administered_date"], "2025-05-10");
    assert_eq!(toggled["summary"]["completed"], 1);
    assert_eq!(toggled["summary"]["due"], 10);

    vaccinations::status(
        &ws.session(),
        vaccinations::StatusConfig {
            child,
            only: Some(VaccineStatus::Completed),
        },
    )
    .await
    .unwrap();
    let completed = ws.output();
    assert_eq!(completed["groups"].as_object().unwrap().len(), 1);
    assert_eq!(completed["groups"]["At birth"].as_array().unwrap().len(), 1);
}

// ============================================================================
// Appointments
// ============================================================================

#[tokio::test]
async fn test_add_slot_then_book_for_child() {
    let ws = Workspace::new();
    let parent = UserId::new();
    let child = ws.register(parent, &[]).await;
    let doctor = DoctorId::new();

    appointments::add_slot(
        &ws.session(),
        appointments::AddSlotConfig {
            doctor,
            date: date(2025, 5, 12),
            start: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
        },
    )
    .await
    .unwrap();
    let slot = serde_json::from_value(ws.output()["id"].clone()).unwrap();

    let book = |requester| appointments::BookConfig {
        doctor,
        slot,
        requester,
        child: Some(child),
        notes: None,
    };

    // Someone else's child
    let err = appointments::book(&ws.session(), book(UserId::new())).await.unwrap_err();
    assert!(err.to_string().contains("is not a child of"));

    appointments::book(&ws.session(), book(parent)).await.unwrap();
    let appointment = ws.output();
    assert_eq!(appointment["status"], "pending");
    assert_eq!(appointment["appointment_time"], "10:00:00");
    assert_eq!(appointment["is_self_booking"], false);

    let err = appointments::book(&ws.session(), book(parent)).await.unwrap_err();
    let text = kidcare::cli::output::format_error(&err);
    assert!(text.contains("KC0200"));

    appointments::slots(&ws.session(), appointments::SlotsConfig { doctor })
        .await
        .unwrap();
    assert_eq!(ws.output(), Value::Array(vec![]));
    assert_eq!(ws.snapshot().appointments.len(), 1);
}

// ============================================================================
// Medications, doctors and prompts
// ============================================================================

#[tokio::test]
async fn test_medications_round_trip_through_data_file() {
    let ws = Workspace::new();
    let child = ws.register(UserId::new(), &[]).await;

    let config = medications::AddMedicationConfig {
        child,
        medication: NewMedication {
            health_issue: "Jaundice".to_string(),
            medicine_name: "Ursodiol".to_string(),
            dosage: "1 ml".to_string(),
            frequency: "Twice daily".to_string(),
            duration: "10 days".to_string(),
            doctor_name: "Dr. Rao".to_string(),
            ..Default::default()
        },
    };
    medications::add(&ws.session(), config).await.unwrap();
    assert_eq!(ws.output()["prescribed_date"], "2025-05-10");

    medications::medications(&ws.session(), medications::MedicationsConfig { child })
        .await
        .unwrap();
    let listed = ws.output();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["medicine_name"], "Ursodiol");
}

#[tokio::test]
async fn test_doctors_reads_directory_from_data_file() {
    let ws = Workspace::new();
    let mut snapshot = Snapshot::default();
    snapshot.doctors.push(Doctor {
        id: DoctorId::new(),
        user_id: UserId::new(),
        name: "Dr. Rao".to_string(),
        specialization: "Pediatrics".to_string(),
        qualification: "MD".to_string(),
        experience_years: 12,
        location: "Baner, Pune".to_string(),
        consultation_fee: Some(600),
        bio: None,
        active: true,
    });
    snapshot.write_file(ws.data()).unwrap();

    let config = kidcare::cli::doctors::DoctorsConfig {
        location: Some("pune".to_string()),
        specialization: None,
    };
    kidcare::cli::doctors::doctors(&ws.session(), config).await.unwrap();
    assert_eq!(ws.output()[0]["name"], "Dr. Rao");
}

#[tokio::test]
async fn test_prompt_requires_health_issues() {
    let ws = Workspace::new();
    let healthy = ws.register(UserId::new(), &[]).await;
    let err = prompt::prompt(&ws.session(), prompt::PromptConfig { child: healthy })
        .await
        .unwrap_err();
    assert!(kidcare::cli::output::format_error(&err).contains("KC0004"));

    let jaundiced = ws.register(UserId::new(), &["Jaundice"]).await;
    prompt::prompt(&ws.session(), prompt::PromptConfig { child: jaundiced })
        .await
        .unwrap();
    let messages = ws.output()["messages"].clone();
    assert_eq!(messages[0]["role"], "system");
    assert!(
        messages[1]["content"]
            .as_str()
            .unwrap()
            .starts_with("Child: Anaya (2 months old)")
    );
}
