// Integration tests for the BMI handler
//
// Tests cover:
// - Computation and formatting of the returned BMI
// - Degenerate inputs (zero height, missing fields, malformed numbers)
// - Exactly one store write per successful invocation
// - Store failures aborting the invocation

use async_trait::async_trait;
use bmi_function::config::config::InputMode;
use bmi_function::error::{AppError, Result};
use bmi_function::models::{InvocationEvent, MeasurementRecord};
use bmi_function::observability::AppMetrics;
use bmi_function::services::{BmiService, create_bmi_service};
use bmi_function::storage::repository::{InMemoryMeasurementRepository, MeasurementRepository};
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Store that refuses every write
#[derive(Default)]
struct FailingRepository {
    attempts: AtomicUsize,
}

#[async_trait]
impl MeasurementRepository for FailingRepository {
    async fn put(&self, _record: &MeasurementRecord) -> Result<String> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(AppError::StorageUnavailable("connection refused".into()))
    }

    async fn ping(&self) -> Result<()> {
        Err(AppError::StorageUnavailable("connection refused".into()))
    }
}

fn event(value: Value) -> InvocationEvent {
    serde_json::from_value(value).expect("valid invocation event")
}

fn compat_service(repo: Arc<dyn MeasurementRepository>) -> Box<dyn BmiService> {
    create_bmi_service(repo, Arc::new(AppMetrics::default()), InputMode::Compat)
}

fn is_well_formed_bmi_body(body: &str) -> bool {
    let Some(inner) = body.strip_prefix('"').and_then(|b| b.strip_suffix('"')) else {
        return false;
    };
    if matches!(inner, "NaN" | "Infinity" | "-Infinity") {
        return true;
    }
    let digits = inner.strip_prefix('-').unwrap_or(inner);
    match digits.split_once('.') {
        Some((int, frac)) => {
            !int.is_empty()
                && int.bytes().all(|b| b.is_ascii_digit())
                && frac.len() == 2
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

// ============ Computation ============

#[tokio::test]
async fn test_standard_measurement() {
    let repo = Arc::new(InMemoryMeasurementRepository::new());
    let service = compat_service(repo.clone());

    let response = service
        .handle(&event(json!({ "weight": 70, "height": 175 })))
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "\"22.86\"");

    let records = repo.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(
        serde_json::to_value(&records[0]).unwrap(),
        json!({ "ht": 175.0, "wt": 70.0, "bmi": "22.86" })
    );
}

#[rstest]
#[case(70.0, 175.0)]
#[case(55.5, 162.0)]
#[case(120.0, 190.5)]
#[case(3.2, 50.0)]
#[case(80.0, 180.0)]
#[tokio::test]
async fn test_bmi_matches_rounded_formula(#[case] weight: f64, #[case] height: f64) {
    let repo = Arc::new(InMemoryMeasurementRepository::new());
    let service = compat_service(repo);

    let response = service
        .handle(&event(json!({ "weight": weight, "height": height })))
        .await
        .unwrap();

    let expected = weight / ((height * height) / 10000.0);
    let returned: String = serde_json::from_str(&response.body).unwrap();
    let returned: f64 = returned.parse().unwrap();
    assert!((returned - expected).abs() <= 0.005 + 1e-9);
    assert!(is_well_formed_bmi_body(&response.body));
}

#[tokio::test]
async fn test_numeric_strings_are_accepted() {
    let repo = Arc::new(InMemoryMeasurementRepository::new());
    let service = compat_service(repo);

    let response = service
        .handle(&event(json!({ "weight": "70", "height": " 175 " })))
        .await
        .unwrap();

    assert_eq!(response.body, "\"22.86\"");
}

// ============ Degenerate Inputs ============

#[rstest]
#[case(json!({ "weight": 50, "height": 0 }), "\"Infinity\"")]
#[case(json!({ "weight": -50, "height": 0 }), "\"-Infinity\"")]
#[case(json!({ "weight": 0, "height": 0 }), "\"NaN\"")]
#[case(json!({}), "\"NaN\"")]
#[case(json!({ "queryStringParameters": { "weight": "60", "height": "160" } }), "\"NaN\"")]
#[case(json!({ "weight": "seventy", "height": 175 }), "\"NaN\"")]
#[case(json!({ "weight": 70 }), "\"Infinity\"")]
#[case(json!({ "height": 175 }), "\"0.00\"")]
#[tokio::test]
async fn test_degenerate_inputs_are_not_rejected(#[case] input: Value, #[case] expected: &str) {
    let repo = Arc::new(InMemoryMeasurementRepository::new());
    let service = compat_service(repo.clone());

    let response = service.handle(&event(input)).await.unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, expected);
    assert!(is_well_formed_bmi_body(&response.body));
    assert_eq!(repo.len().await, 1);
}

// ============ Store Writes ============

#[tokio::test]
async fn test_identical_inputs_create_distinct_records() {
    let repo = Arc::new(InMemoryMeasurementRepository::new());
    let service = compat_service(repo.clone());
    let input = event(json!({ "weight": 70, "height": 175 }));

    service.handle(&input).await.unwrap();
    service.handle(&input).await.unwrap();

    assert_eq!(repo.len().await, 2);
}

#[tokio::test]
async fn test_store_failure_produces_no_response() {
    let repo = Arc::new(FailingRepository::default());
    let service = compat_service(repo.clone());

    let result = service
        .handle(&event(json!({ "weight": 70, "height": 175 })))
        .await;

    assert!(matches!(result, Err(AppError::StorageUnavailable(_))));
    assert_eq!(repo.attempts.load(Ordering::SeqCst), 1);
}

// ============ Strict Mode ============

#[tokio::test]
async fn test_strict_mode_rejects_zero_height() {
    let repo = Arc::new(InMemoryMeasurementRepository::new());
    let service = create_bmi_service(
        repo.clone(),
        Arc::new(AppMetrics::default()),
        InputMode::Strict,
    );

    let result = service
        .handle(&event(json!({ "weight": 50, "height": 0 })))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(repo.is_empty().await);
}
