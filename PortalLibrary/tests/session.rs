use image::DynamicImage;
use serde_json::json;
use Common::portal::utils::detection::DetectionReport;
use PortalLibrary::portal::session_manager::SessionManager;
use PortalLibrary::portal::utils::submission::{StoredPhoto, SubmissionStatus, ViewMode};

fn photo(name: &str) -> StoredPhoto {
    StoredPhoto::new(name.to_string(), DynamicImage::new_rgba8(8, 8))
}

fn report(count: usize) -> DetectionReport {
    let detections: Vec<_> = (0..count)
        .map(|index| json!({
            "bbox": { "x1": 0.0, "y1": 0.0, "x2": 10.0, "y2": 10.0 },
            "confidence": 0.9,
            "class": format!("item{index}"),
        }))
        .collect();
    DetectionReport::from_value(json!({ "detections": detections }))
}

#[tokio::test]
async fn sessions_resolve_until_closed() {
    let manager = SessionManager::new();
    let token = manager.open_session("cook@example.com").await;
    assert_eq!(manager.resolve(token).await.as_deref(), Some("cook@example.com"));
    assert!(manager.close_session(token).await);
    assert_eq!(manager.resolve(token).await, None);
    assert!(!manager.close_session(token).await);
}

#[tokio::test]
async fn submit_without_a_photo_is_rejected() {
    let manager = SessionManager::new();
    assert_eq!(manager.submit("cook@example.com").await, None);
    let view = manager.submission_view("cook@example.com").await;
    assert_eq!(view.status, SubmissionStatus::Idle);
}

#[tokio::test]
async fn successful_completion_marks_the_result_ready() {
    let manager = SessionManager::new();
    manager.select_photo("cook@example.com", photo("meal.png")).await;
    let sequence = manager.submit("cook@example.com").await.unwrap();
    assert!(manager.complete("cook@example.com", sequence, Ok(report(2))).await);
    let view = manager.submission_view("cook@example.com").await;
    assert_eq!(view.status, SubmissionStatus::ResultReady);
    assert_eq!(view.view_mode, ViewMode::Visual);
    assert_eq!(view.detection_count, 2);
    assert!(view.error.is_none());
}

#[tokio::test]
async fn failed_completion_keeps_the_chosen_view_mode() {
    let manager = SessionManager::new();
    manager.select_photo("cook@example.com", photo("meal.png")).await;
    let sequence = manager.submit("cook@example.com").await.unwrap();
    assert!(manager.set_view_mode("cook@example.com", ViewMode::Json).await);
    let outcome = Err("Connection failed: backend offline".to_string());
    assert!(manager.complete("cook@example.com", sequence, outcome).await);
    let view = manager.submission_view("cook@example.com").await;
    assert_eq!(view.status, SubmissionStatus::ResultError);
    assert_eq!(view.view_mode, ViewMode::Json);
    assert_eq!(view.error.as_deref(), Some("Connection failed: backend offline"));
    assert_eq!(view.detection_count, 0);
}

#[tokio::test]
async fn superseded_completion_is_discarded() {
    let manager = SessionManager::new();
    manager.select_photo("cook@example.com", photo("first.png")).await;
    let first = manager.submit("cook@example.com").await.unwrap();
    manager.select_photo("cook@example.com", photo("second.png")).await;
    let second = manager.submit("cook@example.com").await.unwrap();
    assert!(second > first);
    assert!(!manager.complete("cook@example.com", first, Ok(report(1))).await);
    let view = manager.submission_view("cook@example.com").await;
    assert_eq!(view.status, SubmissionStatus::Submitting);
    assert_eq!(view.file_name.as_deref(), Some("second.png"));
    assert!(manager.complete("cook@example.com", second, Ok(report(1))).await);
    let view = manager.submission_view("cook@example.com").await;
    assert_eq!(view.status, SubmissionStatus::ResultReady);
}

#[tokio::test]
async fn reselecting_a_photo_clears_the_previous_result() {
    let manager = SessionManager::new();
    manager.select_photo("cook@example.com", photo("first.png")).await;
    let sequence = manager.submit("cook@example.com").await.unwrap();
    assert!(manager.complete("cook@example.com", sequence, Ok(report(3))).await);
    manager.select_photo("cook@example.com", photo("second.png")).await;
    let view = manager.submission_view("cook@example.com").await;
    assert_eq!(view.status, SubmissionStatus::ImageSelected);
    assert_eq!(view.view_mode, ViewMode::Visual);
    assert_eq!(view.detection_count, 0);
    assert!(view.error.is_none());
    assert_eq!(view.file_name.as_deref(), Some("second.png"));
}

#[tokio::test]
async fn result_snapshot_only_exists_when_ready() {
    let manager = SessionManager::new();
    assert!(manager.result_snapshot("cook@example.com").await.is_none());
    manager.select_photo("cook@example.com", photo("meal.png")).await;
    assert!(manager.result_snapshot("cook@example.com").await.is_none());
    let sequence = manager.submit("cook@example.com").await.unwrap();
    assert!(manager.result_snapshot("cook@example.com").await.is_none());
    manager.complete("cook@example.com", sequence, Ok(report(1))).await;
    let snapshot = manager.result_snapshot("cook@example.com").await.unwrap();
    assert_eq!(snapshot.natural_width, 8);
    assert_eq!(snapshot.natural_height, 8);
    assert_eq!(snapshot.report.detection_count(), 1);
}

#[tokio::test]
async fn set_view_mode_requires_a_submission() {
    let manager = SessionManager::new();
    assert!(!manager.set_view_mode("cook@example.com", ViewMode::Json).await);
}

#[tokio::test]
async fn submissions_are_scoped_per_user() {
    let manager = SessionManager::new();
    manager.select_photo("alpha@example.com", photo("alpha.png")).await;
    let view = manager.submission_view("beta@example.com").await;
    assert_eq!(view.status, SubmissionStatus::Idle);
    assert!(view.file_name.is_none());
}
