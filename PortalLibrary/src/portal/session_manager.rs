use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use chrono::{DateTime, Local};
use image::DynamicImage;
use tokio::sync::RwLock;
use uuid::Uuid;
use Common::portal::utils::detection::DetectionReport;
use crate::portal::utils::submission::{StoredPhoto, Submission, SubmissionStatus, SubmissionView, ViewMode};

pub struct AuthSession {
    pub token: Uuid,
    pub email: String,
    pub created_at: DateTime<Local>,
}

//Snapshot handed to the overlay endpoint. The Arc keeps the photo pixels
//shared with the submission slot instead of copied.
pub struct ResultSnapshot {
    pub image: Arc<DynamicImage>,
    pub report: DetectionReport,
    pub natural_width: u32,
    pub natural_height: u32,
}

//Sign-in sessions plus the per-user submission slot. Submissions carry a
//globally increasing sequence number; completions apply only while their
//sequence is still the slot's current one, so a late response from a
//superseded submission can never overwrite a newer one.
pub struct SessionManager {
    sessions: RwLock<HashMap<Uuid, AuthSession>>,
    submissions: RwLock<HashMap<String, Submission>>,
    sequence: AtomicU64,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            submissions: RwLock::new(HashMap::new()),
            sequence: AtomicU64::new(0_u64),
        }
    }

    pub async fn open_session(&self, email: &str) -> Uuid {
        let token = Uuid::new_v4();
        let session = AuthSession {
            token,
            email: email.to_string(),
            created_at: Local::now(),
        };
        self.sessions.write().await.insert(token, session);
        token
    }

    pub async fn resolve(&self, token: Uuid) -> Option<String> {
        self.sessions.read().await.get(&token).map(|session| session.email.clone())
    }

    pub async fn close_session(&self, token: Uuid) -> bool {
        self.sessions.write().await.remove(&token).is_some()
    }

    //A new selection replaces the slot wholesale, discarding any previous
    //result and any response still in flight.
    pub async fn select_photo(&self, email: &str, photo: StoredPhoto) {
        let mut submissions = self.submissions.write().await;
        submissions.insert(email.to_string(), Submission::with_photo(photo));
    }

    pub async fn submit(&self, email: &str) -> Option<u64> {
        let mut submissions = self.submissions.write().await;
        let submission = submissions.get_mut(email)?;
        submission.photo.as_ref()?;
        let sequence = self.sequence.fetch_add(1_u64, Ordering::SeqCst) + 1_u64;
        submission.sequence = sequence;
        submission.status = SubmissionStatus::Submitting;
        submission.report = None;
        submission.error = None;
        Some(sequence)
    }

    pub async fn complete(&self, email: &str, sequence: u64, outcome: Result<DetectionReport, String>) -> bool {
        let mut submissions = self.submissions.write().await;
        let submission = match submissions.get_mut(email) {
            Some(submission) => submission,
            None => return false,
        };
        if submission.sequence != sequence || submission.status != SubmissionStatus::Submitting {
            return false;
        }
        match outcome {
            Ok(report) => {
                submission.status = SubmissionStatus::ResultReady;
                submission.report = Some(report);
                submission.error = None;
                submission.view_mode = ViewMode::Visual;
            },
            Err(message) => {
                submission.status = SubmissionStatus::ResultError;
                submission.error = Some(message);
                submission.report = None;
            },
        }
        true
    }

    pub async fn set_view_mode(&self, email: &str, view_mode: ViewMode) -> bool {
        let mut submissions = self.submissions.write().await;
        match submissions.get_mut(email) {
            Some(submission) => {
                submission.view_mode = view_mode;
                true
            },
            None => false,
        }
    }

    pub async fn submission_view(&self, email: &str) -> SubmissionView {
        let submissions = self.submissions.read().await;
        match submissions.get(email) {
            Some(submission) => SubmissionView::from(submission),
            None => SubmissionView::from(&Submission::new()),
        }
    }

    pub async fn result_snapshot(&self, email: &str) -> Option<ResultSnapshot> {
        let submissions = self.submissions.read().await;
        let submission = submissions.get(email)?;
        if submission.status != SubmissionStatus::ResultReady {
            return None;
        }
        let photo = submission.photo.as_ref()?;
        Some(ResultSnapshot {
            image: photo.image.clone(),
            report: submission.report.clone()?,
            natural_width: photo.natural_width,
            natural_height: photo.natural_height,
        })
    }
}
