//! Submission intake pipeline.
//!
//! Persists a validated draft with server-derived metadata, then advances
//! the document sequence counter and fires the advisory webhook. Persistence
//! is single-attempt; the caller decides whether to retry a reported
//! failure.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};
use uuid::Uuid;

use super::brand::Brand;
use super::error::Error;
use super::ports::{
    DocumentSequenceStore, IntakeCommand, SubmissionNotifier, SubmissionRepository,
    SubmissionStoreError,
};
use super::sequence::map_sequence_error;
use super::submission::{Submission, SubmissionDraft};
use super::user::UserId;

/// Intake service implementing the [`IntakeCommand`] driving port.
#[derive(Clone)]
pub struct SubmissionIntakeService<R, S> {
    submissions: Arc<R>,
    sequences: Arc<S>,
    notifier: Option<Arc<dyn SubmissionNotifier>>,
    clock: Arc<dyn Clock>,
}

impl<R, S> SubmissionIntakeService<R, S> {
    /// Create a new intake service. `notifier` is `None` when no webhook is
    /// configured.
    pub fn new(
        submissions: Arc<R>,
        sequences: Arc<S>,
        notifier: Option<Arc<dyn SubmissionNotifier>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            submissions,
            sequences,
            notifier,
            clock,
        }
    }
}

pub(crate) fn map_submission_error(error: SubmissionStoreError) -> Error {
    match error {
        SubmissionStoreError::Connection { message } => {
            Error::service_unavailable("submission store unavailable").with_details(message)
        }
        SubmissionStoreError::Query { message } => {
            Error::internal("submission store error").with_details(message)
        }
    }
}

impl<R, S> SubmissionIntakeService<R, S>
where
    R: SubmissionRepository,
    S: DocumentSequenceStore,
{
    /// Advance the per-form-type counter for the inserted submission.
    ///
    /// The counter is advisory display data: losing an increment is
    /// acceptable, so a failure here is logged and never fails the
    /// already-persisted submission.
    async fn commit_sequence(&self, submission: &Submission) {
        let today = self.clock.utc().date_naive();
        match self.sequences.commit(&submission.form_type, today).await {
            Ok(number) => info!(
                form_type = %submission.form_type,
                document_number = number,
                submission_id = %submission.id,
                "issued document number"
            ),
            Err(error) => {
                let error = map_sequence_error(error);
                warn!(
                    form_type = %submission.form_type,
                    %error,
                    "sequence commit failed after submission insert"
                );
            }
        }
    }

    fn notify_integration(&self, submission: &Submission) {
        let Some(notifier) = &self.notifier else {
            return;
        };
        let notifier = Arc::clone(notifier);
        let snapshot = submission.clone();
        tokio::spawn(async move {
            if let Err(error) = notifier.notify(&snapshot).await {
                warn!(submission_id = %snapshot.id, %error, "webhook notification failed");
            }
        });
    }
}

#[async_trait]
impl<R, S> IntakeCommand for SubmissionIntakeService<R, S>
where
    R: SubmissionRepository,
    S: DocumentSequenceStore,
{
    async fn submit(
        &self,
        user_id: UserId,
        brand: Brand,
        draft: SubmissionDraft,
    ) -> Result<Submission, Error> {
        let submission =
            draft.into_submission(Uuid::new_v4(), self.clock.utc(), brand, user_id);

        self.submissions
            .insert(&submission)
            .await
            .map_err(map_submission_error)?;

        self.commit_sequence(&submission).await;
        self.notify_integration(&submission);

        Ok(submission)
    }
}

#[cfg(test)]
mod tests {
    //! Intake behaviour: server-derived metadata, sequence commit, and
    //! advisory webhook semantics.
    use std::sync::Mutex;
    use std::time::Duration;

    use chrono::NaiveDate;
    use mockable::DefaultClock;
    use rstest::rstest;
    use tokio::sync::mpsc;

    use super::*;
    use crate::domain::ports::{NotifyError, SequenceStoreError};
    use crate::domain::sequence::SEQUENCE_BASELINE;
    use crate::domain::ErrorCode;

    #[derive(Default)]
    struct StubSubmissionRepository {
        stored: Mutex<Vec<Submission>>,
        fail_with: Option<SubmissionStoreError>,
    }

    impl StubSubmissionRepository {
        fn failing(error: SubmissionStoreError) -> Self {
            Self {
                fail_with: Some(error),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl SubmissionRepository for StubSubmissionRepository {
        async fn list(&self) -> Result<Vec<Submission>, SubmissionStoreError> {
            Ok(self.stored.lock().expect("stored lock").clone())
        }

        async fn insert(&self, submission: &Submission) -> Result<(), SubmissionStoreError> {
            if let Some(error) = &self.fail_with {
                return Err(error.clone());
            }
            self.stored.lock().expect("stored lock").push(submission.clone());
            Ok(())
        }

        async fn delete(&self, _id: Uuid) -> Result<bool, SubmissionStoreError> {
            Ok(false)
        }

        async fn mark_read(&self, _id: Uuid) -> Result<bool, SubmissionStoreError> {
            Ok(false)
        }
    }

    #[derive(Default)]
    struct StubSequenceStore {
        committed: Mutex<Vec<(String, NaiveDate)>>,
        fail_with: Option<SequenceStoreError>,
    }

    impl StubSequenceStore {
        fn failing(error: SequenceStoreError) -> Self {
            Self {
                fail_with: Some(error),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl DocumentSequenceStore for StubSequenceStore {
        async fn peek(
            &self,
            _form_type: &str,
            _date: NaiveDate,
        ) -> Result<Option<i32>, SequenceStoreError> {
            Ok(None)
        }

        async fn commit(
            &self,
            form_type: &str,
            date: NaiveDate,
        ) -> Result<i32, SequenceStoreError> {
            if let Some(error) = &self.fail_with {
                return Err(error.clone());
            }
            self.committed
                .lock()
                .expect("committed lock")
                .push((form_type.to_owned(), date));
            Ok(SEQUENCE_BASELINE)
        }
    }

    struct ChannelNotifier {
        sender: mpsc::UnboundedSender<Uuid>,
        fail: bool,
    }

    #[async_trait]
    impl SubmissionNotifier for ChannelNotifier {
        async fn notify(&self, submission: &Submission) -> Result<(), NotifyError> {
            self.sender.send(submission.id).expect("channel open");
            if self.fail {
                return Err(NotifyError::status(500));
            }
            Ok(())
        }
    }

    fn draft() -> SubmissionDraft {
        SubmissionDraft::try_new(
            Some("skidder".into()),
            Some("Skidder Inspection".into()),
            Some("J. Doe".into()),
            None,
            Some(true),
        )
        .expect("valid draft")
    }

    fn caller() -> UserId {
        UserId::from_uuid(Uuid::new_v4())
    }

    fn service(
        repo: StubSubmissionRepository,
        sequences: StubSequenceStore,
        notifier: Option<Arc<dyn SubmissionNotifier>>,
    ) -> SubmissionIntakeService<StubSubmissionRepository, StubSequenceStore> {
        SubmissionIntakeService::new(
            Arc::new(repo),
            Arc::new(sequences),
            notifier,
            Arc::new(DefaultClock),
        )
    }

    #[actix_web::test]
    async fn submit_derives_metadata_server_side() {
        let user_id = caller();
        let service = service(
            StubSubmissionRepository::default(),
            StubSequenceStore::default(),
            None,
        );

        let submission = service
            .submit(user_id, Brand::Cintasign, draft())
            .await
            .expect("intake succeeds");

        assert_eq!(submission.brand, Brand::Cintasign);
        assert_eq!(submission.user_id, user_id);
        assert!(!submission.is_read);
        assert!(submission.has_defects);
        let stored = service.submissions.list().await.expect("list");
        assert_eq!(stored, vec![submission]);
    }

    #[actix_web::test]
    async fn submit_commits_sequence_for_form_type() {
        let sequences = Arc::new(StubSequenceStore::default());
        let service = SubmissionIntakeService::new(
            Arc::new(StubSubmissionRepository::default()),
            Arc::clone(&sequences),
            None,
            Arc::new(DefaultClock),
        );

        service
            .submit(caller(), Brand::Bell, draft())
            .await
            .expect("intake succeeds");

        let committed = sequences.committed.lock().expect("committed lock");
        assert_eq!(committed.len(), 1);
        assert_eq!(committed.first().map(|(form, _)| form.as_str()), Some("skidder"));
    }

    #[actix_web::test]
    async fn storage_failure_reports_and_writes_nothing_else() {
        let sequences = Arc::new(StubSequenceStore::default());
        let service = SubmissionIntakeService::new(
            Arc::new(StubSubmissionRepository::failing(
                SubmissionStoreError::connection("database unavailable"),
            )),
            Arc::clone(&sequences),
            None,
            Arc::new(DefaultClock),
        );

        let error = service
            .submit(caller(), Brand::Bell, draft())
            .await
            .expect_err("propagates");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
        assert!(sequences.committed.lock().expect("committed lock").is_empty());
    }

    #[actix_web::test]
    async fn sequence_commit_failure_does_not_fail_intake() {
        let service = service(
            StubSubmissionRepository::default(),
            StubSequenceStore::failing(SequenceStoreError::query("database error")),
            None,
        );

        let result = service.submit(caller(), Brand::Bell, draft()).await;
        assert!(result.is_ok(), "sequence commit is advisory");
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    #[actix_web::test]
    async fn webhook_is_fired_and_failures_are_tolerated(#[case] fail: bool) {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let notifier: Arc<dyn SubmissionNotifier> = Arc::new(ChannelNotifier { sender, fail });
        let service = service(
            StubSubmissionRepository::default(),
            StubSequenceStore::default(),
            Some(notifier),
        );

        let submission = service
            .submit(caller(), Brand::Bell, draft())
            .await
            .expect("intake succeeds regardless of webhook outcome");

        let notified = tokio::time::timeout(Duration::from_secs(1), receiver.recv())
            .await
            .expect("notification observed")
            .expect("channel delivers");
        assert_eq!(notified, submission.id);
    }
}
