//! Wire Diesel adapters and domain services into handler state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{SubmissionNotifier, SubmissionsQuery};
use crate::domain::{
    AccessGateService, DocumentSequenceService, SubmissionAdminService, SubmissionIntakeService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    DbPool, DieselDocumentSequenceStore, DieselSubmissionRepository, DieselUserProfileRepository,
};
use crate::outbound::webhook::WebhookNotifier;

/// Build the production [`HttpState`] over a database pool.
pub fn build_http_state(pool: DbPool, webhook_url: Option<&str>) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let submissions = Arc::new(DieselSubmissionRepository::new(pool.clone()));
    let profiles = Arc::new(DieselUserProfileRepository::new(pool.clone()));
    let sequences = Arc::new(DieselDocumentSequenceStore::new(pool));
    let notifier = webhook_url
        .map(|url| Arc::new(WebhookNotifier::new(url)) as Arc<dyn SubmissionNotifier>);

    let admin_service = Arc::new(SubmissionAdminService::new(Arc::clone(&submissions)));
    let submissions_query: Arc<dyn SubmissionsQuery> = admin_service.clone();

    HttpState {
        access: Arc::new(AccessGateService::new(profiles, Arc::clone(&clock))),
        intake: Arc::new(SubmissionIntakeService::new(
            submissions,
            Arc::clone(&sequences),
            notifier,
            Arc::clone(&clock),
        )),
        submissions: submissions_query,
        admin: admin_service,
        sequences: Arc::new(DocumentSequenceService::new(sequences, clock)),
    }
}
