//! User listing view.
//!
//! A small state machine around one [`ProfileSource`]. Every activation or
//! refresh is a full re-fetch; nothing is cached between them.

use serde::Serialize;

use crate::domain::repository::ProfileSource;
use crate::domain::types::ProfileRow;

pub const EMPTY_MESSAGE: &str = "No users found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingState {
    Loading,
    Loaded(Vec<ProfileRow>),
    Errored { message: String, dismissed: bool },
}

/// Serializable picture of the view at one moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSnapshot {
    pub state: &'static str,
    pub records: Vec<ProfileRow>,
    /// Error banner; absent once dismissed.
    pub banner: Option<String>,
    /// Shown in place of the table when a successful load returned nothing.
    pub empty_message: Option<&'static str>,
    /// "3 users found"
    pub summary: String,
}

pub struct ListingView<S: ProfileSource> {
    source: S,
    state: ListingState,
}

impl<S: ProfileSource> ListingView<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: ListingState::Loading,
        }
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    /// First load when the page is opened.
    pub async fn activate(&mut self) -> &ListingState {
        self.refresh().await
    }

    /// Re-enter `Loading` and fetch everything again.
    pub async fn refresh(&mut self) -> &ListingState {
        self.state = ListingState::Loading;
        self.state = match self.source.fetch_profiles().await {
            Ok(records) => ListingState::Loaded(records),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load users");
                ListingState::Errored {
                    message: err.to_string(),
                    dismissed: false,
                }
            }
        };
        &self.state
    }

    /// Hide the error banner. The table stays empty until the next refresh.
    pub fn dismiss_error(&mut self) {
        if let ListingState::Errored { dismissed, .. } = &mut self.state {
            *dismissed = true;
        }
    }

    pub fn snapshot(&self) -> ListingSnapshot {
        let (state, records, banner, empty_message) = match &self.state {
            ListingState::Loading => ("loading", Vec::new(), None, None),
            ListingState::Loaded(records) => (
                "loaded",
                records.clone(),
                None,
                records.is_empty().then_some(EMPTY_MESSAGE),
            ),
            ListingState::Errored { message, dismissed } => (
                "errored",
                Vec::new(),
                (!dismissed).then(|| message.clone()),
                None,
            ),
        };
        let summary = match records.len() {
            1 => "1 user found".to_owned(),
            n => format!("{n} users found"),
        };
        ListingSnapshot {
            state,
            records,
            banner,
            empty_message,
            summary,
        }
    }
}
