//! Ordered fallback over data sources.
//!
//! Stages run one at a time, in order, and each is only attempted after the
//! previous one failed. The first success wins. A failed stage never
//! propagates: it is logged and recorded in [`FetchOutcome::failures`].

use barbometro_core::{sort_by_name, AppConfig, Restaurant};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;

use crate::client::SheetsClient;
use crate::credential::CredentialSource;
use crate::error::{SourceError, SourceErrorKind};
use crate::fallback::static_restaurants;

/// One way of obtaining the full restaurant list.
pub trait SourceStrategy: Send + Sync {
    /// Stable identifier used in logs and API metadata.
    fn name(&self) -> &'static str;

    fn fetch(&self) -> BoxFuture<'_, Result<Vec<Restaurant>, SourceError>>;
}

/// Why a stage was skipped over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageFailure {
    pub stage: &'static str,
    pub kind: SourceErrorKind,
    pub message: String,
}

/// Result of running the chain.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    /// Records sorted by name. Empty only when every stage failed.
    pub restaurants: Vec<Restaurant>,
    /// Name of the stage that produced the records, if any did.
    pub source: Option<&'static str>,
    /// Stages that failed before the winner, or all of them.
    pub failures: Vec<StageFailure>,
}

/// Try each strategy in turn and stop at the first success.
///
/// Returns the winning stage name with its records (or `None` when every
/// stage failed) together with the failures of the stages tried before it.
pub async fn first_success(
    strategies: &[Box<dyn SourceStrategy>],
) -> (Option<(&'static str, Vec<Restaurant>)>, Vec<StageFailure>) {
    let mut failures = Vec::new();

    for strategy in strategies {
        let stage = strategy.name();
        tracing::debug!(stage, "attempting restaurant source");

        match strategy.fetch().await {
            Ok(records) => {
                tracing::info!(stage, count = records.len(), "restaurant source succeeded");
                return (Some((stage, records)), failures);
            }
            Err(e) => {
                tracing::warn!(stage, error = %e, "restaurant source failed");
                failures.push(StageFailure {
                    stage,
                    kind: e.kind(),
                    message: e.to_string(),
                });
            }
        }
    }

    (None, failures)
}

/// The configured sequence of sources.
pub struct SourceChain {
    stages: Vec<Box<dyn SourceStrategy>>,
}

impl SourceChain {
    #[must_use]
    pub fn new(stages: Vec<Box<dyn SourceStrategy>>) -> Self {
        Self { stages }
    }

    /// Structured API, then public CSV, then static data.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SourceError> {
        let client = SheetsClient::new(config.request_timeout_secs, &config.user_agent)?;
        Ok(Self::with_client(config, client))
    }

    /// Same as [`SourceChain::from_config`] but with a pre-built client.
    #[must_use]
    pub fn with_client(config: &AppConfig, client: SheetsClient) -> Self {
        let credentials = CredentialSource::new(
            config.sheets_api_key.clone(),
            config.sheets_key_endpoint.clone(),
        );

        Self::new(vec![
            Box::new(StructuredApiSource {
                client: client.clone(),
                credentials,
                sheet_id: config.sheet_id.clone(),
                range: config.sheet_range.clone(),
            }),
            Box::new(PublicCsvSource {
                client,
                sheet_id: config.sheet_id.clone(),
                gid: config.csv_gid,
            }),
            Box::new(StaticSource),
        ])
    }

    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run the chain. Never fails: when every stage fails the outcome is empty
    /// and carries each failure.
    pub async fn fetch_restaurants(&self) -> FetchOutcome {
        let (winner, failures) = first_success(&self.stages).await;
        match winner {
            Some((source, records)) => FetchOutcome {
                restaurants: sort_by_name(&records),
                source: Some(source),
                failures,
            },
            None => {
                tracing::error!(
                    attempted = failures.len(),
                    "every restaurant source failed; serving an empty list"
                );
                FetchOutcome {
                    restaurants: Vec::new(),
                    source: None,
                    failures,
                }
            }
        }
    }
}

/// Stage 1: the authenticated values API.
pub struct StructuredApiSource {
    pub client: SheetsClient,
    pub credentials: CredentialSource,
    pub sheet_id: String,
    pub range: String,
}

impl SourceStrategy for StructuredApiSource {
    fn name(&self) -> &'static str {
        "structured-api"
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Vec<Restaurant>, SourceError>> {
        async move {
            let api_key = self.credentials.resolve(self.client.http()).await?;
            self.client
                .fetch_values(&self.sheet_id, &self.range, &api_key)
                .await
        }
        .boxed()
    }
}

/// Stage 2: the unauthenticated CSV export.
pub struct PublicCsvSource {
    pub client: SheetsClient,
    pub sheet_id: String,
    pub gid: u32,
}

impl SourceStrategy for PublicCsvSource {
    fn name(&self) -> &'static str {
        "public-csv"
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Vec<Restaurant>, SourceError>> {
        async move { self.client.fetch_csv(&self.sheet_id, self.gid).await }.boxed()
    }
}

/// Stage 3: the built-in data set.
pub struct StaticSource;

impl SourceStrategy for StaticSource {
    fn name(&self) -> &'static str {
        "static"
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Vec<Restaurant>, SourceError>> {
        futures::future::ready(Ok(static_restaurants())).boxed()
    }
}
