//! Bandeira tarifária fetch from the ANEEL open-data portal
//!
//! This module retrieves the most recent tariff-flag record ("VERDE",
//! "AMARELA", "VERMELHA 1", ...) from the datastore-search API with bounded
//! retry and exponential backoff. The fetch is total: every outcome,
//! including exhausted retries, degrades to the sentinel string so page
//! generation never aborts because of this data source.

use crate::config::BandeiraConfig;
use crate::error::Result;
use crate::logging::get_logger;
use std::time::Duration;

/// Fallback shown whenever a live flag cannot be obtained
pub const SENTINELA: &str = "—";

/// Default datastore-search endpoint
pub const ENDPOINT_PADRAO: &str =
    "https://dadosabertos.aneel.gov.br/api/3/action/datastore_search";

/// Resource key of the tariff-flag table
pub const RESOURCE_ID: &str = "0591b8f6-fe54-437b-b72b-1aa2efd46e42";

/// Record field holding the flag label
pub const CAMPO_BANDEIRA: &str = "NomBandeiraAcionada";

/// Competence-date field used for descending sort
pub const CAMPO_COMPETENCIA: &str = "DatCompetencia";

/// Outcome of a single fetch attempt
enum Tentativa {
    /// Flag label extracted from the newest record
    Rotulo(String),
    /// The queried window has no records; not a failure, not retried
    SemRegistros,
    /// Response arrived but could not be interpreted; not retried
    Malformada(String),
    /// Transport or HTTP-status failure; candidate for retry
    Transporte(String),
}

/// ANEEL tariff-flag client
pub struct BandeiraClient {
    http: reqwest::Client,
    config: BandeiraConfig,
    logger: crate::logging::StructuredLogger,
}

impl BandeiraClient {
    /// Create a new client with the request timeout from configuration
    pub fn new(config: BandeiraConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let logger = get_logger("bandeira");
        Ok(Self {
            http,
            config,
            logger,
        })
    }

    /// Fetch the current tariff-flag label.
    ///
    /// Returns the flag name from the most recent record, or [`SENTINELA`]
    /// when the dataset is empty, the response is malformed, or every
    /// attempt failed in transport. Never returns an error.
    pub async fn fetch(&self) -> String {
        for attempt in 1..=self.config.max_attempts {
            if attempt > 1 {
                let delay = backoff_delay(
                    attempt - 1,
                    self.config.backoff_base_secs,
                    self.config.backoff_cap_secs,
                );
                self.logger.debug(&format!(
                    "Waiting {:.1}s before attempt {}/{}",
                    delay.as_secs_f64(),
                    attempt,
                    self.config.max_attempts
                ));
                tokio::time::sleep(delay).await;
            }

            match self.tentativa().await {
                Tentativa::Rotulo(rotulo) => {
                    self.logger
                        .info(&format!("Bandeira tarifária atual: {}", rotulo));
                    return rotulo;
                }
                Tentativa::SemRegistros => {
                    self.logger.warn("Dataset returned no records");
                    return SENTINELA.to_string();
                }
                Tentativa::Malformada(motivo) => {
                    self.logger
                        .warn(&format!("Unusable response, not retrying: {}", motivo));
                    return SENTINELA.to_string();
                }
                Tentativa::Transporte(motivo) => {
                    self.logger.warn(&format!(
                        "Attempt {}/{} failed: {}",
                        attempt, self.config.max_attempts, motivo
                    ));
                }
            }
        }

        self.logger.error(&format!(
            "All {} attempts exhausted, degrading to sentinel",
            self.config.max_attempts
        ));
        SENTINELA.to_string()
    }

    /// One GET against the datastore-search endpoint
    async fn tentativa(&self) -> Tentativa {
        let sort = format!("{} desc", self.config.sort_field);
        let response = match self
            .http
            .get(&self.config.endpoint)
            .query(&[
                ("resource_id", self.config.resource_id.as_str()),
                ("sort", sort.as_str()),
                ("limit", "1"),
            ])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return Tentativa::Transporte(e.to_string()),
        };

        let status = response.status();
        if !status.is_success() {
            return Tentativa::Transporte(format!("HTTP status {}", status));
        }

        let body: serde_json::Value = match response.json().await {
            Ok(v) => v,
            Err(e) => return Tentativa::Malformada(format!("invalid JSON body: {}", e)),
        };

        let records = match body
            .get("result")
            .and_then(|r| r.get("records"))
            .and_then(|r| r.as_array())
        {
            Some(r) => r,
            None => return Tentativa::Malformada("missing result.records".to_string()),
        };

        let Some(first) = records.first() else {
            return Tentativa::SemRegistros;
        };

        match first.get(&self.config.field).and_then(|v| v.as_str()) {
            Some(rotulo) => Tentativa::Rotulo(rotulo.to_string()),
            None => Tentativa::Malformada(format!("record lacks field {}", self.config.field)),
        }
    }
}

/// Delay before retry number `retry` (1-based): base doubling per retry,
/// bounded by the configured cap.
fn backoff_delay(retry: u32, base_secs: f64, cap_secs: f64) -> Duration {
    let exp = retry.saturating_sub(1).min(16);
    let delay = (base_secs * f64::from(1u32 << exp)).min(cap_secs);
    Duration::from_secs_f64(delay.max(0.0))
}
