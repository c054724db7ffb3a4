//! Home Assistant REST integration
//!
//! Thin bearer-token client used for the climate and filter readings shown
//! in the Sistema section, and for firing device webhooks. These calls are
//! single-shot: a failing read degrades to the sentinel in the rendered
//! page instead of being retried.

use crate::bandeira::SENTINELA;
use crate::config::HaConfig;
use crate::error::{PainelError, Result};
use crate::logging::get_logger;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

/// State document returned by `/api/states/{entity_id}`
#[derive(Debug, Clone, Deserialize)]
pub struct EntityState {
    pub entity_id: String,
    pub state: String,
    #[serde(default)]
    pub attributes: serde_json::Value,
}

/// Home Assistant REST client
#[derive(Clone)]
pub struct HaClient {
    base_url: String,
    nabu_base_url: String,
    token: String,
    http: reqwest::Client,
    config: HaConfig,
    logger: crate::logging::StructuredLogger,
}

impl HaClient {
    /// Create a new client from configuration
    pub fn new(config: HaConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let logger = get_logger("ha");
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            nabu_base_url: config.nabu_base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            http,
            config,
            logger,
        })
    }

    /// Get the state of a specific entity
    pub async fn get_state(&self, entity_id: &str) -> Result<EntityState> {
        self.get_state_with_timeout(entity_id, Duration::from_secs(self.config.timeout_secs))
            .await
    }

    async fn get_state_with_timeout(
        &self,
        entity_id: &str,
        timeout: Duration,
    ) -> Result<EntityState> {
        let url = format!("{}/api/states/{}", self.base_url, entity_id);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .timeout(timeout)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json::<EntityState>().await?),
            StatusCode::NOT_FOUND => Err(PainelError::api(format!(
                "Entity not found: {}",
                entity_id
            ))),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(PainelError::auth("Home Assistant rejected the token"))
            }
            status => Err(PainelError::api(format!(
                "Unexpected status {} for {}",
                status, entity_id
            ))),
        }
    }

    /// Room climate summary, e.g. `"23.5°C / 48%"`.
    ///
    /// Reads `current_temperature` and `current_humidity` from the climate
    /// entity attributes; each side falls back to the sentinel, and any
    /// request failure yields the sentinel pair.
    pub async fn climate_summary(&self) -> String {
        match self.get_state(&self.config.climate_entity).await {
            Ok(state) => {
                let t = attribute_text(&state.attributes, "current_temperature");
                let h = attribute_text(&state.attributes, "current_humidity");
                format!("{}°C / {}%", t, h)
            }
            Err(e) => {
                self.logger
                    .warn(&format!("Climate read failed: {}", e));
                SENTINELA.to_string()
            }
        }
    }

    /// Filter-cleaning status label: "Necessário" when the binary sensor is
    /// `on`, "OK" otherwise, sentinel on failure.
    pub async fn filter_status(&self) -> String {
        let timeout = Duration::from_secs(self.config.filter_timeout_secs);
        match self
            .get_state_with_timeout(&self.config.filter_entity, timeout)
            .await
        {
            Ok(state) if state.state == "on" => "Necessário".to_string(),
            Ok(_) => "OK".to_string(),
            Err(e) => {
                self.logger.warn(&format!("Filter read failed: {}", e));
                SENTINELA.to_string()
            }
        }
    }

    /// Fire a device webhook through the Nabu Casa endpoint
    pub async fn trigger_webhook(&self, webhook_id: &str) -> Result<()> {
        let base = if self.nabu_base_url.is_empty() {
            &self.base_url
        } else {
            &self.nabu_base_url
        };
        let url = format!("{}/api/webhook/{}", base, webhook_id);
        let response = self.http.post(&url).send().await?;

        let status = response.status();
        if status.is_success() {
            self.logger.info(&format!("Webhook {} fired", webhook_id));
            Ok(())
        } else {
            Err(PainelError::api(format!(
                "Webhook {} returned status {}",
                webhook_id, status
            )))
        }
    }
}

/// Render a numeric or string attribute, sentinel when absent
fn attribute_text(attributes: &serde_json::Value, name: &str) -> String {
    match attributes.get(name) {
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
        _ => SENTINELA.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attribute_text_renders_numbers_and_strings() {
        let attrs = json!({"current_temperature": 23.5, "mode": "cool"});
        assert_eq!(attribute_text(&attrs, "current_temperature"), "23.5");
        assert_eq!(attribute_text(&attrs, "mode"), "cool");
    }

    #[test]
    fn attribute_text_falls_back_to_sentinel() {
        let attrs = json!({"other": null});
        assert_eq!(attribute_text(&attrs, "missing"), SENTINELA);
        assert_eq!(attribute_text(&attrs, "other"), SENTINELA);
    }
}
