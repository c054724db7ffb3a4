//! Weather one-liner from wttr.in
//!
//! Raw text passthrough: the service already formats the line (icon,
//! condition, temperature, humidity), so the body is trimmed and dropped
//! into the page as-is.

use crate::config::TempoConfig;
use crate::error::Result;
use crate::logging::get_logger;
use std::time::Duration;

/// Label shown when the weather service cannot be reached
pub const INDISPONIVEL: &str = "Indisponível";

/// wttr.in client
pub struct TempoClient {
    http: reqwest::Client,
    config: TempoConfig,
    logger: crate::logging::StructuredLogger,
}

impl TempoClient {
    /// Create a new client with the request timeout from configuration
    pub fn new(config: TempoConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let logger = get_logger("tempo");
        Ok(Self {
            http,
            config,
            logger,
        })
    }

    /// Fetch the formatted weather line, falling back to [`INDISPONIVEL`]
    pub async fn fetch(&self) -> String {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.cidade
        );

        let result = async {
            let response = self
                .http
                .get(&url)
                .query(&[
                    ("format", self.config.formato.as_str()),
                    ("lang", self.config.lang.as_str()),
                    ("m", ""),
                ])
                .send()
                .await?;
            let body = response.error_for_status()?.text().await?;
            Ok::<String, crate::error::PainelError>(body.trim().to_string())
        }
        .await;

        match result {
            Ok(line) if !line.is_empty() => line,
            Ok(_) => {
                self.logger.warn("Weather service returned an empty body");
                INDISPONIVEL.to_string()
            }
            Err(e) => {
                self.logger.warn(&format!("Weather fetch failed: {}", e));
                INDISPONIVEL.to_string()
            }
        }
    }
}
