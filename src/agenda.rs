//! Google Calendar agenda for the panel
//!
//! Reads today's remaining events through the Calendar v3 REST API using a
//! service-account JWT exchanged for a bearer token. The whole integration
//! sits behind the `agenda` feature; without it the section renders the
//! unavailable label.

use crate::config::AgendaConfig;
use crate::error::Result;

/// Label shown when the calendar cannot be read
pub const INDISPONIVEL: &str = "Agenda indisponível";

/// Label for a day without events
pub const NENHUM: &str = "Nenhum";

/// A calendar event as shown on the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evento {
    /// RFC 3339 dateTime for timed events, `YYYY-MM-DD` for all-day ones
    pub inicio: String,
    pub titulo: String,
}

/// Render the Compromissos block: one `HH:MM – title` line per event,
/// joined with `<br>`; all-day events show their date instead of a time.
pub fn formatar_compromissos(eventos: &[Evento]) -> String {
    if eventos.is_empty() {
        return NENHUM.to_string();
    }
    eventos
        .iter()
        .map(|e| {
            format!(
                "{} – {}",
                hora_inicio(&e.inicio),
                crate::pagina::escape_html(&e.titulo)
            )
        })
        .collect::<Vec<_>>()
        .join("<br>")
}

/// `HH:MM` of a timed start, the raw date of an all-day start
fn hora_inicio(inicio: &str) -> String {
    match inicio.split_once('T') {
        Some((_, resto)) => resto.chars().take(5).collect(),
        None => inicio.to_string(),
    }
}

/// Google Calendar client (feature `agenda`)
pub struct AgendaClient {
    #[cfg(feature = "agenda")]
    http: reqwest::Client,
    #[cfg(feature = "agenda")]
    config: AgendaConfig,
    logger: crate::logging::StructuredLogger,
}

impl AgendaClient {
    /// Create a new client from configuration
    pub fn new(config: AgendaConfig) -> Result<Self> {
        let logger = crate::logging::get_logger("agenda");
        #[cfg(feature = "agenda")]
        {
            let http = reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(config.timeout_secs))
                .build()?;
            Ok(Self {
                http,
                config,
                logger,
            })
        }
        #[cfg(not(feature = "agenda"))]
        {
            let _ = &config;
            Ok(Self { logger })
        }
    }

    /// Fetch and format today's remaining events.
    ///
    /// Total: any failure along the token or events path degrades to
    /// [`INDISPONIVEL`] rather than propagating.
    #[cfg(feature = "agenda")]
    pub async fn fetch_compromissos(&self, agora: chrono::DateTime<chrono_tz::Tz>) -> String {
        if !self.config.enabled || self.config.calendar_id.is_empty() {
            return INDISPONIVEL.to_string();
        }
        match self.eventos_hoje(agora).await {
            Ok(eventos) => formatar_compromissos(&eventos),
            Err(e) => {
                self.logger.warn(&format!("Calendar read failed: {}", e));
                INDISPONIVEL.to_string()
            }
        }
    }

    /// Stub when the agenda feature is disabled
    #[cfg(not(feature = "agenda"))]
    pub async fn fetch_compromissos(&self, _agora: chrono::DateTime<chrono_tz::Tz>) -> String {
        self.logger.debug("Agenda feature disabled");
        INDISPONIVEL.to_string()
    }

    /// Exchange a service-account JWT for a bearer token
    #[cfg(feature = "agenda")]
    async fn access_token(&self) -> Result<String> {
        use crate::error::PainelError;

        #[derive(serde::Serialize)]
        struct Claims<'a> {
            iss: &'a str,
            scope: &'a str,
            aud: &'a str,
            iat: i64,
            exp: i64,
        }

        let agora = chrono::Utc::now().timestamp();
        let claims = Claims {
            iss: &self.config.service_account_email,
            scope: "https://www.googleapis.com/auth/calendar.readonly",
            aud: &self.config.token_uri,
            iat: agora,
            exp: agora + 3600,
        };

        let key = jsonwebtoken::EncodingKey::from_rsa_pem(self.config.private_key_pem.as_bytes())?;
        let assertion = jsonwebtoken::encode(
            &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::RS256),
            &claims,
            &key,
        )?;

        let response = self
            .http
            .post(&self.config.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        body.get("access_token")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| PainelError::auth("Token response lacks access_token"))
    }

    /// Events between now and the end of the local day
    #[cfg(feature = "agenda")]
    async fn eventos_hoje(
        &self,
        agora: chrono::DateTime<chrono_tz::Tz>,
    ) -> Result<Vec<Evento>> {
        use chrono::TimeZone;

        let token = self.access_token().await?;

        let fim_do_dia = agora
            .timezone()
            .with_ymd_and_hms(
                chrono::Datelike::year(&agora),
                chrono::Datelike::month(&agora),
                chrono::Datelike::day(&agora),
                23,
                59,
                59,
            )
            .single()
            .unwrap_or(agora);

        let url = format!(
            "{}/calendars/{}/events",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.calendar_id
        );
        let response = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .query(&[
                ("timeMin", agora.to_rfc3339().as_str()),
                ("timeMax", fim_do_dia.to_rfc3339().as_str()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        let itens = body
            .get("items")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        let eventos = itens
            .iter()
            .filter_map(|item| {
                let inicio = item.get("start").and_then(|s| {
                    s.get("dateTime")
                        .or_else(|| s.get("date"))
                        .and_then(|v| v.as_str())
                })?;
                let titulo = item
                    .get("summary")
                    .and_then(|v| v.as_str())
                    .unwrap_or("Sem título");
                Some(Evento {
                    inicio: inicio.to_string(),
                    titulo: titulo.to_string(),
                })
            })
            .collect();

        Ok(eventos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_timed_events() {
        let eventos = vec![
            Evento {
                inicio: "2026-08-07T09:30:00-03:00".to_string(),
                titulo: "Dentista".to_string(),
            },
            Evento {
                inicio: "2026-08-07T14:00:00-03:00".to_string(),
                titulo: "Reunião".to_string(),
            },
        ];
        assert_eq!(
            formatar_compromissos(&eventos),
            "09:30 – Dentista<br>14:00 – Reunião"
        );
    }

    #[test]
    fn formats_all_day_events_with_date() {
        let eventos = vec![Evento {
            inicio: "2026-08-07".to_string(),
            titulo: "Aniversário".to_string(),
        }];
        assert_eq!(formatar_compromissos(&eventos), "2026-08-07 – Aniversário");
    }

    #[test]
    fn empty_day_renders_nenhum() {
        assert_eq!(formatar_compromissos(&[]), NENHUM);
    }

    #[test]
    fn event_titles_are_escaped() {
        let eventos = vec![Evento {
            inicio: "2026-08-07T10:00:00-03:00".to_string(),
            titulo: "<script>alert(1)</script>".to_string(),
        }];
        let html = formatar_compromissos(&eventos);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
