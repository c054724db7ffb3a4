//! Network throughput probe
//!
//! Timed download/upload legs against an HTTP measurement endpoint,
//! reported as whole Mbps. Sits behind the `velocimetro` feature; without
//! it (or with the probe disabled in configuration) the Sistema section
//! shows the sentinel.

use crate::bandeira::SENTINELA;
use crate::config::VelocimetroConfig;
use crate::error::Result;

/// Result of one probe run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Medicao {
    pub download_mbps: u32,
    pub upload_mbps: u32,
}

/// Panel line for a measurement, e.g. `"230 ↓ / 41 ↑"`
pub fn formatar_medicao(medicao: Option<Medicao>) -> String {
    match medicao {
        Some(m) => format!("{} ↓ / {} ↑", m.download_mbps, m.upload_mbps),
        None => SENTINELA.to_string(),
    }
}

/// Whole Mbps for a transferred byte count and elapsed time
fn mbps(bytes: usize, segundos: f64) -> u32 {
    if segundos <= 0.0 {
        return 0;
    }
    ((bytes as f64) * 8.0 / segundos / 1e6) as u32
}

/// Throughput prober (feature `velocimetro`)
pub struct Velocimetro {
    #[cfg(feature = "velocimetro")]
    http: reqwest::Client,
    #[cfg(feature = "velocimetro")]
    config: VelocimetroConfig,
    logger: crate::logging::StructuredLogger,
}

impl Velocimetro {
    /// Create a new prober from configuration
    pub fn new(config: VelocimetroConfig) -> Result<Self> {
        let logger = crate::logging::get_logger("velocimetro");
        #[cfg(feature = "velocimetro")]
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
        #[cfg(not(feature = "velocimetro"))]
        {
            let _ = &config;
            Ok(Self { logger })
        }
    }

    /// Run both legs; `None` when disabled or when either leg fails
    #[cfg(feature = "velocimetro")]
    pub async fn medir(&self) -> Option<Medicao> {
        if !self.config.enabled {
            return None;
        }

        let download_mbps = match self.medir_download().await {
            Ok(v) => v,
            Err(e) => {
                self.logger.warn(&format!("Download leg failed: {}", e));
                return None;
            }
        };
        let upload_mbps = match self.medir_upload().await {
            Ok(v) => v,
            Err(e) => {
                self.logger.warn(&format!("Upload leg failed: {}", e));
                return None;
            }
        };

        self.logger.info(&format!(
            "Throughput: {} Mbps down, {} Mbps up",
            download_mbps, upload_mbps
        ));
        Some(Medicao {
            download_mbps,
            upload_mbps,
        })
    }

    /// Stub when the velocimetro feature is disabled
    #[cfg(not(feature = "velocimetro"))]
    pub async fn medir(&self) -> Option<Medicao> {
        self.logger.debug("Velocimetro feature disabled");
        None
    }

    #[cfg(feature = "velocimetro")]
    async fn medir_download(&self) -> Result<u32> {
        let inicio = std::time::Instant::now();
        let corpo = self
            .http
            .get(&self.config.download_url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(mbps(corpo.len(), inicio.elapsed().as_secs_f64()))
    }

    #[cfg(feature = "velocimetro")]
    async fn medir_upload(&self) -> Result<u32> {
        let corpo = vec![0u8; self.config.upload_bytes];
        let tamanho = corpo.len();
        let inicio = std::time::Instant::now();
        self.http
            .post(&self.config.upload_url)
            .body(corpo)
            .send()
            .await?
            .error_for_status()?;
        Ok(mbps(tamanho, inicio.elapsed().as_secs_f64()))
    }
}
