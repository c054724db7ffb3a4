//! One-shot panel generation
//!
//! Runs the fetch-assemble-write sequence: every external data point is
//! gathered sequentially through its own client, degraded values included,
//! and the resulting document is written to the configured outputs. Only
//! configuration, rendering and file I/O failures propagate; data sources
//! never abort a run.

use crate::agenda::AgendaClient;
use crate::bandeira::BandeiraClient;
use crate::config::Config;
use crate::error::{PainelError, Result};
use crate::feriados;
use crate::ha::HaClient;
use crate::logging::get_logger;
use crate::pagina::{self, DadosPainel, botoes::Secao};
use crate::tempo::TempoClient;
use crate::velocimetro::{self, Velocimetro};
use chrono_tz::Tz;
use std::str::FromStr;

/// Panel generator
pub struct Gerador {
    config: Config,
    logger: crate::logging::StructuredLogger,
}

impl Gerador {
    /// Create a new generator for a validated configuration
    pub fn new(config: Config) -> Self {
        let logger = get_logger("gerador");
        Self { config, logger }
    }

    /// Run the full generation sequence once
    pub async fn executar(&self) -> Result<()> {
        let tz = Tz::from_str(&self.config.timezone)
            .map_err(|_| PainelError::config(format!("Bad timezone: {}", self.config.timezone)))?;
        let agora = chrono::Utc::now().with_timezone(&tz);
        let hoje = agora.date_naive();
        let data_hora = agora.format("%d/%m/%Y %H:%M").to_string();

        self.logger
            .info(&format!("Generating panel for {}", data_hora));

        let ha = HaClient::new(self.config.ha.clone())?;
        let clima_quarto = ha.climate_summary().await;
        let limpeza = ha.filter_status().await;

        let bandeira = BandeiraClient::new(self.config.bandeira.clone())?
            .fetch()
            .await;

        let tempo = TempoClient::new(self.config.tempo.clone())?.fetch().await;

        let compromissos = AgendaClient::new(self.config.agenda.clone())?
            .fetch_compromissos(agora)
            .await;

        let velocidade = velocimetro::formatar_medicao(
            Velocimetro::new(self.config.velocimetro.clone())?.medir().await,
        );

        let feriado = feriados::feriado_hoje_texto(hoje);
        let proximo_feriado = match feriados::proximo_feriado(hoje) {
            Some(f) => format!(
                "Próximo feriado: {} em {}",
                f.nome,
                f.data.format("%d/%m/%Y")
            ),
            None => "Não há mais feriados este ano".to_string(),
        };

        let dados = DadosPainel {
            data_hora,
            feriado,
            proximo_feriado,
            compromissos,
            tempo,
            velocidade,
            limpeza,
            bandeira,
            clima_quarto,
        };

        let secoes = self.carregar_secoes()?;
        let html = pagina::render_documento(
            &self.config.pagina,
            &self.config.ha.nabu_base_url,
            &secoes,
            &dados,
        );
        pagina::write_outputs(&self.config.pagina, &html)
    }

    /// Button sections from CSV when configured, inline YAML otherwise
    fn carregar_secoes(&self) -> Result<Vec<Secao>> {
        match &self.config.pagina.botoes_csv {
            Some(path) => {
                self.logger
                    .debug(&format!("Loading button sections from {}", path));
                pagina::botoes::carregar_csv(path)
            }
            None => Ok(self.config.pagina.secoes.clone()),
        }
    }
}
