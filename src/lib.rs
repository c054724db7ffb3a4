//! # Painel - retro smart panel generator
//!
//! A Rust implementation of the bedroom "smart panel" static dashboard:
//! one run fetches climate and filter state from Home Assistant, the ANEEL
//! tariff flag, a weather one-liner, today's agenda and an optional
//! throughput probe, then assembles a self-contained retro HTML page and
//! writes it to disk for static hosting.
//!
//! ## Features
//!
//! - **Resilient tariff fetch**: bounded retry with exponential backoff,
//!   degrading to a sentinel instead of failing the page
//! - **Graceful degradation**: every data source falls back to a label;
//!   page generation never aborts because an API is down
//! - **Home Assistant**: bearer-token state reads and webhook toggles
//! - **Configuration**: YAML-based configuration with env overrides
//!
//! ## Architecture
//!
//! The application follows a modular architecture with clear separation of concerns:
//!
//! - `config`: Configuration management and validation
//! - `logging`: Structured logging and tracing
//! - `bandeira`: ANEEL tariff-flag fetch with retry and backoff
//! - `ha`: Home Assistant REST client
//! - `tempo`: Weather one-liner fetch
//! - `agenda`: Google Calendar integration
//! - `feriados`: Brazilian holiday calendar
//! - `velocimetro`: Network throughput probe
//! - `pagina`: HTML assembly and output
//! - `gerador`: One-shot generation sequence

pub mod agenda;
pub mod bandeira;
pub mod config;
pub mod error;
pub mod feriados;
pub mod gerador;
pub mod ha;
pub mod logging;
pub mod pagina;
pub mod tempo;
pub mod velocimetro;

// Re-export commonly used types
pub use config::Config;
pub use error::{PainelError, Result};
pub use gerador::Gerador;
