//! Button configuration for the panel sections
//!
//! Buttons are grouped into named sections (Luzes, Dispositivos, Cenas) and
//! come either inline from the YAML configuration or from a CSV file with
//! `secao,label,icone,webhook` columns.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One device-toggle button
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Botao {
    /// Caption under the icon
    pub label: String,

    /// Icon file name under the configured icon base path
    pub icone: String,

    /// Home Assistant webhook id fired on click
    pub webhook: String,
}

/// A named group of buttons
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Secao {
    pub nome: String,
    pub botoes: Vec<Botao>,
}

#[derive(Debug, Deserialize)]
struct LinhaCsv {
    secao: String,
    label: String,
    icone: String,
    webhook: String,
}

/// Load button sections from a CSV file, preserving first-seen section order
pub fn carregar_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Secao>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut secoes: Vec<Secao> = Vec::new();

    for registro in reader.deserialize::<LinhaCsv>() {
        let linha = registro?;
        let botao = Botao {
            label: linha.label,
            icone: linha.icone,
            webhook: linha.webhook,
        };
        match secoes.iter_mut().find(|s| s.nome == linha.secao) {
            Some(secao) => secao.botoes.push(botao),
            None => secoes.push(Secao {
                nome: linha.secao,
                botoes: vec![botao],
            }),
        }
    }

    Ok(secoes)
}
