//! Page assembly and output
//!
//! Builds the self-contained HTML document: retro green-on-black CRT
//! styling, the boot-screen animation, the device-toggle button grid and
//! the data sections, then writes it to every configured output path for
//! static hosting.

pub mod botoes;

use crate::config::PaginaConfig;
use crate::error::Result;
use crate::logging::get_logger;
use self::botoes::Secao;
use std::path::Path;

/// Everything the template interpolates, already formatted as panel text.
///
/// `compromissos` is a pre-rendered HTML fragment (escaped lines joined
/// with `<br>`); every other field is plain text and is escaped here.
#[derive(Debug, Clone)]
pub struct DadosPainel {
    pub data_hora: String,
    pub feriado: String,
    pub proximo_feriado: String,
    pub compromissos: String,
    pub tempo: String,
    pub velocidade: String,
    pub limpeza: String,
    pub bandeira: String,
    pub clima_quarto: String,
}

/// Minimal HTML escaping for interpolated text and attribute values
pub fn escape_html(texto: &str) -> String {
    let mut saida = String::with_capacity(texto.len());
    for c in texto.chars() {
        match c {
            '&' => saida.push_str("&amp;"),
            '<' => saida.push_str("&lt;"),
            '>' => saida.push_str("&gt;"),
            '"' => saida.push_str("&quot;"),
            '\'' => saida.push_str("&#39;"),
            _ => saida.push(c),
        }
    }
    saida
}

/// One button section: heading plus the icon grid
fn render_secao(secao: &Secao, icones_base: &str) -> String {
    if secao.botoes.is_empty() {
        return String::new();
    }
    let blocos: String = secao
        .botoes
        .iter()
        .map(|b| {
            format!(
                "<div class='btn' onclick=\"toggle('{}')\"><img src='{}/{}'><br>{}</div>",
                escape_html(&b.webhook),
                icones_base,
                escape_html(&b.icone),
                escape_html(&b.label)
            )
        })
        .collect();
    format!(
        "<div class='section'><h3>{}</h3><div class='grid'>{}</div></div>",
        escape_html(&secao.nome),
        blocos
    )
}

fn render_agenda(dados: &DadosPainel) -> String {
    format!(
        "<div class='section'><h3>Agenda</h3><p id='dh'>{}</p><p>Feriado: {}</p><p>{}</p><p>Compromissos:<br>{}</p></div>",
        escape_html(&dados.data_hora),
        escape_html(&dados.feriado),
        escape_html(&dados.proximo_feriado),
        dados.compromissos
    )
}

fn render_tempo(tempo: &str) -> String {
    format!(
        "<div class='section'><h3>Tempo</h3><p>{}</p></div>",
        escape_html(tempo)
    )
}

fn render_sistema(dados: &DadosPainel) -> String {
    format!(
        "<div class='section'><h3>Sistema</h3>\
         <p>Velocidade da Internet: {}</p>\
         <p>Limpeza dos Filtros do Ar-condicionado: {}</p>\
         <p>⚠ Bandeira Tarifária: {}</p>\
         <p>Quarto: {}</p></div>",
        escape_html(&dados.velocidade),
        escape_html(&dados.limpeza),
        escape_html(&dados.bandeira),
        escape_html(&dados.clima_quarto)
    )
}

const ESTILO: &str = "\
body {margin:0;background:#000;color:#0f0;font-family:'VT323',monospace;}\n\
.outer {border:2px solid #0f0;max-width:700px;margin:10px auto;padding:10px;display:none;}\n\
.section {border:1px solid #0f0;margin-top:10px;padding:10px;}\n\
.section h3 {margin:0 0 5px;border-bottom:1px dashed #0f0;padding-bottom:5px;text-transform:uppercase;}\n\
.grid {display:flex;gap:10px;flex-wrap:wrap;}\n\
.btn {border:1px solid #0f0;padding:5px;text-align:center;cursor:pointer;}\n\
.btn img {width:32px;height:32px;}\n\
#bootScreen {white-space:pre;background:#000;color:#0f0;padding:20px;font-size:1em;}\n\
@keyframes blink {50% {opacity:0;}}";

/// Inline script: webhook toggles plus the boot-screen typewriter
fn render_script(nabu_base: &str) -> String {
    format!(
        r#"function toggle(wh) {{
  fetch('{nabu}/api/webhook/' + wh, {{ method: 'POST' }});
}}
const bootLines = [
  'Phoenix Technologies Ltd. Version 4.06',
  'Memory Testing: 524288K OK',
  'PAINEL OS v{versao}',
  'Loading DOS...',
  'Starting Smart Panel Interface...'
];
let idx = 0;
function showNext() {{
  const el = document.getElementById('bootScreen');
  if (idx < bootLines.length) {{
    el.innerText += bootLines[idx] + '\n';
    idx++;
    setTimeout(showNext, 300);
  }} else {{
    setTimeout(() => {{
      document.getElementById('bootScreen').style.display = 'none';
      document.querySelector('.outer').style.display = 'block';
    }}, 1000);
  }}
}}
document.addEventListener('DOMContentLoaded', () => {{
  const som = document.getElementById('bootSound');
  if (som) {{ som.play().catch(() => {{}}); }}
  showNext();
}});"#,
        nabu = nabu_base.trim_end_matches('/'),
        versao = env!("APP_VERSION"),
    )
}

/// Assemble the full document
pub fn render_documento(
    config: &PaginaConfig,
    nabu_base: &str,
    secoes: &[Secao],
    dados: &DadosPainel,
) -> String {
    let mut html = format!(
        "<!DOCTYPE html>\n<html><head><meta charset='UTF-8'>\n<title>{}</title>\n\
         <link href='https://fonts.googleapis.com/css2?family=VT323&display=swap' rel='stylesheet'>\n\
         <style>\n{}\n</style>\n<script>\n{}\n</script></head>\n\
         <body><audio id='bootSound' src='{}'></audio>\n\
         <div id='bootScreen'></div>\n<div class='outer'>\n",
        escape_html(&config.titulo),
        ESTILO,
        render_script(nabu_base),
        escape_html(&config.boot_sound),
    );

    for secao in secoes {
        html.push_str(&render_secao(secao, &config.icones_base));
        html.push('\n');
    }

    html.push_str(&render_agenda(dados));
    html.push('\n');
    html.push_str(&render_tempo(&dados.tempo));
    html.push('\n');
    html.push_str(&render_sistema(dados));
    html.push_str("\n</div></body></html>\n");
    html
}

/// Write the document to every configured output path
pub fn write_outputs(config: &PaginaConfig, html: &str) -> Result<()> {
    let logger = get_logger("pagina");
    for output in &config.outputs {
        let path = Path::new(output);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, html)?;
        logger.info(&format!("Wrote {} bytes to {}", html.len(), output));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::botoes::Botao;

    fn dados_exemplo() -> DadosPainel {
        DadosPainel {
            data_hora: "07/08/2026 21:15".to_string(),
            feriado: "Nenhum".to_string(),
            proximo_feriado: "Próximo feriado: Independência do Brasil em 07/09/2026".to_string(),
            compromissos: "09:30 – Dentista".to_string(),
            tempo: "☀️ Ensolarado +23°C Humidity 48%".to_string(),
            velocidade: "230 ↓ / 41 ↑".to_string(),
            limpeza: "OK".to_string(),
            bandeira: "VERDE".to_string(),
            clima_quarto: "23.5°C / 48%".to_string(),
        }
    }

    #[test]
    fn escape_html_covers_special_characters() {
        assert_eq!(escape_html("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&#39;");
        assert_eq!(escape_html("sem especiais"), "sem especiais");
    }

    #[test]
    fn document_contains_all_sections() {
        let config = PaginaConfig::default();
        let secoes = vec![Secao {
            nome: "Luzes".to_string(),
            botoes: vec![Botao {
                label: "Quarto".to_string(),
                icone: "luz_on.svg".to_string(),
                webhook: "wh_luz_quarto".to_string(),
            }],
        }];
        let html = render_documento(
            &config,
            "https://hooks.nabu.casa",
            &secoes,
            &dados_exemplo(),
        );

        assert!(html.contains("<title>Painel Quarto</title>"));
        assert!(html.contains("<h3>Luzes</h3>"));
        assert!(html.contains("toggle('wh_luz_quarto')"));
        assert!(html.contains("Bandeira Tarifária: VERDE"));
        assert!(html.contains("https://hooks.nabu.casa/api/webhook/"));
        assert!(html.contains("bootScreen"));
        assert!(html.contains("VT323"));
    }

    #[test]
    fn empty_section_renders_nothing() {
        let secao = Secao {
            nome: "Cenas".to_string(),
            botoes: Vec::new(),
        };
        assert_eq!(render_secao(&secao, "assets/icones"), "");
    }

    #[test]
    fn dynamic_text_is_escaped() {
        let mut dados = dados_exemplo();
        dados.tempo = "<img onerror=x>".to_string();
        let html = render_documento(&PaginaConfig::default(), "", &[], &dados);
        assert!(!html.contains("<img onerror"));
        assert!(html.contains("&lt;img onerror=x&gt;"));
    }

    #[test]
    fn outputs_are_written_with_parents() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = PaginaConfig::default();
        config.outputs = vec![
            dir.path().join("index.html").to_string_lossy().to_string(),
            dir.path()
                .join("docs/index.html")
                .to_string_lossy()
                .to_string(),
        ];

        write_outputs(&config, "<html></html>").unwrap();

        for output in &config.outputs {
            assert_eq!(std::fs::read_to_string(output).unwrap(), "<html></html>");
        }
    }
}
