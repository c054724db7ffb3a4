//! Brazilian holiday calendar (national + São Paulo state)
//!
//! Pure date computation: the fixed national holidays plus the
//! Easter-derived movable ones (Carnaval, Sexta-feira Santa, Corpus
//! Christi) and the SP state day. Used for the "Feriado" line of the
//! Agenda section.

use chrono::{Datelike, Duration, NaiveDate};

/// A named holiday on a concrete date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feriado {
    pub data: NaiveDate,
    pub nome: &'static str,
}

/// Gregorian Easter Sunday (anonymous Gauss/Meeus algorithm)
fn pascoa(ano: i32) -> NaiveDate {
    let a = ano % 19;
    let b = ano / 100;
    let c = ano % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let mes = (h + l - 7 * m + 114) / 31;
    let dia = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(ano, mes as u32, dia as u32).unwrap_or_default()
}

/// Every holiday of a year, in calendar order
pub fn feriados_do_ano(ano: i32) -> Vec<Feriado> {
    let fixo = |mes: u32, dia: u32, nome: &'static str| Feriado {
        data: NaiveDate::from_ymd_opt(ano, mes, dia).unwrap_or_default(),
        nome,
    };

    let domingo_pascoa = pascoa(ano);
    let mut feriados = vec![
        fixo(1, 1, "Confraternização Universal"),
        Feriado {
            data: domingo_pascoa - Duration::days(47),
            nome: "Carnaval",
        },
        Feriado {
            data: domingo_pascoa - Duration::days(2),
            nome: "Sexta-feira Santa",
        },
        fixo(4, 21, "Tiradentes"),
        fixo(5, 1, "Dia do Trabalhador"),
        Feriado {
            data: domingo_pascoa + Duration::days(60),
            nome: "Corpus Christi",
        },
        fixo(7, 9, "Revolução Constitucionalista"),
        fixo(9, 7, "Independência do Brasil"),
        fixo(10, 12, "Nossa Senhora Aparecida"),
        fixo(11, 2, "Finados"),
        fixo(11, 15, "Proclamação da República"),
        fixo(11, 20, "Dia Nacional de Zumbi e da Consciência Negra"),
        fixo(12, 25, "Natal"),
    ];

    feriados.sort_by_key(|f| f.data);
    feriados
}

/// Holiday name for a given date, if any
pub fn feriado_em(data: NaiveDate) -> Option<&'static str> {
    feriados_do_ano(data.year())
        .into_iter()
        .find(|f| f.data == data)
        .map(|f| f.nome)
}

/// Next holiday strictly after the given date, within the same year
pub fn proximo_feriado(depois: NaiveDate) -> Option<Feriado> {
    feriados_do_ano(depois.year())
        .into_iter()
        .find(|f| f.data > depois)
}

/// "Feriado" line for the panel: today's holiday name or "Nenhum"
pub fn feriado_hoje_texto(hoje: NaiveDate) -> String {
    feriado_em(hoje).unwrap_or("Nenhum").to_string()
}
