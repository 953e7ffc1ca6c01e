// src/common/format.rs

// Máscaras e utilitários de texto usados pelos formulários e pelas buscas.

use std::fmt;

pub const ALWAYS_OPEN: &str = "24 horas";

fn digits(value: &str, max: usize) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).take(max).collect()
}

/// Aplica a máscara de telefone brasileiro: `(11) 2345-6789` ou `(11) 92345-6789`.
pub fn format_phone(value: &str) -> String {
    let d = digits(value, 11);
    match d.len() {
        0 => String::new(),
        1..=2 => format!("({d}"),
        3..=6 => format!("({}) {}", &d[..2], &d[2..]),
        7..=10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        _ => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
    }
}

/// Aplica a máscara de CEP: `01001-000`.
pub fn format_zip(value: &str) -> String {
    let d = digits(value, 8);
    if d.len() <= 5 {
        return d;
    }
    format!("{}-{}", &d[..5], &d[5..])
}

/// Apenas os dígitos do CEP, para consultas.
pub fn zip_digits(value: &str) -> String {
    digits(value, usize::MAX)
}

/// `#####-###`
pub fn is_formatted_zip(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 9
        && bytes[5] == b'-'
        && bytes[..5].iter().all(u8::is_ascii_digit)
        && bytes[6..].iter().all(u8::is_ascii_digit)
}

/// `(xx) xxxx-xxxx` ou `(xx) xxxxx-xxxx`
pub fn is_formatted_phone(value: &str) -> bool {
    let Some(rest) = value.strip_prefix('(') else {
        return false;
    };
    let Some((area, number)) = rest.split_once(") ") else {
        return false;
    };
    let Some((prefix, suffix)) = number.split_once('-') else {
        return false;
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    area.len() == 2
        && all_digits(area)
        && (prefix.len() == 4 || prefix.len() == 5)
        && all_digits(prefix)
        && suffix.len() == 4
        && all_digits(suffix)
}

/// Busca por substring sem diferenciar maiúsculas. `needle` já deve estar em minúsculas.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn is_clock(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && bytes[..2].iter().all(u8::is_ascii_digit)
        && bytes[3..].iter().all(u8::is_ascii_digit)
}

// Horário de atendimento como os formulários o produzem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpeningHours {
    AlwaysOpen,
    Range { opens_at: String, closes_at: String },
    FreeText(String),
}

impl OpeningHours {
    pub fn parse(hours: &str) -> Self {
        let trimmed = hours.trim();
        if trimmed == ALWAYS_OPEN || trimmed.to_lowercase().contains("24h") {
            return OpeningHours::AlwaysOpen;
        }

        if let Some((start, end)) = trimmed.split_once("às") {
            let (start, end) = (start.trim(), end.trim());
            if is_clock(start) && is_clock(end) {
                return OpeningHours::Range {
                    opens_at: start.to_string(),
                    closes_at: end.to_string(),
                };
            }
        }

        OpeningHours::FreeText(trimmed.to_string())
    }

    /// Um horário com "às" mas sem os dois relógios completos é um agendamento pela metade.
    pub fn is_incomplete_range(&self) -> bool {
        matches!(self, OpeningHours::FreeText(text) if text.contains("às"))
    }
}

/// Monta o texto do horário a partir dos dois campos do formulário.
pub fn format_hours(opens_at: &str, closes_at: &str) -> String {
    OpeningHours::Range {
        opens_at: opens_at.trim().to_string(),
        closes_at: closes_at.trim().to_string(),
    }
    .to_string()
}

/// Reescreve um intervalo completo no formato padrão; outros textos ficam como vieram.
pub fn normalize_hours(hours: &str) -> String {
    match OpeningHours::parse(hours) {
        OpeningHours::Range { opens_at, closes_at } => format_hours(&opens_at, &closes_at),
        _ => hours.to_string(),
    }
}

impl fmt::Display for OpeningHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpeningHours::AlwaysOpen => f.write_str(ALWAYS_OPEN),
            OpeningHours::Range { opens_at, closes_at } => write!(f, "{opens_at} às {closes_at}"),
            OpeningHours::FreeText(text) => f.write_str(text),
        }
    }
}
