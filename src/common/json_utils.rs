// src/common/json_utils.rs

// Desserializadores tolerantes para linhas vindas do backend ou do armazenamento local.
// Colunas de texto podem chegar como null ou como número (ex.: quantidade = 2).

use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::Value;

/// Texto livre: string, número ou booleano viram string; null vira "".
pub fn free_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!("esperado texto, encontrado {other}"))),
    }
}

/// Texto opcional: ausente ou null viram None.
pub fn optional_free_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!("esperado texto, encontrado {other}"))),
    }
}

/// Identificador que o backend pode devolver como número ou string.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("identificador inválido: {other}"))),
    }
}

/// Lista de textos; null vira lista vazia.
pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Id numérico opcional; aceita também strings numéricas.
pub fn optional_numeric_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map(Some)
            .ok_or_else(|| D::Error::custom("id numérico fora do intervalo")),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => s
            .parse::<i64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("id não numérico: {s}"))),
        other => Err(D::Error::custom(format!("id inválido: {other}"))),
    }
}
