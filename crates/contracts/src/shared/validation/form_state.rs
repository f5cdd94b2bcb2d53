use crate::shared::error::RuleFault;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

/// Flat field -> value snapshot of a form at submit time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    fields: Map<String, Value>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot a form DTO. Field names follow the DTO's serde names.
    pub fn from_dto<T: Serialize>(dto: &T) -> anyhow::Result<Self> {
        match serde_json::to_value(dto)? {
            Value::Object(fields) => Ok(Self { fields }),
            other => anyhow::bail!("form DTO must serialize to an object, got {}", other),
        }
    }

    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            fields: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Text of a field; missing and null read as ""
    pub fn text(&self, field: &str) -> String {
        match self.fields.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Missing, null, or whitespace-only text
    pub fn is_blank(&self, field: &str) -> bool {
        match self.fields.get(field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        }
    }

    pub fn is_set(&self, field: &str) -> bool {
        !self.is_blank(field)
    }

    /// Checkbox-style value: `true`, "true", "1" or a non-zero number
    pub fn flag(&self, field: &str) -> bool {
        match self.fields.get(field) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => matches!(s.trim(), "true" | "1"),
            Some(Value::Number(n)) => n.as_f64().map(|n| n != 0.0).unwrap_or(false),
            _ => false,
        }
    }

    /// Numeric value; blank reads as `None`, unparsable text is a fault
    pub fn number(&self, field: &str) -> Result<Option<f64>, RuleFault> {
        if self.is_blank(field) {
            return Ok(None);
        }
        let fault = || RuleFault::NotANumber {
            field: field.to_string(),
            value: self.text(field),
        };
        match self.fields.get(field) {
            Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(fault),
            Some(Value::String(s)) => s.trim().parse::<f64>().map(Some).map_err(|_| fault()),
            _ => Err(fault()),
        }
    }

    pub fn integer(&self, field: &str) -> Result<Option<i64>, RuleFault> {
        match self.number(field)? {
            Some(n) if n.fract() == 0.0 => Ok(Some(n as i64)),
            Some(_) => Err(RuleFault::NotANumber {
                field: field.to_string(),
                value: self.text(field),
            }),
            None => Ok(None),
        }
    }

    /// Date in `YYYY-MM-DD` form (the value of an `<input type="date">`)
    pub fn date(&self, field: &str) -> Result<Option<NaiveDate>, RuleFault> {
        if self.is_blank(field) {
            return Ok(None);
        }
        let text = self.text(field);
        NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| RuleFault::NotADate {
                field: field.to_string(),
                value: text,
            })
    }
}
