use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: i64,
    pub end_year: Option<f64>,
    pub intensity: Option<f64>,
    pub sector: Option<String>,
    pub topic: Option<String>,
    pub insight: Option<String>,
    pub url: Option<String>,
    pub region: Option<String>,
    pub start_year: Option<f64>,
    pub impact: Option<f64>,
    pub added: Option<String>,
    pub published: Option<String>,
    pub country: Option<String>,
    pub relevance: Option<f64>,
    pub pestle: Option<String>,
    pub source: Option<String>,
    pub title: Option<String>,
    pub likelihood: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightInsert {
    pub end_year: Option<f64>,
    pub intensity: Option<f64>,
    pub sector: Option<String>,
    pub topic: Option<String>,
    pub insight: Option<String>,
    pub url: Option<String>,
    pub region: Option<String>,
    pub start_year: Option<f64>,
    pub impact: Option<f64>,
    pub added: Option<String>,
    pub published: Option<String>,
    pub country: Option<String>,
    pub relevance: Option<f64>,
    pub pestle: Option<String>,
    pub source: Option<String>,
    pub title: Option<String>,
    pub likelihood: Option<f64>,
}

pub fn normalize_record(raw: &Value) -> InsightInsert {
    InsightInsert {
        end_year: nullable_number(raw.get("end_year")),
        intensity: nullable_number(raw.get("intensity")),
        sector: nullable_text(raw.get("sector")),
        topic: nullable_text(raw.get("topic")),
        insight: nullable_text(raw.get("insight")),
        url: nullable_text(raw.get("url")),
        region: nullable_text(raw.get("region")),
        start_year: nullable_number(raw.get("start_year")),
        impact: nullable_number(raw.get("impact")),
        added: nullable_text(raw.get("added")),
        published: nullable_text(raw.get("published")),
        country: nullable_text(raw.get("country")),
        relevance: nullable_number(raw.get("relevance")),
        pestle: nullable_text(raw.get("pestle")),
        source: nullable_text(raw.get("source")),
        title: nullable_text(raw.get("title")),
        likelihood: nullable_number(raw.get("likelihood")),
    }
}

pub fn nullable_number(raw: Option<&Value>) -> Option<f64> {
    match raw? {
        Value::Number(number) => number.as_f64().filter(|n| n.is_finite()),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

pub fn nullable_text(raw: Option<&Value>) -> Option<String> {
    match raw? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}
