use insightboard_core::{InsightFilter, NumericRange};
use rusqlite::types::Value;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Topic,
    Sector,
    Region,
    Pestle,
    Source,
    Country,
}

impl TextField {
    pub fn column(self) -> &'static str {
        match self {
            TextField::Topic => "topic",
            TextField::Sector => "sector",
            TextField::Region => "region",
            TextField::Pestle => "pestle",
            TextField::Source => "source",
            TextField::Country => "country",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    EndYear,
    Country,
    Sector,
    Region,
    Pestle,
}

impl GroupKey {
    pub fn column(self) -> &'static str {
        match self {
            GroupKey::EndYear => "end_year",
            GroupKey::Country => "country",
            GroupKey::Sector => "sector",
            GroupKey::Region => "region",
            GroupKey::Pestle => "pestle",
        }
    }

    pub(crate) fn is_numeric(self) -> bool {
        matches!(self, GroupKey::EndYear)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOrder {
    KeyAscending,
    CountDescending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GroupValue {
    Year(f64),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    #[serde(rename = "_id")]
    pub key: GroupValue,
    pub count: u64,
    pub avg_intensity: Option<f64>,
    pub avg_likelihood: Option<f64>,
    pub avg_relevance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub intensity: f64,
    pub likelihood: f64,
    pub relevance: Option<f64>,
    pub sector: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapCell {
    pub topic: String,
    pub sector: String,
    pub count: u64,
    pub avg_relevance: Option<f64>,
}

pub(crate) fn filter_conditions(filter: &InsightFilter) -> (Vec<String>, Vec<Value>) {
    let mut conditions = Vec::new();
    let mut params = Vec::new();
    push_membership(&mut conditions, &mut params, "topic", filter.topic.as_deref());
    push_membership(&mut conditions, &mut params, "sector", filter.sector.as_deref());
    push_membership(&mut conditions, &mut params, "region", filter.region.as_deref());
    push_membership(&mut conditions, &mut params, "pestle", filter.pestle.as_deref());
    push_membership(&mut conditions, &mut params, "source", filter.source.as_deref());
    push_membership(&mut conditions, &mut params, "country", filter.country.as_deref());
    if let Some(year) = filter.end_year {
        conditions.push("end_year = ?".to_string());
        params.push(Value::Real(year));
    }
    push_range(&mut conditions, &mut params, "intensity", filter.intensity);
    push_range(&mut conditions, &mut params, "likelihood", filter.likelihood);
    push_range(&mut conditions, &mut params, "relevance", filter.relevance);
    push_range(&mut conditions, &mut params, "impact", filter.impact);
    (conditions, params)
}

pub(crate) fn where_clause(conditions: &[String]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

fn push_membership(
    conditions: &mut Vec<String>,
    params: &mut Vec<Value>,
    column: &str,
    values: Option<&[String]>,
) {
    let Some(values) = values else { return };
    if values.is_empty() {
        return;
    }
    let placeholders = vec!["?"; values.len()].join(", ");
    conditions.push(format!("{column} IN ({placeholders})"));
    params.extend(values.iter().map(|value| Value::Text(value.clone())));
}

fn push_range(
    conditions: &mut Vec<String>,
    params: &mut Vec<Value>,
    column: &str,
    range: Option<NumericRange>,
) {
    let Some(range) = range else { return };
    if let Some(min) = range.min {
        conditions.push(format!("{column} >= ?"));
        params.push(Value::Real(min));
    }
    if let Some(max) = range.max {
        conditions.push(format!("{column} <= ?"));
        params.push(Value::Real(max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insightboard_core::{build_filter, FilterQuery};

    #[test]
    fn match_all_renders_no_conditions() {
        let (conditions, params) = filter_conditions(&InsightFilter::match_all());
        assert!(conditions.is_empty());
        assert!(params.is_empty());
        assert_eq!(where_clause(&conditions), "");
    }

    #[test]
    fn membership_renders_one_placeholder_per_value() {
        let filter = InsightFilter {
            topic: Some(vec!["gas".to_string(), "oil".to_string()]),
            ..InsightFilter::default()
        };
        let (conditions, params) = filter_conditions(&filter);
        assert_eq!(conditions, vec!["topic IN (?, ?)".to_string()]);
        assert_eq!(
            params,
            vec![
                Value::Text("gas".to_string()),
                Value::Text("oil".to_string())
            ]
        );
    }

    #[test]
    fn full_query_renders_in_declaration_order() {
        let query = FilterQuery {
            country: Some("India".to_string()),
            end_year: Some("2025".to_string()),
            intensity_min: Some("2".to_string()),
            intensity_max: Some("8".to_string()),
            ..FilterQuery::default()
        };
        let (conditions, params) = filter_conditions(&build_filter(&query));
        assert_eq!(
            conditions,
            vec![
                "country IN (?)".to_string(),
                "end_year = ?".to_string(),
                "intensity >= ?".to_string(),
                "intensity <= ?".to_string(),
            ]
        );
        assert_eq!(
            params,
            vec![
                Value::Text("India".to_string()),
                Value::Real(2025.0),
                Value::Real(2.0),
                Value::Real(8.0),
            ]
        );
        assert_eq!(
            where_clause(&conditions),
            " WHERE country IN (?) AND end_year = ? AND intensity >= ? AND intensity <= ?"
        );
    }

    #[test]
    fn one_sided_range_renders_single_condition() {
        let filter = InsightFilter {
            relevance: Some(insightboard_core::NumericRange {
                min: None,
                max: Some(4.0),
            }),
            ..InsightFilter::default()
        };
        let (conditions, params) = filter_conditions(&filter);
        assert_eq!(conditions, vec!["relevance <= ?".to_string()]);
        assert_eq!(params, vec![Value::Real(4.0)]);
    }

    #[test]
    fn summaries_serialize_with_wire_names() {
        let year_group = GroupSummary {
            key: GroupValue::Year(2025.0),
            count: 2,
            avg_intensity: Some(7.0),
            avg_likelihood: None,
            avg_relevance: Some(3.0),
        };
        assert_eq!(
            serde_json::to_value(&year_group).expect("serialize"),
            serde_json::json!({
                "_id": 2025.0,
                "count": 2,
                "avgIntensity": 7.0,
                "avgLikelihood": null,
                "avgRelevance": 3.0
            })
        );

        let label_group = GroupSummary {
            key: GroupValue::Label("Energy".to_string()),
            count: 3,
            avg_intensity: None,
            avg_likelihood: None,
            avg_relevance: None,
        };
        let wire = serde_json::to_value(&label_group).expect("serialize");
        assert_eq!(wire["_id"], serde_json::json!("Energy"));
    }
}
