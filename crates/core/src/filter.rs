#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterQuery {
    pub topic: Option<String>,
    pub sector: Option<String>,
    pub region: Option<String>,
    pub pestle: Option<String>,
    pub source: Option<String>,
    pub country: Option<String>,
    pub end_year: Option<String>,
    pub intensity_min: Option<String>,
    pub intensity_max: Option<String>,
    pub likelihood_min: Option<String>,
    pub likelihood_max: Option<String>,
    pub relevance_min: Option<String>,
    pub relevance_max: Option<String>,
    pub impact_min: Option<String>,
    pub impact_max: Option<String>,
}

impl FilterQuery {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "topic" => &mut query.topic,
                "sector" => &mut query.sector,
                "region" => &mut query.region,
                "pestle" => &mut query.pestle,
                "source" => &mut query.source,
                "country" => &mut query.country,
                "end_year" => &mut query.end_year,
                "intensityMin" => &mut query.intensity_min,
                "intensityMax" => &mut query.intensity_max,
                "likelihoodMin" => &mut query.likelihood_min,
                "likelihoodMax" => &mut query.likelihood_max,
                "relevanceMin" => &mut query.relevance_min,
                "relevanceMax" => &mut query.relevance_max,
                "impactMin" => &mut query.impact_min,
                "impactMax" => &mut query.impact_max,
                _ => continue,
            };
            match slot {
                Some(existing) => {
                    existing.push(',');
                    existing.push_str(&value);
                }
                None => *slot = Some(value),
            }
        }
        query
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightFilter {
    pub topic: Option<Vec<String>>,
    pub sector: Option<Vec<String>>,
    pub region: Option<Vec<String>>,
    pub pestle: Option<Vec<String>>,
    pub source: Option<Vec<String>>,
    pub country: Option<Vec<String>>,
    pub end_year: Option<f64>,
    pub intensity: Option<NumericRange>,
    pub likelihood: Option<NumericRange>,
    pub relevance: Option<NumericRange>,
    pub impact: Option<NumericRange>,
}

impl InsightFilter {
    pub fn match_all() -> Self {
        Self::default()
    }

    pub fn is_match_all(&self) -> bool {
        *self == Self::default()
    }
}

pub fn build_filter(query: &FilterQuery) -> InsightFilter {
    InsightFilter {
        topic: membership_clause(query.topic.as_deref()),
        sector: membership_clause(query.sector.as_deref()),
        region: membership_clause(query.region.as_deref()),
        pestle: membership_clause(query.pestle.as_deref()),
        source: membership_clause(query.source.as_deref()),
        country: membership_clause(query.country.as_deref()),
        end_year: query.end_year.as_deref().and_then(parse_number),
        intensity: range_clause(query.intensity_min.as_deref(), query.intensity_max.as_deref()),
        likelihood: range_clause(query.likelihood_min.as_deref(), query.likelihood_max.as_deref()),
        relevance: range_clause(query.relevance_min.as_deref(), query.relevance_max.as_deref()),
        impact: range_clause(query.impact_min.as_deref(), query.impact_max.as_deref()),
    }
}

pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn membership_clause(raw: Option<&str>) -> Option<Vec<String>> {
    let values: Vec<String> = raw?
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

fn range_clause(min: Option<&str>, max: Option<&str>) -> Option<NumericRange> {
    let min = min.and_then(parse_number);
    let max = max.and_then(parse_number);
    if min.is_none() && max.is_none() {
        None
    } else {
        Some(NumericRange { min, max })
    }
}
