use std::path::{Path, PathBuf};

use insightboard_core::{Insight, InsightFilter, InsightInsert};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use tracing::warn;

use crate::error::Result;
use crate::query::{
    filter_conditions, where_clause, GroupKey, GroupOrder, GroupSummary, GroupValue, HeatmapCell,
    ScatterPoint, TextField,
};

const INSIGHT_COLUMNS: &str = "end_year, intensity, sector, topic, insight, url, region, start_year, impact, added, published, country, relevance, pestle, source, title, likelihood";

#[derive(Debug, Clone)]
pub struct InsightStore {
    path: PathBuf,
}

impl InsightStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        store.init()?;
        Ok(store)
    }

    fn connection(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    fn init(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.execute_batch(
            r#"
            PRAGMA journal_mode = WAL;
            CREATE TABLE IF NOT EXISTS insights (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                end_year REAL,
                intensity REAL,
                sector TEXT,
                topic TEXT,
                insight TEXT,
                url TEXT,
                region TEXT,
                start_year REAL,
                impact REAL,
                added TEXT,
                published TEXT,
                country TEXT,
                relevance REAL,
                pestle TEXT,
                source TEXT,
                title TEXT,
                likelihood REAL
            );
            CREATE INDEX IF NOT EXISTS idx_insights_end_year ON insights(end_year);
            CREATE INDEX IF NOT EXISTS idx_insights_topic ON insights(topic);
            CREATE INDEX IF NOT EXISTS idx_insights_sector ON insights(sector);
            CREATE INDEX IF NOT EXISTS idx_insights_region ON insights(region);
            CREATE INDEX IF NOT EXISTS idx_insights_pestle ON insights(pestle);
            CREATE INDEX IF NOT EXISTS idx_insights_source ON insights(source);
            CREATE INDEX IF NOT EXISTS idx_insights_country ON insights(country);
            "#,
        )?;
        Ok(())
    }

    pub fn ping(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }

    pub fn insert_batch(&self, records: &[InsightInsert]) -> Result<usize> {
        let mut conn = self.connection()?;
        let tx = conn.transaction()?;
        let mut inserted = 0usize;
        for record in records {
            let outcome = tx.execute(
                "INSERT INTO insights (end_year, intensity, sector, topic, insight, url, region, start_year, impact, added, published, country, relevance, pestle, source, title, likelihood) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
                params![
                    record.end_year,
                    record.intensity,
                    record.sector,
                    record.topic,
                    record.insight,
                    record.url,
                    record.region,
                    record.start_year,
                    record.impact,
                    record.added,
                    record.published,
                    record.country,
                    record.relevance,
                    record.pestle,
                    record.source,
                    record.title,
                    record.likelihood
                ],
            );
            match outcome {
                Ok(_) => inserted += 1,
                Err(err) => warn!("insert_skipped" = %err),
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    pub fn delete_all(&self) -> Result<usize> {
        let conn = self.connection()?;
        let removed = conn.execute("DELETE FROM insights", [])?;
        Ok(removed)
    }

    pub fn find(&self, filter: &InsightFilter, offset: u64, limit: u64) -> Result<Vec<Insight>> {
        let (conditions, mut params) = filter_conditions(filter);
        let sql = format!(
            "SELECT id, {INSIGHT_COLUMNS} FROM insights{} ORDER BY id LIMIT ? OFFSET ?",
            where_clause(&conditions)
        );
        params.push(Value::Integer(limit.min(i64::MAX as u64) as i64));
        params.push(Value::Integer(offset.min(i64::MAX as u64) as i64));
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(params), row_to_insight)?;
        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }

    pub fn count(&self, filter: &InsightFilter) -> Result<u64> {
        let (conditions, params) = filter_conditions(filter);
        let sql = format!("SELECT COUNT(*) FROM insights{}", where_clause(&conditions));
        let conn = self.connection()?;
        let total: i64 = conn.query_row(&sql, params_from_iter(params), |row| row.get(0))?;
        Ok(total as u64)
    }

    pub fn distinct_labels(&self, field: TextField) -> Result<Vec<String>> {
        let column = field.column();
        let sql = format!(
            "SELECT DISTINCT {column} FROM insights WHERE {column} IS NOT NULL AND {column} != '' ORDER BY {column} ASC"
        );
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        let mut values = Vec::new();
        for row in rows {
            values.push(row?);
        }
        Ok(values)
    }

    pub fn distinct_end_years(&self) -> Result<Vec<f64>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT end_year FROM insights WHERE end_year IS NOT NULL ORDER BY end_year ASC",
        )?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        let mut years = Vec::new();
        for row in rows {
            years.push(row?);
        }
        Ok(years)
    }

    pub fn group_summaries(
        &self,
        filter: &InsightFilter,
        key: GroupKey,
        order: GroupOrder,
        limit: Option<u32>,
    ) -> Result<Vec<GroupSummary>> {
        let (mut conditions, params) = filter_conditions(filter);
        let column = key.column();
        conditions.push(format!("{column} IS NOT NULL"));
        if !key.is_numeric() {
            conditions.push(format!("{column} != ''"));
        }
        let order_sql = match order {
            GroupOrder::KeyAscending => format!("{column} ASC"),
            GroupOrder::CountDescending => format!("COUNT(*) DESC, {column} ASC"),
        };
        let limit_sql = match limit {
            Some(cap) => format!(" LIMIT {cap}"),
            None => String::new(),
        };
        let sql = format!(
            "SELECT {column}, COUNT(*), AVG(intensity), AVG(likelihood), AVG(relevance) FROM insights{} GROUP BY {column} ORDER BY {order_sql}{limit_sql}",
            where_clause(&conditions)
        );
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(params), |row| {
            let group_key = if key.is_numeric() {
                GroupValue::Year(row.get(0)?)
            } else {
                GroupValue::Label(row.get(0)?)
            };
            Ok(GroupSummary {
                key: group_key,
                count: row.get::<_, i64>(1)? as u64,
                avg_intensity: row.get(2)?,
                avg_likelihood: row.get(3)?,
                avg_relevance: row.get(4)?,
            })
        })?;
        let mut summaries = Vec::new();
        for row in rows {
            summaries.push(row?);
        }
        Ok(summaries)
    }

    pub fn scatter_points(&self, filter: &InsightFilter, limit: u64) -> Result<Vec<ScatterPoint>> {
        let (mut conditions, mut params) = filter_conditions(filter);
        conditions.push("intensity IS NOT NULL".to_string());
        conditions.push("likelihood IS NOT NULL".to_string());
        let sql = format!(
            "SELECT intensity, likelihood, relevance, sector FROM insights{} ORDER BY id LIMIT ?",
            where_clause(&conditions)
        );
        params.push(Value::Integer(limit.min(i64::MAX as u64) as i64));
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(params), |row| {
            Ok(ScatterPoint {
                intensity: row.get(0)?,
                likelihood: row.get(1)?,
                relevance: row.get(2)?,
                sector: row.get(3)?,
            })
        })?;
        let mut points = Vec::new();
        for row in rows {
            points.push(row?);
        }
        Ok(points)
    }

    pub fn heatmap_cells(&self, filter: &InsightFilter) -> Result<Vec<HeatmapCell>> {
        let (mut conditions, params) = filter_conditions(filter);
        conditions.push("topic IS NOT NULL".to_string());
        conditions.push("topic != ''".to_string());
        conditions.push("sector IS NOT NULL".to_string());
        conditions.push("sector != ''".to_string());
        let sql = format!(
            "SELECT topic, sector, COUNT(*), AVG(relevance) FROM insights{} GROUP BY topic, sector ORDER BY topic ASC, sector ASC",
            where_clause(&conditions)
        );
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(params), |row| {
            Ok(HeatmapCell {
                topic: row.get(0)?,
                sector: row.get(1)?,
                count: row.get::<_, i64>(2)? as u64,
                avg_relevance: row.get(3)?,
            })
        })?;
        let mut cells = Vec::new();
        for row in rows {
            cells.push(row?);
        }
        Ok(cells)
    }
}

fn row_to_insight(row: &Row<'_>) -> rusqlite::Result<Insight> {
    Ok(Insight {
        id: row.get(0)?,
        end_year: row.get(1)?,
        intensity: row.get(2)?,
        sector: row.get(3)?,
        topic: row.get(4)?,
        insight: row.get(5)?,
        url: row.get(6)?,
        region: row.get(7)?,
        start_year: row.get(8)?,
        impact: row.get(9)?,
        added: row.get(10)?,
        published: row.get(11)?,
        country: row.get(12)?,
        relevance: row.get(13)?,
        pestle: row.get(14)?,
        source: row.get(15)?,
        title: row.get(16)?,
        likelihood: row.get(17)?,
    })
}
