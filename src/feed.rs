//! Decoder for the fantasy game's player feed (`{"Data": {"Value": [...]}}`).
//! Field names, misspellings included, are the feed's own.

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::error::FeedError;
use crate::model::entity::{Catalog, Pick, PickId, PickKind};

#[derive(Deserialize)]
struct Feed {
    #[serde(rename = "Data")]
    data: FeedData,
}

#[derive(Deserialize)]
struct FeedData {
    #[serde(rename = "Value")]
    value: Vec<FeedEntry>,
}

#[derive(Deserialize)]
struct FeedEntry {
    #[serde(rename = "PlayerId")]
    player_id: Value,
    #[serde(rename = "PositionName")]
    position_name: String,
    #[serde(rename = "FUllName")]
    full_name: String,
    #[serde(rename = "OverallPpints", default)]
    overall_points: Value,
    #[serde(rename = "Value", default)]
    value: Value,
    #[serde(rename = "TeamId")]
    team_id: Value,
}

fn to_id(value: &Value) -> Result<PickId, FeedError> {
    let parsed = match value {
        Value::Number(number) => number.as_u64().and_then(|id| PickId::try_from(id).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| FeedError::BadId(value.to_string()))
}

/// Absent, null and empty fields read as zero.
fn to_float(value: &Value, id: PickId, field: &'static str) -> Result<f64, FeedError> {
    let bad = || FeedError::BadNumber { id, field, value: value.to_string() };
    match value {
        Value::Null => Ok(0.0),
        Value::Number(number) => number.as_f64().ok_or_else(bad),
        Value::String(text) if text.trim().is_empty() => Ok(0.0),
        Value::String(text) => text.trim().parse().map_err(|_| bad()),
        _ => Err(bad()),
    }
}

fn to_kind(name: &str, id: PickId) -> Result<PickKind, FeedError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "driver" => Ok(PickKind::Driver),
        "constructor" => Ok(PickKind::Constructor),
        _ => Err(FeedError::UnknownKind { id, kind: name.to_string() }),
    }
}

impl FeedEntry {
    fn into_pick(self) -> Result<Pick, FeedError> {
        let id = to_id(&self.player_id)?;
        Ok(Pick {
            id,
            kind: to_kind(&self.position_name, id)?,
            name: self.full_name,
            score: to_float(&self.overall_points, id, "OverallPpints")?,
            cost: to_float(&self.value, id, "Value")?,
            affiliation: to_id(&self.team_id)?,
        })
    }
}

pub fn parse_feed(json: &str) -> Result<Catalog, FeedError> {
    let feed: Feed = serde_json::from_str(json)?;
    let mut catalog = Catalog::new();
    for entry in feed.data.value {
        catalog.insert(entry.into_pick()?)?;
    }
    debug!("decoded {} picks from feed", catalog.len());
    Ok(catalog)
}
