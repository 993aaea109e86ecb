use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 經緯度座標，不做範圍檢查，錯誤值交由服務商回報
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lng, self.lat)
    }
}

/// 客戶端的交通方式，無法辨識時一律視為步行
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Walking,
    Cycling,
    Driving,
}

impl TravelMode {
    pub fn from_param(value: &str) -> Self {
        match value {
            "cycling" => TravelMode::Cycling,
            "driving" => TravelMode::Driving,
            _ => TravelMode::Walking,
        }
    }
}

impl From<String> for TravelMode {
    fn from(value: String) -> Self {
        TravelMode::from_param(&value)
    }
}

/// Which assumed-speed table a radius is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedTable {
    Poi,
    Analysis,
}

/// One leg of a bulk request. `key` is the entry exactly as the client sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkTarget {
    pub key: String,
    pub coordinate: Coordinate,
}

pub type BulkResult = BTreeMap<String, serde_json::Value>;

/// 解析 "lng,lat;lng,lat" 格式的目標清單
///
/// Entries that are not two floats are skipped; they never reach the provider
/// and are therefore absent from the bulk result.
pub fn parse_targets(raw: &str) -> Vec<BulkTarget> {
    raw.split(';')
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match parse_pair(entry) {
            Some(coordinate) => Some(BulkTarget {
                key: entry.to_string(),
                coordinate,
            }),
            None => {
                tracing::warn!("⚠️ Skipping malformed bulk target: {:?}", entry);
                None
            }
        })
        .collect()
}

fn parse_pair(entry: &str) -> Option<Coordinate> {
    let mut parts = entry.split(',');
    let lng = parts.next()?.parse::<f64>().ok()?;
    let lat = parts.next()?.parse::<f64>().ok()?;

    if parts.next().is_some() {
        return None;
    }

    Some(Coordinate::new(lng, lat))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_display_is_lng_lat() {
        assert_eq!(Coordinate::new(8.681495, 49.41461).to_string(), "8.681495,49.41461");
        assert_eq!(Coordinate::new(10.0, 20.0).to_string(), "10,20");
    }

    #[test]
    fn test_travel_mode_falls_back_to_walking() {
        assert_eq!(TravelMode::from_param("cycling"), TravelMode::Cycling);
        assert_eq!(TravelMode::from_param("driving"), TravelMode::Driving);
        assert_eq!(TravelMode::from_param("walking"), TravelMode::Walking);
        assert_eq!(TravelMode::from_param("teleport"), TravelMode::Walking);
        assert_eq!(TravelMode::from_param("Driving"), TravelMode::Walking);
        assert_eq!(TravelMode::from_param(""), TravelMode::Walking);
    }

    #[test]
    fn test_travel_mode_deserializes_leniently() {
        let mode: TravelMode = serde_json::from_str("\"driving\"").unwrap();
        assert_eq!(mode, TravelMode::Driving);

        let mode: TravelMode = serde_json::from_str("\"hovercraft\"").unwrap();
        assert_eq!(mode, TravelMode::Walking);
    }

    #[test]
    fn test_parse_targets_keeps_order_and_raw_keys() {
        let targets = parse_targets("10,20;30.50,40");

        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].key, "10,20");
        assert_eq!(targets[0].coordinate, Coordinate::new(10.0, 20.0));
        assert_eq!(targets[1].key, "30.50,40");
        assert_eq!(targets[1].coordinate, Coordinate::new(30.5, 40.0));
    }

    #[test]
    fn test_parse_targets_skips_malformed_entries() {
        let targets = parse_targets("10,20;abc,1;5;1,2,3; 7,8;;9,9");

        let keys: Vec<&str> = targets.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["10,20", "9,9"]);
    }

    #[test]
    fn test_parse_targets_empty_input() {
        assert!(parse_targets("").is_empty());
    }
}
