use crate::domain::model::Coordinate;

/// Tag filters for the POI endpoint.
pub const POI_FILTERS: &[&str] = &[
    r#"["shop"~"supermarket|convenience"]"#,
    r#"["leisure"="fitness_centre"]"#,
    r#"["amenity"="gym"]"#,
];

/// 分析端點只查商店與健身中心
pub const ANALYSIS_FILTERS: &[&str] = &[
    r#"["shop"~"supermarket|convenience"]"#,
    r#"["leisure"="fitness_centre"]"#,
];

/// 組出 Overpass QL 查詢，每個條件都限制在 radius 公尺內
pub fn build_overpass_query(filters: &[&str], radius: i64, center: Coordinate) -> String {
    let clauses: Vec<String> = filters
        .iter()
        .map(|filter| {
            format!(
                "  node{}(around:{}, {}, {});",
                filter, radius, center.lat, center.lng
            )
        })
        .collect();

    format!("[out:json];\n(\n{}\n);\nout body;\n", clauses.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poi_query_has_three_clauses() {
        let query = build_overpass_query(POI_FILTERS, 800, Coordinate::new(8.68, 49.41));

        let expected = r#"[out:json];
(
  node["shop"~"supermarket|convenience"](around:800, 49.41, 8.68);
  node["leisure"="fitness_centre"](around:800, 49.41, 8.68);
  node["amenity"="gym"](around:800, 49.41, 8.68);
);
out body;
"#;
        assert_eq!(query, expected);
    }

    #[test]
    fn test_analysis_query_omits_gym() {
        let query = build_overpass_query(ANALYSIS_FILTERS, 6000, Coordinate::new(2.35, 48.85));

        assert!(query.contains(r#"node["shop"~"supermarket|convenience"](around:6000, 48.85, 2.35);"#));
        assert!(query.contains(r#"node["leisure"="fitness_centre"](around:6000, 48.85, 2.35);"#));
        assert!(!query.contains("amenity"));
        assert!(query.starts_with("[out:json];"));
        assert!(query.ends_with("out body;\n"));
    }
}
