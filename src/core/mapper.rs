use crate::domain::model::{SpeedTable, TravelMode};

impl TravelMode {
    /// 服務商的 profile 識別字
    pub fn profile_id(self) -> &'static str {
        match self {
            TravelMode::Walking => "foot-walking",
            TravelMode::Cycling => "cycling-regular",
            TravelMode::Driving => "driving-car",
        }
    }

    /// 假設速度（公尺/分鐘）
    pub fn speed(self, table: SpeedTable) -> i64 {
        match (self, table) {
            (TravelMode::Walking, _) => 80,
            (TravelMode::Cycling, _) => 250,
            (TravelMode::Driving, SpeedTable::Poi) => 800,
            (TravelMode::Driving, SpeedTable::Analysis) => 600,
        }
    }
}

/// 分鐘數不做檢查，超大值時飽和而非溢位
pub fn search_radius(minutes: i64, mode: TravelMode, table: SpeedTable) -> i64 {
    minutes.saturating_mul(mode.speed(table))
}
