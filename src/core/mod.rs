pub mod gateway;
pub mod mapper;
pub mod query;

pub use crate::domain::model::{BulkResult, Coordinate, SpeedTable, TravelMode};
pub use crate::domain::ports::{ConfigProvider, FeatureProvider, RoutingProvider};
pub use crate::utils::error::Result;
pub use gateway::{AnalysisResult, Gateway};
