pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use adapters::{OrsClient, OverpassClient};
pub use config::{CliConfig, GatewayConfig};
pub use crate::core::{Coordinate, Gateway, TravelMode};
pub use server::{create_router, serve, AppState};
pub use utils::error::{GatewayError, Result};
