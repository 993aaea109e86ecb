// Adapters layer: reqwest-backed clients for the external providers.

pub mod ors;
pub mod overpass;

pub use ors::OrsClient;
pub use overpass::OverpassClient;
