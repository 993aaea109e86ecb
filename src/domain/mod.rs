// Domain layer: request-scoped values and the ports the gateway talks through.

pub mod model;
pub mod ports;
