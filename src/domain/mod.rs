// Domain layer: quote models and the port the engine is built from.

pub mod model;
pub mod ports;
