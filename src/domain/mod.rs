// Domain layer: homework models and the ports the poll loop talks through.

pub mod model;
pub mod ports;
