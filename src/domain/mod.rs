// Domain layer: core models, validation ranges and ports (interfaces).

pub mod model;
pub mod ports;
pub mod ranges;
