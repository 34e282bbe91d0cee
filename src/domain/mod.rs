// Domain layer: role records, the loaded catalog and the source port.

pub mod model;
pub mod ports;
