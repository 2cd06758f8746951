// Domain layer: models, the fixed catalog and ports. No I/O lives here.

pub mod catalog;
pub mod model;
pub mod ports;
