// Domain layer: the output document, the question model, and the ports the pipeline talks through.

pub mod model;
pub mod ports;
