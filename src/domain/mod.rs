// Domain layer: course reference model and the matching seam.

pub mod loose;
pub mod model;
pub mod ports;
