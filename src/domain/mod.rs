// Domain layer: salary models and the store port. No database or HTTP types leak in here.

pub mod model;
pub mod ports;
