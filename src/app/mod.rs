// Application layer: concrete pipelines and result rendering.

pub mod pipelines;
pub mod render;
