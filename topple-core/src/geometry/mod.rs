pub(crate) mod planar;
pub mod pose;
