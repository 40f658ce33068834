pub mod curve;
pub mod line;
pub mod pile;
pub mod single;
