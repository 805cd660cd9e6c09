//! Small pure helpers shared by services.

pub mod normalize;
pub mod quantity;
