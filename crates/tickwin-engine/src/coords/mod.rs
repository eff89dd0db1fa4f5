//! Integer pixel coordinate types shared by the driver and platforms.

mod extent;

pub use extent::{Extent, Position};
