// world/ - Canvas geometry queries
//
// Pure functions over the drawing rectangle.
// No state, no allocation - just math.

mod bounds;

pub use bounds::*;
