//! Rounding of geocentric axes and of whole longitude/latitude batches.

pub mod nearest;
pub mod points;

pub use nearest::{digit_count, round_to_nearest, round_to_nearest_int, Rounded, Step};
pub use points::{round, round_points, RoundOptions};
