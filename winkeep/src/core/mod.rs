mod config;
mod geometry;
mod height_delta;
mod mode;
mod state;

pub use config::*;
pub use geometry::*;
pub use height_delta::*;
pub use mode::*;
pub use state::*;
