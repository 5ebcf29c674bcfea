mod cost;
mod coupling;
mod measure;
mod objective;
mod sinkhorn;

pub use cost::*;
pub use coupling::*;
pub use measure::*;
pub use objective::*;
pub use sinkhorn::*;
