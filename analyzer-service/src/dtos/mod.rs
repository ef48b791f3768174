mod analysis;
mod sessions;

pub use analysis::*;
pub use sessions::*;
