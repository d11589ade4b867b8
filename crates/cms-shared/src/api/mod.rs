mod articles;
mod products;
mod teasers;

pub use articles::*;
pub use products::*;
pub use teasers::*;
