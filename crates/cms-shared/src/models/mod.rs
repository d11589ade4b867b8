mod article;
mod content;
mod image;
mod metadata;
mod product;
mod site;
mod teaser;

pub use article::*;
pub use content::*;
pub use image::*;
pub use metadata::*;
pub use product::*;
pub use site::*;
pub use teaser::*;
