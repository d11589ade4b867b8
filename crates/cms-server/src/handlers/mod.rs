pub mod articles;
pub mod products;
pub mod site;
pub mod teasers;
