use serde::{Deserialize, Serialize};

use crate::models::TeaserItem;

#[derive(Debug, Serialize, Deserialize)]
pub struct TeasersResponse {
    pub teasers: Vec<TeaserItem>,
}
