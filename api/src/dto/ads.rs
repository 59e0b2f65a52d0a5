use fl_core::SaveAdCommand;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchAdsRequest {
    /// Empty phrase matches every ad
    #[serde(default)]
    #[validate(length(max = 200))]
    pub search_phrase: String,

    #[serde(default)]
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewAdRequest {
    pub ad_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveAdRequest {
    /// Absent for a new ad
    #[serde(default)]
    pub ad_id: Option<i64>,

    #[validate(length(min = 1, max = 200))]
    pub heading: String,

    #[serde(default)]
    #[validate(length(max = 5000))]
    pub text: String,

    #[serde(default)]
    #[validate(length(max = 500))]
    pub image: Option<String>,

    pub category_id: i64,
}

impl From<SaveAdRequest> for SaveAdCommand {
    fn from(request: SaveAdRequest) -> Self {
        Self {
            ad_id: request.ad_id,
            heading: request.heading,
            text: request.text,
            image: request.image.filter(|i| !i.is_empty()),
            category_id: request.category_id,
        }
    }
}
