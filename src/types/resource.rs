use serde::{Deserialize, Serialize};

use crate::types::scope::Scope;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    pub description: String,
    pub file_url: String,
    pub file_size: Option<String>,
    pub featured: bool,
    pub category: String,
    #[serde(default)]
    pub state_id: Scope,
    pub image_url: Option<String>,
    pub is_new: bool,
}

#[derive(Serialize, Debug, Clone, Copy, Eq, Hash, Deserialize, PartialEq, PartialOrd, Ord)]
pub struct ResourceId(pub i32);

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewResource {
    pub title: String,
    pub description: String,
    pub file_url: String,
    pub file_size: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub category: String,
    #[serde(default)]
    pub state_id: Scope,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_new: bool,
}

impl Resource {
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }
}
