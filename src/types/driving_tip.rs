use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DrivingTip {
    pub id: DrivingTipId,
    pub title: String,
    pub content: String,
    pub category: String,
}

#[derive(Serialize, Debug, Clone, Copy, Eq, Hash, Deserialize, PartialEq, PartialOrd, Ord)]
pub struct DrivingTipId(pub i32);

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewDrivingTip {
    pub title: String,
    pub content: String,
    pub category: String,
}

impl DrivingTip {
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }
}
