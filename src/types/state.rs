use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub id: StateId,
    pub name: String,
    pub abbreviation: String,
    pub description: String,
    pub resource_url: Option<String>,
    pub manual_url: Option<String>,
}

#[derive(Serialize, Debug, Clone, Copy, Eq, Hash, Deserialize, PartialEq, PartialOrd, Ord)]
pub struct StateId(pub i32);

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewState {
    pub name: String,
    pub abbreviation: String,
    pub description: String,
    pub resource_url: Option<String>,
    pub manual_url: Option<String>,
}

impl State {
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.abbreviation.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}
