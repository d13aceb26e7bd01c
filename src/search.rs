use serde::{Deserialize, Serialize};
use tracing::{Level, event, instrument};

use crate::store::Store;
use crate::types::{driving_tip::DrivingTip, resource::Resource, state::State};

/// Matches grouped by entity kind, each in store order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub states: Vec<State>,
    pub resources: Vec<Resource>,
    pub driving_tips: Vec<DrivingTip>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.states.is_empty() && self.resources.is_empty() && self.driving_tips.is_empty()
    }
}

/// Case-insensitive substring search over states, resources and tips.
///
/// Queries shorter than `min_query_len` characters match nothing.
#[instrument(skip(store))]
pub async fn search_content(store: &Store, query: &str, min_query_len: usize) -> SearchResults {
    if query.chars().count() < min_query_len {
        event!(Level::DEBUG, "query below minimum length");
        return SearchResults::default();
    }

    let needle = query.to_lowercase();

    let states = store
        .get_all_states()
        .await
        .into_iter()
        .filter(|state| state.matches(&needle))
        .collect();
    let resources = store
        .get_all_resources()
        .await
        .into_iter()
        .filter(|resource| resource.matches(&needle))
        .collect();
    let driving_tips = store
        .get_all_driving_tips()
        .await
        .into_iter()
        .filter(|tip| tip.matches(&needle))
        .collect();

    SearchResults {
        states,
        resources,
        driving_tips,
    }
}
