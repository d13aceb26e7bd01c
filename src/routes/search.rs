use std::collections::HashMap;
use tracing::{Level, event, instrument};

use crate::config::SearchConfig;
use crate::search::search_content;
use crate::store::Store;
use handle_errors::Error;

/// `GET /api/search?query=...`
#[instrument(skip(store))]
pub async fn search(
    params: HashMap<String, String>,
    store: Store,
    search_config: SearchConfig,
) -> Result<impl warp::Reply, warp::Rejection> {
    let query = match params.get("query") {
        Some(query) if !query.is_empty() => query,
        _ => return Err(warp::reject::custom(Error::MissingParameter("query"))),
    };

    let results = search_content(&store, query, search_config.min_query_len).await;
    event!(
        Level::DEBUG,
        states = results.states.len(),
        resources = results.resources.len(),
        driving_tips = results.driving_tips.len()
    );
    Ok(warp::reply::json(&results))
}
