use tracing::{Level, event, instrument};

use crate::routes::parse_state_id;
use crate::store::Store;
use handle_errors::Error;

#[instrument(skip(store))]
pub async fn get_states(store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    event!(target: "drive_prep", Level::INFO, "querying states");
    let states = store.get_all_states().await;
    Ok(warp::reply::json(&states))
}

#[instrument(skip(store))]
pub async fn get_state(
    abbreviation: String,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    match store.get_state_by_abbreviation(&abbreviation).await {
        Some(state) => Ok(warp::reply::json(&state)),
        None => Err(warp::reject::custom(Error::StateNotFound(abbreviation))),
    }
}

/// Questions for one state, including the ones that apply everywhere.
#[instrument(skip(store))]
pub async fn get_state_questions(
    state_id: String,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    let state_id = parse_state_id(&state_id)?;
    let questions = store.get_questions_by_state(state_id).await;
    event!(Level::DEBUG, count = questions.len());
    Ok(warp::reply::json(&questions))
}

#[instrument(skip(store))]
pub async fn get_state_resources(
    state_id: String,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    let state_id = parse_state_id(&state_id)?;
    let resources = store.get_resources_by_state(state_id).await;
    Ok(warp::reply::json(&resources))
}
