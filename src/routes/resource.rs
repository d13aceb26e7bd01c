use tracing::instrument;

use crate::store::Store;

#[instrument(skip(store))]
pub async fn get_featured_resources(store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    let resources = store.get_featured_resources().await;
    Ok(warp::reply::json(&resources))
}
