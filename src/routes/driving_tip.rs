use tracing::instrument;

use crate::routes::decode_segment;
use crate::store::Store;

#[instrument(skip(store))]
pub async fn get_driving_tips(store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    let tips = store.get_all_driving_tips().await;
    Ok(warp::reply::json(&tips))
}

#[instrument(skip(store))]
pub async fn get_driving_tips_by_category(
    category: String,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    let category = decode_segment(&category)?;
    let tips = store.get_driving_tips_by_category(&category).await;
    Ok(warp::reply::json(&tips))
}
