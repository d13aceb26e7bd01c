use tracing::instrument;

use crate::routes::decode_segment;
use crate::store::Store;

#[instrument(skip(store))]
pub async fn get_questions_by_category(
    category: String,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    let category = decode_segment(&category)?;
    let questions = store.get_questions_by_category(&category).await;
    Ok(warp::reply::json(&questions))
}
