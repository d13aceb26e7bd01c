use serde::Serialize;
use tracing::{Level, event, instrument};
use warp::http::StatusCode;

use crate::store::Store;
use crate::types::user::{NewUser, Unsubscribe, User};
use handle_errors::Error;

#[derive(Serialize, Debug)]
struct Subscribed {
    message: &'static str,
    user: User,
}

#[derive(Serialize, Debug)]
struct Unsubscribed {
    message: &'static str,
}

#[instrument(skip(store, new_user))]
pub async fn subscribe(store: Store, new_user: NewUser) -> Result<impl warp::Reply, warp::Rejection> {
    let new_user = new_user.validated()?;
    let user = store.subscribe_user(new_user).await;
    event!(Level::INFO, user_id = user.id.0, "newsletter subscription");

    Ok(warp::reply::with_status(
        warp::reply::json(&Subscribed {
            message: "Successfully subscribed to newsletter",
            user,
        }),
        StatusCode::CREATED,
    ))
}

#[instrument(skip(store, request))]
pub async fn unsubscribe(
    store: Store,
    request: Unsubscribe,
) -> Result<impl warp::Reply, warp::Rejection> {
    let email = match request.email {
        Some(email) if !email.trim().is_empty() => email,
        _ => return Err(warp::reject::custom(Error::MissingParameter("email"))),
    };

    let user = store.unsubscribe_user(&email).await?;
    event!(Level::INFO, user_id = user.id.0, "newsletter unsubscription");

    Ok(warp::reply::json(&Unsubscribed {
        message: "Successfully unsubscribed from newsletter",
    }))
}
