#![warn(clippy::all)]

use handle_errors::return_error;
use warp::{Filter, http::Method};

pub mod config;
pub mod quiz;
pub mod routes;
pub mod search;
pub mod store;
pub mod types;

use crate::config::Config;
use crate::store::Store;

/// Assembles every `/api` route around a shared store.
pub fn build_routes(
    store: Store,
    config: Config,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let store_filter = warp::any().map(move || store.clone());
    let search_config = config.search;
    let search_filter = warp::any().map(move || search_config);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("Content-Type")
        .allow_methods(&[Method::PUT, Method::DELETE, Method::POST, Method::GET]);

    // Methods are checked after the path so an unknown path stays a 404
    // instead of surfacing as a 405 from the POST routes.
    let get_states = warp::path("api")
        .and(warp::path("states"))
        .and(warp::path::end())
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(routes::state::get_states);

    let get_state = warp::path("api")
        .and(warp::path("states"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(routes::state::get_state);

    // The id stays a String here so a non-numeric id is a 400, not a 404.
    let get_state_questions = warp::path("api")
        .and(warp::path("states"))
        .and(warp::path::param::<String>())
        .and(warp::path("questions"))
        .and(warp::path::end())
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(routes::state::get_state_questions);

    let get_state_resources = warp::path("api")
        .and(warp::path("states"))
        .and(warp::path::param::<String>())
        .and(warp::path("resources"))
        .and(warp::path::end())
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(routes::state::get_state_resources);

    let get_featured_resources = warp::path("api")
        .and(warp::path("resources"))
        .and(warp::path("featured"))
        .and(warp::path::end())
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(routes::resource::get_featured_resources);

    let get_questions_by_category = warp::path("api")
        .and(warp::path("questions"))
        .and(warp::path("category"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(routes::question::get_questions_by_category);

    let get_driving_tips = warp::path("api")
        .and(warp::path("driving-tips"))
        .and(warp::path::end())
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(routes::driving_tip::get_driving_tips);

    let get_driving_tips_by_category = warp::path("api")
        .and(warp::path("driving-tips"))
        .and(warp::path("category"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(routes::driving_tip::get_driving_tips_by_category);

    let subscribe = warp::path("api")
        .and(warp::path("subscribe"))
        .and(warp::path::end())
        .and(warp::post())
        .and(store_filter.clone())
        .and(warp::body::json())
        .and_then(routes::subscription::subscribe);

    let unsubscribe = warp::path("api")
        .and(warp::path("unsubscribe"))
        .and(warp::path::end())
        .and(warp::post())
        .and(store_filter.clone())
        .and(warp::body::json())
        .and_then(routes::subscription::unsubscribe);

    let search = warp::path("api")
        .and(warp::path("search"))
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query())
        .and(store_filter.clone())
        .and(search_filter)
        .and_then(routes::search::search);

    get_states
        .or(get_state)
        .or(get_state_questions)
        .or(get_state_resources)
        .or(get_featured_resources)
        .or(get_questions_by_category)
        .or(get_driving_tips)
        .or(get_driving_tips_by_category)
        .or(subscribe)
        .or(unsubscribe)
        .or(search)
        .with(cors)
        .with(warp::trace(|info| {
            tracing::info_span!(
                "request",
                method = %info.method(),
                path = %info.path(),
                id = %uuid::Uuid::new_v4(),
            )
        }))
        .recover(return_error)
}

/// Seeds the store and serves the API until the process is stopped.
pub async fn run(config: Config) -> Result<(), handle_errors::Error> {
    let store = Store::seeded().await?;
    let routes = build_routes(store, config.clone());

    tracing::info!("listening on {}", config.socket_addr());
    warp::serve(routes).run(config.socket_addr()).await;
    Ok(())
}
