use drive_prep::{build_routes, config::Config, store::Store};
use serde_json::{Value, json};
use warp::{Filter, Rejection, Reply, http::StatusCode};

async fn api() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone + 'static {
    let store = Store::seeded().await.unwrap();
    build_routes(store, Config::default())
}

fn body(res: &warp::http::Response<warp::hyper::body::Bytes>) -> Value {
    serde_json::from_slice(res.body()).unwrap()
}

async fn get(path: &str) -> warp::http::Response<warp::hyper::body::Bytes> {
    let api = api().await;
    warp::test::request().method("GET").path(path).reply(&api).await
}

#[tokio::test]
async fn lists_all_states() {
    let res = get("/api/states").await;
    assert_eq!(res.status(), StatusCode::OK);

    let states = body(&res);
    assert_eq!(states.as_array().unwrap().len(), 50);
    assert_eq!(states[0]["name"], "Alabama");
    assert_eq!(states[4]["manualUrl"], "/pdfs/california-drivers-handbook.pdf");
    assert_eq!(states[0]["resourceUrl"], Value::Null);
}

#[tokio::test]
async fn state_lookup_ignores_case() {
    let lower = get("/api/states/ca").await;
    let upper = get("/api/states/CA").await;

    assert_eq!(lower.status(), StatusCode::OK);
    assert_eq!(upper.status(), StatusCode::OK);
    assert_eq!(body(&lower), body(&upper));
    assert_eq!(body(&lower)["name"], "California");
    assert_eq!(body(&lower)["id"], 5);
}

#[tokio::test]
async fn unknown_state_is_not_found() {
    let res = get("/api/states/zz").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(body(&res)["message"].as_str().unwrap().contains("zz"));
}

#[tokio::test]
async fn state_questions_include_global_ones() {
    let res = get("/api/states/5/questions").await;
    assert_eq!(res.status(), StatusCode::OK);

    let questions = body(&res);
    let questions = questions.as_array().unwrap();
    assert_eq!(questions.len(), 12);
    assert_eq!(questions[0]["stateId"], 5);
    assert_eq!(questions[2]["stateId"], Value::Null);
    for question in questions {
        let options = question["options"].as_array().unwrap();
        assert!(options.contains(&question["correctAnswer"]));
    }

    let res = get("/api/states/1/questions").await;
    assert_eq!(body(&res).as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn non_numeric_state_id_is_bad_request() {
    let res = get("/api/states/california/questions").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = get("/api/states/ca/resources").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn state_resources_include_global_ones() {
    let res = get("/api/states/1/resources").await;
    assert_eq!(res.status(), StatusCode::OK);

    let resources = body(&res);
    let titles: Vec<_> = resources
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Road Signs & Signals Guide", "DMV Test Prep Guide"]);
}

#[tokio::test]
async fn featured_resources() {
    let res = get("/api/resources/featured").await;
    assert_eq!(res.status(), StatusCode::OK);

    let resources = body(&res);
    let resources = resources.as_array().unwrap();
    assert_eq!(resources.len(), 3);
    assert!(resources.iter().all(|r| r["featured"] == true));
    assert_eq!(resources[2]["isNew"], true);
}

#[tokio::test]
async fn questions_by_encoded_category() {
    let res = get("/api/questions/category/General%20Knowledge").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body(&res).as_array().unwrap().len(), 9);

    let res = get("/api/questions/category/Parking").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body(&res), json!([]));
}

#[tokio::test]
async fn driving_tips() {
    let res = get("/api/driving-tips").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body(&res).as_array().unwrap().len(), 4);

    let res = get("/api/driving-tips/category/Safety").await;
    assert_eq!(body(&res).as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn subscribe_is_idempotent() {
    let api = api().await;

    let first = warp::test::request()
        .method("POST")
        .path("/api/subscribe")
        .json(&json!({"email": "driver@example.com"}))
        .reply(&api)
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(
        body(&first)["message"],
        "Successfully subscribed to newsletter"
    );
    assert_eq!(body(&first)["user"]["subscribed"], true);

    let second = warp::test::request()
        .method("POST")
        .path("/api/subscribe")
        .json(&json!({"email": "driver@example.com", "subscribed": true}))
        .reply(&api)
        .await;
    assert_eq!(second.status(), StatusCode::CREATED);
    assert_eq!(body(&first)["user"]["id"], body(&second)["user"]["id"]);
}

#[tokio::test]
async fn subscribe_rejects_bad_input() {
    let api = api().await;

    let malformed = warp::test::request()
        .method("POST")
        .path("/api/subscribe")
        .json(&json!({"email": "not-an-email"}))
        .reply(&api)
        .await;
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);

    let missing = warp::test::request()
        .method("POST")
        .path("/api/subscribe")
        .json(&json!({"subscribed": true}))
        .reply(&api)
        .await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unsubscribe_flow() {
    let api = api().await;

    let unknown = warp::test::request()
        .method("POST")
        .path("/api/unsubscribe")
        .json(&json!({"email": "driver@example.com"}))
        .reply(&api)
        .await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let missing = warp::test::request()
        .method("POST")
        .path("/api/unsubscribe")
        .json(&json!({}))
        .reply(&api)
        .await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    warp::test::request()
        .method("POST")
        .path("/api/subscribe")
        .json(&json!({"email": "driver@example.com"}))
        .reply(&api)
        .await;

    let res = warp::test::request()
        .method("POST")
        .path("/api/unsubscribe")
        .json(&json!({"email": "driver@example.com"}))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        body(&res)["message"],
        "Successfully unsubscribed from newsletter"
    );
}

#[tokio::test]
async fn search_requires_a_query() {
    assert_eq!(get("/api/search").await.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        get("/api/search?query=").await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn short_search_returns_empty_groups() {
    let res = get("/api/search?query=c").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        body(&res),
        json!({"states": [], "resources": [], "drivingTips": []})
    );
}

#[tokio::test]
async fn search_groups_matches_by_kind() {
    let res = get("/api/search?query=california").await;
    assert_eq!(res.status(), StatusCode::OK);

    let results = body(&res);
    assert_eq!(results["states"].as_array().unwrap().len(), 1);
    assert_eq!(results["states"][0]["abbreviation"], "CA");
    assert_eq!(results["resources"].as_array().unwrap().len(), 1);
    assert_eq!(results["drivingTips"], json!([]));

    let res = get("/api/search?query=Safety").await;
    assert_eq!(body(&res)["drivingTips"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let res = get("/api/nothing-here").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body(&res)["message"], "Route not found");

    let api = api().await;
    let res = warp::test::request()
        .method("POST")
        .path("/api/nothing-here")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn subscribe_requires_a_json_body() {
    let api = api().await;

    let res = warp::test::request()
        .method("POST")
        .path("/api/subscribe")
        .header("content-type", "text/plain")
        .body(r#"{"email":"driver@example.com"}"#)
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_ne!(body(&res)["message"], "Route not found");
}

#[tokio::test]
async fn wrong_method_on_a_known_path() {
    let res = get("/api/subscribe").await;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    let api = api().await;
    let res = warp::test::request()
        .method("POST")
        .path("/api/states")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}
