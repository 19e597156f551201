use mutuals_core::config::ApiConfig;
use mutuals_core::username::Username;
use mutuals_provider::client::ScraperClient;
use mutuals_provider::provider::GraphProvider;
use mutuals_util::errors::ProviderError;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        key: Some("test-key".to_string()),
        host: "scraper.test".to_string(),
        base_url: Some(server.uri()),
        ..ApiConfig::default()
    }
}

fn listing(count: u64, names: &[&str], token: &str) -> serde_json::Value {
    let items: Vec<serde_json::Value> = names.iter().map(|n| json!({ "username": n })).collect();
    json!({
        "data": { "count": count, "items": items },
        "pagination_token": token,
    })
}

#[tokio::test]
async fn test_followers_probe_then_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/followers"))
        .and(query_param("username_or_id_or_url", "alice"))
        .and(query_param("amount", "1"))
        .and(header("x-rapidapi-host", "scraper.test"))
        .and(header("x-rapidapi-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(3, &["bob"], "p0")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/followers"))
        .and(query_param("amount", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "count": 3,
                "items": [{ "username": "bob" }, { "full_name": "No Name" }, { "username": "carol" }]
            },
            "pagination_token": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = ScraperClient::provider_from_config(&api_config(&server)).unwrap();
    let followers = provider.followers(&Username::from("alice")).await.unwrap();

    assert_eq!(followers.len(), 2);
    assert!(followers.contains("bob"));
    assert!(followers.contains("carol"));
}

#[tokio::test]
async fn test_followings_use_following_endpoint_and_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/following"))
        .and(query_param("amount", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(4, &["x"], "ignored")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/following"))
        .and(query_param("amount", "2"))
        .and(query_param("pagination_token", "cursor-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(4, &["c", "d"], "")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/following"))
        .and(query_param("amount", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(4, &["a", "b"], "cursor-2")))
        .mount(&server)
        .await;

    let mut api = api_config(&server);
    api.batch_size = 2;
    let provider = ScraperClient::provider_from_config(&api).unwrap();
    let followings = provider.followings(&Username::from("alice")).await.unwrap();

    let mut names: Vec<&str> = followings.iter().map(|u| u.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["a", "b", "c", "d"]);
}

#[tokio::test]
async fn test_non_success_status_is_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/followers"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let provider = ScraperClient::provider_from_config(&api_config(&server)).unwrap();
    let err = provider
        .followers(&Username::from("alice"))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ProviderError::Status { status: 403, .. }),
        "got: {err}"
    );
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/followers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let provider = ScraperClient::provider_from_config(&api_config(&server)).unwrap();
    let err = provider
        .followers(&Username::from("alice"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Decode { .. }), "got: {err}");
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let api = ApiConfig {
        key: Some("k".to_string()),
        base_url: Some("http://127.0.0.1:9".to_string()),
        timeout_secs: 2,
        ..ApiConfig::default()
    };
    let provider = ScraperClient::provider_from_config(&api).unwrap();
    let err = provider
        .followings(&Username::from("alice"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Transport { .. }), "got: {err}");
}
