//! Router-level integration tests against mocked upstreams.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use petdex_api::{create_router, ApiConfig, AppState, ImageEnrichment};
use petdex_breed_client::{BreedApiClient, BreedApiConfig};

fn client_for(server: &MockServer) -> BreedApiClient {
    BreedApiClient::new(BreedApiConfig {
        base_url: server.uri(),
        api_key: Some("test-key".to_string()),
        cdn_base: "https://cdn2.thedogapi.com".to_string(),
        timeout: Duration::from_secs(5),
    })
    .expect("client")
}

fn test_config() -> ApiConfig {
    ApiConfig {
        enrichment: ImageEnrichment::Reference,
        breed_cache_ttl: Duration::ZERO,
        ..ApiConfig::default()
    }
}

fn app(dog_server: &MockServer, cat_server: &MockServer) -> axum::Router {
    let state = AppState::with_clients(
        test_config(),
        client_for(dog_server),
        client_for(cat_server),
        None,
    );
    create_router(state, None)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn dog_breeds_payload() -> Value {
    json!([
        { "id": 1, "name": "Basset Hound", "temperament": "Calm, Loyal",
          "weight": { "imperial": "40 - 65", "metric": "18 - 29" },
          "energy_level": 3, "reference_image_id": "img-1" },
        { "id": 2, "name": "Border Collie", "temperament": "Active, Playful",
          "weight": { "imperial": "30 - 45", "metric": "14 - 20" },
          "energy_level": 5, "reference_image_id": "img-2" },
        { "id": 3, "name": "Cairn Terrier", "temperament": "Hardy, Alert",
          "weight": { "imperial": "13 - 14", "metric": "6 - 6.5" },
          "energy_level": 4, "reference_image_id": "img-3" }
    ])
}

#[tokio::test]
async fn health_reports_store_connectivity() {
    let dog_server = MockServer::start().await;
    let cat_server = MockServer::start().await;

    let (status, body) = get(app(&dog_server, &cat_server), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["database"], json!("disconnected"));
}

#[tokio::test]
async fn lists_normalized_dog_breeds() {
    let dog_server = MockServer::start().await;
    let cat_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/breeds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dog_breeds_payload()))
        .mount(&dog_server)
        .await;

    let (status, body) = get(app(&dog_server, &cat_server), "/api/dogs/breeds").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["count"], json!(3));
    assert_eq!(body["data"][0]["id"], json!("1"));
    assert_eq!(body["data"][0]["name"], json!("Basset Hound"));
    assert_eq!(
        body["data"][0]["image_url"],
        json!("https://cdn2.thedogapi.com/images/img-1.jpg")
    );
}

#[tokio::test]
async fn upstream_failure_degrades_to_an_empty_breed_list() {
    let dog_server = MockServer::start().await;
    let cat_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/breeds"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&dog_server)
        .await;

    let (status, body) = get(app(&dog_server, &cat_server), "/api/dogs/breeds").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(0));
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn filter_endpoint_applies_and_echoes_filters() {
    let dog_server = MockServer::start().await;
    let cat_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/breeds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dog_breeds_payload()))
        .mount(&dog_server)
        .await;

    let (status, body) = get(
        app(&dog_server, &cat_server),
        "/api/dogs/breeds/filter?temperament=loyal",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["data"][0]["name"], json!("Basset Hound"));
    assert_eq!(body["filters_applied"]["temperament"], json!("loyal"));
    assert_eq!(body["filters_applied"]["energy_level"], json!(null));

    let (_, body) = get(
        app(&dog_server, &cat_server),
        "/api/dogs/breeds/filter?energy_level=5",
    )
    .await;
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["data"][0]["name"], json!("Border Collie"));

    let (_, body) = get(
        app(&dog_server, &cat_server),
        "/api/dogs/breeds/filter?temperament=loyal&energy_level=5",
    )
    .await;
    assert_eq!(body["count"], json!(0));
}

#[tokio::test]
async fn unparseable_numeric_filter_is_ignored() {
    let dog_server = MockServer::start().await;
    let cat_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/breeds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dog_breeds_payload()))
        .mount(&dog_server)
        .await;

    let (status, body) = get(
        app(&dog_server, &cat_server),
        "/api/dogs/breeds/filter?energy_level=very-high",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(3));
    assert_eq!(body["filters_applied"]["energy_level"], json!(null));
}

#[tokio::test]
async fn unknown_breed_is_a_404_with_null_data() {
    let dog_server = MockServer::start().await;
    let cat_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/breeds/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&dog_server)
        .await;

    let (status, body) = get(app(&dog_server, &cat_server), "/api/dogs/breeds/ghost").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["data"], json!(null));
}

#[tokio::test]
async fn breed_payload_without_an_id_is_treated_as_missing() {
    let dog_server = MockServer::start().await;
    let cat_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/breeds/odd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "No Id" })))
        .mount(&dog_server)
        .await;

    let (status, _) = get(app(&dog_server, &cat_server), "/api/dogs/breeds/odd").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn breed_images_404_on_unknown_breed() {
    let dog_server = MockServer::start().await;
    let cat_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/breeds/labrador"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&dog_server)
        .await;

    let (status, body) = get(
        app(&dog_server, &cat_server),
        "/api/dogs/breeds/labrador/images?limit=3",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"], json!(null));
}

#[tokio::test]
async fn breed_images_respect_the_limit() {
    let dog_server = MockServer::start().await;
    let cat_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/breeds/labrador"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "labrador",
            "name": "Labrador Retriever"
        })))
        .mount(&dog_server)
        .await;

    let images: Vec<Value> = (0..6)
        .map(|i| {
            json!({
                "id": format!("img-{}", i),
                "url": format!("https://cdn2.thedogapi.com/images/img-{}.jpg", i),
                "width": 1080,
                "height": 720
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/images/search"))
        .and(query_param("breed_id", "labrador"))
        .and(query_param("limit", "6"))
        .and(query_param("order", "RANDOM"))
        .respond_with(ResponseTemplate::new(200).set_body_json(images))
        .mount(&dog_server)
        .await;

    let (status, body) = get(
        app(&dog_server, &cat_server),
        "/api/dogs/breeds/labrador/images?limit=3",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(3));
    assert_eq!(body["data"]["breed"]["name"], json!("Labrador Retriever"));

    let returned = body["data"]["images"].as_array().unwrap();
    assert_eq!(returned.len(), 3);
    for image in returned {
        assert!(image["id"].is_string());
        assert!(image["url"].is_string());
        assert!(image["width"].is_i64());
        assert!(image["height"].is_i64());
    }
}

#[tokio::test]
async fn out_of_range_image_limit_resets_to_default() {
    let dog_server = MockServer::start().await;
    let cat_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/breeds/labrador"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "labrador",
            "name": "Labrador Retriever"
        })))
        .mount(&dog_server)
        .await;

    // limit=25 resets to 5, so the search asks for 10
    Mock::given(method("GET"))
        .and(path("/images/search"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&dog_server)
        .await;

    let (status, body) = get(
        app(&dog_server, &cat_server),
        "/api/dogs/breeds/labrador/images?limit=25",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(0));
}

#[tokio::test]
async fn random_image_404_when_upstream_returns_none() {
    let dog_server = MockServer::start().await;
    let cat_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&dog_server)
        .await;

    let (status, body) = get(app(&dog_server, &cat_server), "/api/dogs/random-image").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn random_image_passes_through_the_first_hit() {
    let dog_server = MockServer::start().await;
    let cat_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images/search"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "rnd-1",
            "url": "https://cdn2.thedogapi.com/images/rnd-1.jpg",
            "width": 800,
            "height": 600,
            "breeds": [{ "id": 1, "name": "Basset Hound" }]
        }])))
        .mount(&dog_server)
        .await;

    let (status, body) = get(app(&dog_server, &cat_server), "/api/dogs/random-image").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], json!("rnd-1"));
    assert_eq!(body["data"]["breeds"][0]["name"], json!("Basset Hound"));
}

#[tokio::test]
async fn paged_dog_list_enriches_only_the_requested_page() {
    let dog_server = MockServer::start().await;
    let cat_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/breeds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dog_breeds_payload()))
        .mount(&dog_server)
        .await;

    for idx in 1..=3 {
        Mock::given(method("GET"))
            .and(path(format!("/images/img-{}", idx)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": format!("img-{}", idx),
                "url": format!("https://cdn2.thedogapi.com/live/img-{}.jpg", idx)
            })))
            .mount(&dog_server)
            .await;
    }

    let (status, body) = get(app(&dog_server, &cat_server), "/api/dogs?limit=2&page=2").await;

    assert_eq!(status, StatusCode::OK);
    let dogs = body["data"]["dogs"].as_array().unwrap();
    assert_eq!(dogs.len(), 1);
    assert_eq!(dogs[0]["name"], json!("Cairn Terrier"));
    assert_eq!(
        dogs[0]["image_url"],
        json!("https://cdn2.thedogapi.com/live/img-3.jpg")
    );
    assert_eq!(body["data"]["pagination"]["total"], json!(3));
    assert_eq!(body["data"]["pagination"]["page"], json!(2));
    assert_eq!(body["data"]["pagination"]["total_pages"], json!(2));
}

#[tokio::test]
async fn invalid_pagination_input_is_a_400() {
    let dog_server = MockServer::start().await;
    let cat_server = MockServer::start().await;

    let (status, body) = get(app(&dog_server, &cat_server), "/api/dogs?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));

    let (status, _) = get(app(&dog_server, &cat_server), "/api/dogs?page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(app(&dog_server, &cat_server), "/api/dogs?limit=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_enriched_page_escalates_to_a_500() {
    let dog_server = MockServer::start().await;
    let cat_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/breeds"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&dog_server)
        .await;

    let (status, body) = get(app(&dog_server, &cat_server), "/api/dogs").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn cat_breeds_carry_cat_only_fields() {
    let dog_server = MockServer::start().await;
    let cat_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/breeds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "abys",
            "name": "Abyssinian",
            "temperament": "Active, Energetic",
            "hairless": 0,
            "energy_level": 5
        }])))
        .mount(&cat_server)
        .await;

    let (status, body) = get(app(&dog_server, &cat_server), "/api/cats/breeds").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["data"][0]["hairless"], json!(0));
    assert!(body["data"][0].get("breed_group").is_none());
}

#[tokio::test]
async fn user_listing_without_a_store_is_a_500_with_empty_data() {
    let dog_server = MockServer::start().await;
    let cat_server = MockServer::start().await;

    let (status, body) = get(app(&dog_server, &cat_server), "/api/users").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn user_detail_is_a_stub_that_echoes_the_id() {
    let dog_server = MockServer::start().await;
    let cat_server = MockServer::start().await;

    let (status, body) = get(app(&dog_server, &cat_server), "/api/users/u-42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], json!("u-42"));
}
