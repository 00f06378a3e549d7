//! Integration tests for the OSM clients using wiremock HTTP mocks.

use crowdmap_osm::{NominatimClient, OsmClientConfig, OverpassClient};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_config() -> OsmClientConfig {
    OsmClientConfig {
        retry_backoff_base_ms: 0,
        ..OsmClientConfig::default()
    }
}

#[tokio::test]
async fn nominatim_search_returns_parsed_results() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "place_id": 240109189,
            "display_name": "Berlin, Germany",
            "lat": "52.5170365",
            "lon": "13.3888599",
            "class": "place",
            "type": "city",
            "importance": 0.93
        },
        {
            "place_id": 240130,
            "display_name": "Berlin, Coos County, New Hampshire, United States",
            "lat": "44.4688795",
            "lon": "-71.1836547"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "berlin"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client =
        NominatimClient::with_base_url(&fast_config(), &server.uri()).expect("client");
    let results = client.search("berlin", 5).await.expect("should parse hits");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].display_name, "Berlin, Germany");
    let (lat, lon) = results[0].position().expect("position");
    assert!((lat - 52.517_036_5).abs() < 1e-9);
    assert!((lon - 13.388_859_9).abs() < 1e-9);
    assert_eq!(results[1].place_id, Some(240_130));
}

#[tokio::test]
async fn nominatim_search_retries_5xx_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        NominatimClient::with_base_url(&fast_config(), &server.uri()).expect("client");
    let results = client.search("anywhere", 5).await.expect("retry succeeds");
    assert!(results.is_empty());
}

#[tokio::test]
async fn nominatim_search_surfaces_4xx_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        NominatimClient::with_base_url(&fast_config(), &server.uri()).expect("client");
    let err = client.search("anywhere", 5).await.expect_err("must fail");
    assert!(
        matches!(err, crowdmap_osm::OsmError::UnexpectedStatus { status: 403, .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn overpass_amenities_parse_nodes_and_way_centers() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "version": 0.6,
        "elements": [
            {
                "type": "node",
                "id": 101,
                "lat": 52.521,
                "lon": 13.401,
                "tags": { "amenity": "restaurant", "name": "Luigi's" }
            },
            {
                "type": "way",
                "id": 202,
                "center": { "lat": 52.523, "lon": 13.409 },
                "tags": { "amenity": "school" }
            }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .and(body_string_contains("amenity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = OverpassClient::with_base_url(&fast_config(), &server.uri()).expect("client");
    let elements = client
        .amenities_around(52.52, 13.405, 5000)
        .await
        .expect("should parse elements");

    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].tag("name"), "Luigi's");
    assert_eq!(elements[0].position(), Some((52.521, 13.401)));
    assert_eq!(elements[1].position(), Some((52.523, 13.409)));
}

#[tokio::test]
async fn overpass_extended_query_mentions_all_categories() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .and(body_string_contains("shop"))
        .and(body_string_contains("tourism"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "elements": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = OverpassClient::with_base_url(&fast_config(), &server.uri()).expect("client");
    let elements = client
        .pois_around(52.52, 13.405, 5000)
        .await
        .expect("empty result set is fine");
    assert!(elements.is_empty());
}

#[tokio::test]
async fn overpass_malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = OverpassClient::with_base_url(&fast_config(), &server.uri()).expect("client");
    let err = client
        .pois_around(52.52, 13.405, 5000)
        .await
        .expect_err("must fail");
    assert!(
        matches!(err, crowdmap_osm::OsmError::Deserialize { .. }),
        "got {err:?}"
    );
}
