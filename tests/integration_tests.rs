//! Integration tests using wiremock to simulate the API endpoint.

use dilovod::{Client, Error, ObjectsQuery};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .unwrap()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_get_object_envelope_and_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({
            "action": "getObject",
            "params": {"id": "1100100000001"},
            "key": "test-key",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"id": "1100100000001", "name": "Widget"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let object = client.get_object("1100100000001").await.unwrap();

    assert_eq!(object, json!({"id": "1100100000001", "name": "Widget"}));
}

#[tokio::test]
async fn test_get_objects_default_criteria_are_stripped() {
    let mock_server = MockServer::start().await;

    // Only the stripped form may arrive; anything else falls through to a
    // 404 and fails the test.
    Mock::given(method("POST"))
        .and(body_json(json!({
            "action": "getObjects",
            "params": {"type": "catalogs.goods"},
            "key": "test-key",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let plain = ObjectsQuery::new("catalogs.goods");
    let explicit = ObjectsQuery::new("catalogs.goods")
        .fields(Vec::<String>::new())
        .order_by("")
        .limit(0);

    client.get_objects(plain).await.unwrap();
    client.get_objects(explicit).await.unwrap();

    // The two envelopes are byte-identical, not merely equivalent.
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].body, requests[1].body);
}

#[tokio::test]
async fn test_get_objects_with_all_criteria() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_json(json!({
            "action": "getObjects",
            "params": {
                "type": "catalogs.goods",
                "filter": {"name": "Widget"},
                "fields": ["name", "price"],
                "orderby": "name ASC",
                "limit": 10,
            },
            "key": "test-key",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{"id": "1", "name": "Widget", "price": 9.5}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let objects = client
        .get_objects(
            ObjectsQuery::new("catalogs.goods")
                .filter("name", "Widget")
                .fields(["name", "price"])
                .order_by("name ASC")
                .limit(10),
        )
        .await
        .unwrap();

    assert_eq!(objects, vec![json!({"id": "1", "name": "Widget", "price": 9.5})]);
}

#[tokio::test]
async fn test_save_object_transmits_payload_unaltered() {
    let mock_server = MockServer::start().await;

    let partner = json!({
        "type": "catalogs.persons",
        "name": "New Client",
        "is_buyer": true,
    });

    Mock::given(method("POST"))
        .and(body_json(json!({
            "action": "saveObject",
            "params": partner,
            "key": "test-key",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"id": "1010100000099"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.save_object(&partner).await.unwrap();

    assert_eq!(result, json!({"id": "1010100000099"}));
}

#[tokio::test]
async fn test_sale_order_create_uses_fixed_action_name() {
    let mock_server = MockServer::start().await;

    let order = json!({
        "type": "documents.saleOrder",
        "person": "1010100000099",
    });

    Mock::given(method("POST"))
        .and(body_json(json!({
            "action": "saleOrderCreate",
            "params": order,
            "key": "test-key",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"id": "1109300000017"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.sale_order_create(&order).await.unwrap();

    assert_eq!(result, json!({"id": "1109300000017"}));
}

#[tokio::test]
async fn test_api_error_with_message_and_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {"message": "bad filter", "code": "E1"}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get_object("1").await.unwrap_err();

    assert_eq!(err.api_error_code(), Some("E1"));
    match err {
        Error::Api { message, code } => {
            assert_eq!(message, "bad filter");
            assert_eq!(code.as_deref(), Some("E1"));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_api_error_without_message_falls_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": {}})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    match client.get_object("1").await {
        Err(Error::Api { message, code }) => {
            assert_eq!(message, "Unknown API error");
            assert!(code.is_none());
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_result_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get_object("1").await.unwrap_err();

    assert_eq!(err.raw_response(), Some("{}"));
    assert!(matches!(err, Error::MissingResult { .. }));
}

#[tokio::test]
async fn test_malformed_response_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get_object("1").await.unwrap_err();

    match &err {
        Error::Decode {
            reason,
            raw_response,
        } => {
            assert_eq!(raw_response, "{not json");
            // The parser diagnostic surfaces in the error message.
            assert!(reason.contains("line 1"), "unexpected reason: {reason}");
            assert!(err.to_string().contains("Failed to decode API response"));
        }
        other => panic!("Expected Decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_sequence_result_for_get_objects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"id": "1"}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get_objects(ObjectsQuery::new("catalogs.goods"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_http_error_status_maps_to_transport() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Server error"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get_object("1").await.unwrap_err();

    assert!(matches!(err, Error::Transport { .. }));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
}

#[tokio::test]
async fn test_connection_failure_preserves_cause() {
    // Nothing listens on the discard port.
    let client = Client::builder()
        .api_key("test-key")
        .base_url("http://127.0.0.1:9")
        .unwrap()
        .build()
        .unwrap();

    let err = client.get_object("1").await.unwrap_err();

    assert!(std::error::Error::source(&err).is_some());
    match err {
        Error::Transport { status, source, .. } => {
            assert!(status.is_none());
            assert!(source.is_connect());
        }
        other => panic!("Expected Transport error, got {other:?}"),
    }
}

#[test]
fn test_builder_requires_api_key() {
    let result = Client::builder().build();
    assert!(matches!(result, Err(Error::Configuration(_))));
}
