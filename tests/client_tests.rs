use mockito::Matcher;
use serde_json::json;
use snakequery::{Client, Error, QueryOptions};

fn client_for(server: &mockito::Server) -> Client {
    Client::new("test-key")
        .unwrap()
        .with_base_url(format!("{}/api/query", server.url()))
}

#[test]
fn posts_exact_body_and_headers() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/query")
        .match_header("authorization", "Bearer test-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "query": "q",
            "data": [1],
            "debug": false
        })))
        .with_status(200)
        .with_body(r#"{"code":200,"data":{"response":[],"usageCount":3}}"#)
        .create();

    let result = client_for(&server)
        .query("q", QueryOptions::with_data(json!([1])))
        .unwrap();

    mock.assert();
    assert_eq!(result, json!({ "response": [], "usageCount": 3 }));
}

#[test]
fn includes_schema_and_debug_when_set() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/query")
        .match_body(Matcher::Json(json!({
            "query": "q",
            "fetchUrl": "https://example.test/items",
            "responseSchema": { "type": "array", "items": { "type": "string" } },
            "debug": true
        })))
        .with_status(200)
        .with_body(r#"{"code":200,"data":{"response":["a"],"usageCount":1}}"#)
        .create();

    let result = client_for(&server)
        .query(
            "q",
            QueryOptions::with_url("https://example.test/items")
                .response_schema(json!({ "type": "array", "items": { "type": "string" } }))
                .debug(true),
        )
        .unwrap();

    mock.assert();
    assert_eq!(result["usageCount"], json!(1));
}

#[test]
fn validation_fails_before_any_network_call() {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/api/query").expect(0).create();
    let client = client_for(&server);

    let err = client
        .query("", QueryOptions::with_data(json!([1])))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let err = client.query("q", QueryOptions::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let mut both = QueryOptions::with_data(json!([1]));
    both.fetch_url = Some("https://example.test".into());
    let err = client.query("q", both).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    mock.assert();
}

#[test]
fn empty_api_key_is_rejected() {
    let err = Client::new("").unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn http_error_uses_server_message() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api/query")
        .with_status(401)
        .with_body(r#"{"message":"bad key"}"#)
        .create();

    let err = client_for(&server)
        .query("q", QueryOptions::with_data(json!([1])))
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.response(), Some(&json!({ "message": "bad key" })));
    match err {
        Error::Api(api) => assert_eq!(api.message, "bad key"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn http_error_without_message_synthesizes_one() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api/query")
        .with_status(500)
        .with_body(r#"{"detail":"boom"}"#)
        .create();

    let err = client_for(&server)
        .query("q", QueryOptions::with_data(json!([1])))
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    match err {
        Error::Api(api) => assert_eq!(api.message, "HTTP 500: Internal Server Error"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn non_json_body_becomes_fallback_object() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api/query")
        .with_status(200)
        .with_body("oops")
        .create();

    let err = client_for(&server)
        .query("q", QueryOptions::with_data(json!([1])))
        .unwrap_err();

    // HTTP status was fine, so the failure is the missing code==200;
    // the synthesized fallback rides along in the response.
    assert_eq!(err.status(), None);
    let response = err.response().expect("fallback response");
    assert_eq!(response["statusCode"], json!(200));
    assert_eq!(response["body"], json!("oops"));
    match err {
        Error::Api(api) => assert!(api.message.contains("oops")),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn non_json_body_is_truncated_at_200_chars() {
    let long = "z".repeat(250);
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api/query")
        .with_status(502)
        .with_body(long.clone())
        .create();

    let err = client_for(&server)
        .query("q", QueryOptions::with_data(json!([1])))
        .unwrap_err();

    assert_eq!(err.status(), Some(502));
    let body = err.response().expect("fallback response")["body"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(body.len(), 203);
    assert!(body.ends_with("..."));
    assert!(body.starts_with(&long[..200]));
}

#[test]
fn server_reported_failure_code_is_raised() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api/query")
        .with_status(200)
        .with_body(r#"{"code":429,"message":"quota exceeded"}"#)
        .create();

    let err = client_for(&server)
        .query("q", QueryOptions::with_data(json!([1])))
        .unwrap_err();

    assert_eq!(err.status(), Some(429));
    match err {
        Error::Api(api) => {
            // Message is the string form of the whole envelope.
            assert!(api.message.contains("quota exceeded"));
            assert!(api.message.contains("429"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn wrappers_forward_to_query() {
    let mut server = mockito::Server::new();
    let data_mock = server
        .mock("POST", "/api/query")
        .match_body(Matcher::Json(json!({
            "query": "q",
            "data": { "k": "v" },
            "debug": false
        })))
        .with_status(200)
        .with_body(r#"{"code":200,"data":{"response":1,"usageCount":1}}"#)
        .create();

    let client = client_for(&server);
    client.query_with_data("q", json!({ "k": "v" })).unwrap();
    data_mock.assert();

    let url_mock = server
        .mock("POST", "/api/query")
        .match_body(Matcher::Json(json!({
            "query": "q",
            "fetchUrl": "https://example.test/feed",
            "debug": false
        })))
        .with_status(200)
        .with_body(r#"{"code":200,"data":{"response":1,"usageCount":1}}"#)
        .create();

    client
        .query_with_url("q", "https://example.test/feed")
        .unwrap();
    url_mock.assert();
}

#[test]
fn connection_failure_maps_to_network_error() {
    // Nothing listens on this port.
    let client = Client::new("test-key")
        .unwrap()
        .with_base_url("http://127.0.0.1:9/api/query");

    let err = client
        .query("q", QueryOptions::with_data(json!([1])))
        .unwrap_err();

    assert_eq!(err.status(), None);
    match err {
        Error::Api(api) => assert!(api.message.starts_with("Network error")),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn error_display_includes_status_when_present() {
    let err: Error = snakequery::ApiError {
        message: "bad key".into(),
        status: Some(401),
        response: None,
    }
    .into();
    assert_eq!(err.to_string(), "[status 401] bad key");

    let err: Error = snakequery::ApiError {
        message: "no route".into(),
        status: None,
        response: None,
    }
    .into();
    assert_eq!(err.to_string(), "no route");
}
