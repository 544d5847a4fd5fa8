use courier::http::response::{Body, Response, ResponseBuilder, StatusCode};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::Created.as_u16(), 201);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
}

#[test]
fn test_status_lines() {
    assert_eq!(StatusCode::Ok.status_line(), "HTTP/1.1 200 OK");
    assert_eq!(StatusCode::Created.status_line(), "HTTP/1.1 201 Created");
    assert_eq!(StatusCode::NotFound.status_line(), "HTTP/1.1 404 Not Found");
}

#[test]
fn test_response_builder_keeps_header_order() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .header("X-Second", "2")
        .header("X-Third", "3")
        .text("body")
        .build();

    let names: Vec<&str> = response.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, ["Content-Type", "X-Second", "X-Third"]);
}

#[test]
fn test_response_builder_adds_nothing_implicitly() {
    let response = ResponseBuilder::new(StatusCode::Ok).text("abc").build();

    assert!(response.headers.is_empty());
    assert_eq!(response.header("Content-Length"), None);
}

#[test]
fn test_response_plain_helpers_are_bare() {
    for (response, status) in [
        (Response::ok(), StatusCode::Ok),
        (Response::created(), StatusCode::Created),
        (Response::not_found(), StatusCode::NotFound),
    ] {
        assert_eq!(response.status, status);
        assert!(response.headers.is_empty());
        assert_eq!(response.body, Body::Empty);
    }
}

#[test]
fn test_response_text_helper() {
    let response = Response::text("text/plain", "abc/123");

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.header("Content-Type"), Some("text/plain"));
    assert_eq!(response.header("Content-Length"), Some("7"));
    assert_eq!(response.body, Body::Text("abc/123".to_string()));
}

#[test]
fn test_response_binary_helper() {
    let response = Response::binary("application/octet-stream", vec![0, 10, 255]);

    assert_eq!(response.header("Content-Length"), Some("3"));
    assert_eq!(response.body, Body::Binary(vec![0, 10, 255]));
    assert_eq!(response.body.len(), 3);
}

#[test]
fn test_text_length_counts_bytes() {
    let response = Response::text("text/plain", "héllo");

    assert_eq!(response.header("Content-Length"), Some("6"));
}
