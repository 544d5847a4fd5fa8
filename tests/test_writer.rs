mod common;

use courier::http::response::{Response, ResponseBuilder, StatusCode};
use courier::http::writer::{ResponseWriter, serialize_head, serialize_response};
use tokio::io::AsyncReadExt;

#[test]
fn test_bare_response_is_status_and_blank_line() {
    assert_eq!(serialize_response(&Response::ok()), b"HTTP/1.1 200 OK\r\n\r\n");
    assert_eq!(serialize_response(&Response::created()), b"HTTP/1.1 201 Created\r\n\r\n");
    assert_eq!(serialize_response(&Response::not_found()), b"HTTP/1.1 404 Not Found\r\n\r\n");
}

#[test]
fn test_text_body_framing() {
    let wire = serialize_response(&Response::text("text/plain", "abc"));

    assert_eq!(
        wire,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc\r\n"
    );
}

#[test]
fn test_headers_without_body() {
    let response = ResponseBuilder::new(StatusCode::NotFound)
        .header("X-Reason", "gone")
        .build();

    assert_eq!(
        serialize_response(&response),
        b"HTTP/1.1 404 Not Found\r\nX-Reason: gone\r\n\r\n"
    );
}

#[test]
fn test_empty_text_body_adds_no_line() {
    let wire = serialize_response(&Response::text("text/plain", ""));

    assert!(wire.ends_with(b"Content-Length: 0\r\n\r\n"));
}

#[test]
fn test_binary_body_is_not_in_head() {
    let body = vec![b'a', b'\n', 0, b'\r', b'\n'];
    let response = Response::binary("application/octet-stream", body.clone());

    let head = serialize_head(&response);
    let wire = serialize_response(&response);

    assert!(head.ends_with(b"Content-Length: 5\r\n\r\n"));
    assert_eq!(&wire[head.len()..], &body[..]);
}

#[test]
fn test_round_trip_through_client_parser() {
    let body = b"abc/123".to_vec();
    let response = Response::text("text/plain", "abc/123");

    let parsed = common::parse_response(&serialize_response(&response));

    assert_eq!(parsed.status, 200);
    assert_eq!(parsed.status_line, "HTTP/1.1 200 OK");
    assert_eq!(parsed.header_order, ["Content-Type", "Content-Length"]);
    assert_eq!(parsed.headers["Content-Type"], "text/plain");
    assert_eq!(parsed.body, body);
}

#[test]
fn test_binary_round_trip_through_client_parser() {
    let bytes: Vec<u8> = (0..=255).collect();
    let response = Response::binary("application/octet-stream", bytes.clone());

    let parsed = common::parse_response(&serialize_response(&response));

    assert_eq!(parsed.status, 200);
    assert_eq!(parsed.body, bytes);
}

#[tokio::test]
async fn test_writer_sends_head_then_raw_body() {
    let bytes = vec![1u8, b'\n', 2, 0, 3];
    let response = Response::binary("application/octet-stream", bytes.clone());
    let expected = serialize_response(&response);

    let (mut client, mut server) = tokio::io::duplex(4);
    let mut writer = ResponseWriter::new(response);

    let send = tokio::spawn(async move {
        writer.write_to_stream(&mut server, None).await.unwrap();
    });

    let mut received = Vec::new();
    client.read_to_end(&mut received).await.unwrap();
    send.await.unwrap();

    assert_eq!(received, expected);
}
