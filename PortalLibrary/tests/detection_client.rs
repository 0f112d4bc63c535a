use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use PortalLibrary::portal::detection_client::{DetectError, DetectionClient};

const IMAGE: &[u8] = &[137, 80, 78, 71, 13, 10, 26, 10];

fn content_length(headers: &str) -> Option<usize> {
    headers.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.trim().eq_ignore_ascii_case("content-length") {
            value.trim().parse().ok()
        } else {
            None
        }
    })
}

fn request_complete(data: &[u8]) -> bool {
    let Some(split) = data.windows(4).position(|window| window == b"\r\n\r\n") else {
        return false;
    };
    let headers = String::from_utf8_lossy(&data[..split]);
    let received = data.len() - (split + 4);
    match content_length(&headers) {
        Some(expected) => received >= expected,
        None => true,
    }
}

//Minimal single-request HTTP server. It drains the multipart body so the
//client never sees a reset mid-upload, then answers with the given payload.
async fn spawn_backend(status_line: &'static str, body: &'static str) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut data = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let read = stream.read(&mut chunk).await.unwrap();
            if read == 0 {
                break;
            }
            data.extend_from_slice(&chunk[..read]);
            if request_complete(&data) {
                break;
            }
        }
        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
    });
    port
}

fn client(port: u16) -> DetectionClient {
    DetectionClient::with_settings(port, Duration::from_secs(5))
}

#[tokio::test]
async fn successful_detection_parses_the_report() {
    let body = r#"{"detections":[{"bbox":{"x1":10.0,"y1":20.0,"x2":110.0,"y2":220.0},"confidence":0.92,"class":"apple"}]}"#;
    let port = spawn_backend("HTTP/1.1 200 OK", body).await;
    let report = client(port).detect("127.0.0.1", "plate.png", IMAGE.to_vec()).await.unwrap();
    assert_eq!(report.detection_count(), 1);
    let detection = &report.detections[0];
    assert_eq!(detection.label, "apple");
    assert!((detection.confidence - 0.92).abs() < 1e-9);
    assert_eq!(detection.bbox.x1, 10.0);
    assert_eq!(detection.bbox.y2, 220.0);
}

#[tokio::test]
async fn responses_without_detections_keep_the_raw_body() {
    let port = spawn_backend("HTTP/1.1 200 OK", r#"{"message":"ok"}"#).await;
    let report = client(port).detect("127.0.0.1", "plate.png", IMAGE.to_vec()).await.unwrap();
    assert_eq!(report.detection_count(), 0);
    assert_eq!(report.raw["message"], "ok");
}

#[tokio::test]
async fn backend_failures_surface_the_status_code() {
    let port = spawn_backend("HTTP/1.1 500 Internal Server Error", r#"{"error":"model crashed"}"#).await;
    let err = client(port).detect("127.0.0.1", "plate.png", IMAGE.to_vec()).await.unwrap_err();
    assert!(matches!(err, DetectError::BadStatus(500)));
    assert!(err.user_message().contains("Server responded with status: 500"));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let err = client(port).detect("127.0.0.1", "plate.png", IMAGE.to_vec()).await.unwrap_err();
    assert!(matches!(err, DetectError::Transport(_)));
    assert!(err.user_message().starts_with("Connection failed:"));
}

#[tokio::test]
async fn malformed_hosts_are_rejected_before_any_request() {
    let err = client(9).detect("bad:host", "plate.png", IMAGE.to_vec()).await.unwrap_err();
    assert!(matches!(err, DetectError::InvalidHost));
}
