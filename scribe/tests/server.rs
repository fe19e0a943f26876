#![cfg(unix)]

mod common;

use pretty_assertions::assert_eq;

use common::TestApp;

/// Runs the router on a real socket and talks to it over HTTP.
#[tokio::test]
async fn test_upload_over_tcp() {
    let app = TestApp::new("printf 'HELLO'").await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();
    let server = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/"))
        .header("Content-Type", "image/png")
        .body(b"0123456789".to_vec())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "HELLO");
    assert!(app.uploads().is_empty());

    let response = client
        .post(format!("http://{addr}/"))
        .header("Content-Type", "text/plain")
        .body("not an image")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        response.text().await.unwrap(),
        "Only JPG and PNG files are allowed."
    );
    assert!(app.uploads().is_empty());

    server.abort();
}
