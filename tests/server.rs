//! End-to-end tests over a real TCP listener.

use std::time::{Duration, Instant};

use apm_demo::HttpServer;

mod common;

#[tokio::test]
async fn test_serves_routes_over_tcp() {
    let server = HttpServer::new(common::test_config(None, 0)).unwrap();
    let (addr, shutdown) = common::spawn_server(server).await;
    let client = common::client();

    let res = client.get(format!("http://{}/", addr)).send().await.expect("server unreachable");
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "Appsolutely perfect");

    let res = client.get(format!("http://{}/exception", addr)).send().await.unwrap();
    assert_eq!(res.status(), 500);
    assert_eq!(res.text().await.unwrap(), "not yet implemented");

    shutdown.trigger();
}

#[tokio::test]
async fn test_weather_proxy_end_to_end() {
    let (upstream, mut requests) = common::start_mock_upstream("200 OK", b"london: \xe2\x9b\x85 +9\xc2\xb0C").await;
    let server = HttpServer::new(common::test_config(Some(upstream), 0)).unwrap();
    let (addr, shutdown) = common::spawn_server(server).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/weather/london", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "text/plain; charset=utf-8");
    assert_eq!(&res.bytes().await.unwrap()[..], b"london: \xe2\x9b\x85 +9\xc2\xb0C");
    assert_eq!(requests.recv().await.unwrap(), "GET /london?format=3 HTTP/1.1");

    // Metrics label the route by pattern, never by the concrete city.
    let res = client
        .get(format!("http://{}/metrics", addr))
        .basic_auth("metrics", Some("secret"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let text = res.text().await.unwrap();
    assert!(text.contains(r#"path="/weather/{city}""#));
    assert!(!text.contains("london"));

    shutdown.trigger();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_waits_overlap() {
    let delay = Duration::from_millis(400);
    let server = HttpServer::new(common::test_config(None, delay.as_millis() as u64)).unwrap();
    let (addr, shutdown) = common::spawn_server(server).await;
    let client = common::client();

    let start = Instant::now();
    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..8 {
        let client = client.clone();
        let url = format!("http://{}/wait", addr);
        tasks.spawn(async move {
            let sent = Instant::now();
            let res = client.get(url).send().await.unwrap();
            let status = res.status();
            let body = res.text().await.unwrap();
            (status, body, sent.elapsed())
        });
    }

    while let Some(result) = tasks.join_next().await {
        let (status, body, took) = result.unwrap();
        assert_eq!(status, 200);
        assert_eq!(body, "done");
        assert!(took >= delay, "answered after {:?}", took);
    }

    // Eight serialized waits would take 3.2s.
    let elapsed = start.elapsed();
    assert!(elapsed < delay * 4, "elapsed: {:?}", elapsed);

    shutdown.trigger();
}

#[tokio::test]
async fn test_shutdown_stops_accepting() {
    let server = HttpServer::new(common::test_config(None, 0)).unwrap();
    let (addr, shutdown) = common::spawn_server(server).await;
    let client = common::client();

    assert!(client.get(format!("http://{}/", addr)).send().await.is_ok());

    shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(client.get(format!("http://{}/", addr)).send().await.is_err());
}
