//! Endpoint tests for the container operations, backed by a mock daemon.
//!
//! Each test pins one request shape: the exact path and query string, the
//! body passed through unmodified, or the way a daemon error surfaces.

use dockhand::models::{
    ChangeKind, ContainerConfig, ContainerCreateBody, HostConfig, UpdateConfig,
};
use dockhand::{ContainerListOptions, ContainerLogsOptions, DockerClient, EngineError};
use futures::StreamExt;
use mockito::{Matcher, Server};
use serde_json::json;

#[tokio::test]
async fn list_builds_the_documented_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock(
            "GET",
            "/containers/json?all=true&limit=5&size=true&filters=%7B%22status%22%3A%5B%22running%22%5D%7D",
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let client = DockerClient::new(server.url());
    let options = ContainerListOptions::default()
        .with_all(true)
        .with_limit(5)
        .with_size(true)
        .with_filter("status", "running");
    let containers = client.containers().list(&options).await.unwrap();

    assert!(containers.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn list_without_options_sends_no_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/containers/json")
        .match_query(Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([{
                "Id": "8dfafdbc3a40",
                "Names": ["/web"],
                "Image": "nginx:1.25",
                "State": "running",
                "Status": "Up 2 hours"
            }])
            .to_string(),
        )
        .create_async()
        .await;

    let client = DockerClient::new(server.url());
    let containers = client
        .containers()
        .list(&ContainerListOptions::default())
        .await
        .unwrap();

    assert_eq!(containers.len(), 1);
    assert_eq!(containers[0].id.as_deref(), Some("8dfafdbc3a40"));
    assert_eq!(containers[0].state.as_deref(), Some("running"));
    mock.assert_async().await;
}

#[tokio::test]
async fn create_sends_the_body_unmodified() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/containers/create?name=web")
        .match_body(Matcher::Json(json!({
            "Image": "alpine:3.19",
            "Cmd": ["echo", "hi"],
            "HostConfig": {"Memory": 67108864}
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json!({"Id": "e90e34656806", "Warnings": []}).to_string())
        .create_async()
        .await;

    let client = DockerClient::new(server.url());
    let body = ContainerCreateBody {
        config: ContainerConfig {
            image: Some("alpine:3.19".to_string()),
            cmd: Some(vec!["echo".to_string(), "hi".to_string()]),
            ..ContainerConfig::default()
        },
        host_config: Some(HostConfig {
            memory: Some(64 * 1024 * 1024),
            ..HostConfig::default()
        }),
        networking_config: None,
    };
    let created = client.containers().create(Some("web"), &body).await.unwrap();

    assert_eq!(created.id, "e90e34656806");
    assert!(created.warnings.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn start_posts_with_no_body_and_resolves_to_unit() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/containers/abc123/start")
        .match_body(Matcher::Exact(String::new()))
        .with_status(204)
        .create_async()
        .await;

    let client = DockerClient::new(server.url());
    client.containers().start("abc123", None).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn stop_appends_signal_and_grace_period() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/containers/abc123/stop?signal=SIGTERM&t=10")
        .with_status(204)
        .create_async()
        .await;

    let client = DockerClient::new(server.url());
    client
        .containers()
        .stop("abc123", Some(10), Some("SIGTERM"))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn restart_and_kill_hit_their_endpoints() {
    let mut server = Server::new_async().await;
    let restart = server
        .mock("POST", "/containers/abc123/restart?t=5")
        .with_status(204)
        .create_async()
        .await;
    let kill = server
        .mock("POST", "/containers/abc123/kill?signal=SIGINT")
        .with_status(204)
        .create_async()
        .await;

    let client = DockerClient::new(server.url());
    client.containers().restart("abc123", Some(5), None).await.unwrap();
    client.containers().kill("abc123", Some("SIGINT")).await.unwrap();

    restart.assert_async().await;
    kill.assert_async().await;
}

#[tokio::test]
async fn stats_always_forces_a_single_snapshot() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/containers/abc123/stats?stream=false&one-shot=true")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "read": "2024-01-15T10:00:00Z",
                "pids_stats": {"current": 3},
                "memory_stats": {"usage": 6537216, "limit": 67108864}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = DockerClient::new(server.url());
    let stats = client.containers().stats("abc123").await.unwrap();

    assert_eq!(stats.pids_stats.unwrap().current, Some(3));
    assert_eq!(stats.memory_stats.unwrap().usage, Some(6537216));
    mock.assert_async().await;
}

#[tokio::test]
async fn inspect_surfaces_the_daemon_error_verbatim() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/containers/nope/json")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(json!({"message": "no such container"}).to_string())
        .create_async()
        .await;

    let client = DockerClient::new(server.url());
    let err = client.containers().inspect("nope", None).await.unwrap_err();

    match err {
        EngineError::Daemon { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "no such container");
        }
        other => panic!("expected a daemon error, got {:?}", other),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn non_json_error_bodies_are_carried_raw() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/containers/abc123/pause")
        .with_status(500)
        .with_body("driver failure")
        .create_async()
        .await;

    let client = DockerClient::new(server.url());
    let err = client.containers().pause("abc123").await.unwrap_err();

    match err {
        EngineError::Daemon { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "driver failure");
        }
        other => panic!("expected a daemon error, got {:?}", other),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn connection_failure_is_a_transport_error() {
    // Port 1 on localhost: nothing listens there.
    let client = DockerClient::new("http://127.0.0.1:1");
    let err = client
        .containers()
        .list(&ContainerListOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::Transport(_)));
}

#[tokio::test]
async fn top_parses_titles_and_processes() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/containers/abc123/top?ps_args=aux")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "Titles": ["PID", "CMD"],
                "Processes": [["1", "sleep 60"]]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = DockerClient::new(server.url());
    let top = client.containers().top("abc123", Some("aux")).await.unwrap();

    assert_eq!(top.titles, vec!["PID", "CMD"]);
    assert_eq!(top.processes[0][1], "sleep 60");
    mock.assert_async().await;
}

#[tokio::test]
async fn changes_decode_their_numeric_kinds() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/containers/abc123/changes")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                {"Path": "/etc/hosts", "Kind": 0},
                {"Path": "/tmp/scratch", "Kind": 1},
                {"Path": "/var/run/old.pid", "Kind": 2}
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let client = DockerClient::new(server.url());
    let changes = client.containers().changes("abc123").await.unwrap();

    assert_eq!(changes[0].kind, ChangeKind::Modified);
    assert_eq!(changes[1].kind, ChangeKind::Added);
    assert_eq!(changes[2].kind, ChangeKind::Deleted);
    mock.assert_async().await;
}

#[tokio::test]
async fn logs_build_their_query_and_stream_raw_bytes() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock(
            "GET",
            "/containers/abc123/logs?stdout=true&stderr=true&timestamps=true&tail=100",
        )
        .with_status(200)
        .with_body("line one\nline two\n")
        .create_async()
        .await;

    let client = DockerClient::new(server.url());
    let options = ContainerLogsOptions::stdout_and_stderr()
        .with_timestamps(true)
        .with_tail("100");
    let mut stream = client.containers().logs("abc123", &options).await.unwrap();

    let mut collected = Vec::new();
    while let Some(chunk) = stream.next().await {
        collected.extend_from_slice(&chunk.unwrap());
    }
    assert_eq!(collected, b"line one\nline two\n");
    mock.assert_async().await;
}

#[tokio::test]
async fn export_streams_the_filesystem_archive() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/containers/abc123/export")
        .with_status(200)
        .with_header("content-type", "application/x-tar")
        .with_body("tar-archive-bytes")
        .create_async()
        .await;

    let client = DockerClient::new(server.url());
    let mut stream = client.containers().export("abc123").await.unwrap();

    let mut collected = Vec::new();
    while let Some(chunk) = stream.next().await {
        collected.extend_from_slice(&chunk.unwrap());
    }
    assert_eq!(collected, b"tar-archive-bytes");
    mock.assert_async().await;
}

#[tokio::test]
async fn update_posts_resource_limits_and_returns_warnings() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/containers/abc123/update")
        .match_body(Matcher::Json(json!({"Memory": 134217728, "CpuShares": 512})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"Warnings": ["memory limit below recommendation"]}).to_string())
        .create_async()
        .await;

    let client = DockerClient::new(server.url());
    let config = UpdateConfig {
        memory: Some(128 * 1024 * 1024),
        cpu_shares: Some(512),
        ..UpdateConfig::default()
    };
    let updated = client.containers().update("abc123", &config).await.unwrap();

    assert_eq!(updated.warnings, vec!["memory limit below recommendation"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn rename_and_unpause_hit_their_endpoints() {
    let mut server = Server::new_async().await;
    let rename = server
        .mock("POST", "/containers/abc123/rename?name=web-2")
        .with_status(204)
        .create_async()
        .await;
    let unpause = server
        .mock("POST", "/containers/abc123/unpause")
        .with_status(204)
        .create_async()
        .await;

    let client = DockerClient::new(server.url());
    client.containers().rename("abc123", "web-2").await.unwrap();
    client.containers().unpause("abc123").await.unwrap();

    rename.assert_async().await;
    unpause.assert_async().await;
}

#[tokio::test]
async fn prune_sends_filters_and_parses_the_report() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock(
            "POST",
            "/containers/prune?filters=%7B%22until%22%3A%5B%2224h%22%5D%7D",
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"ContainersDeleted": ["8dfafdbc3a40"], "SpaceReclaimed": 1024}).to_string(),
        )
        .create_async()
        .await;

    let client = DockerClient::new(server.url());
    let mut filters = std::collections::HashMap::new();
    filters.insert("until".to_string(), vec!["24h".to_string()]);
    let report = client.containers().prune(Some(&filters)).await.unwrap();

    assert_eq!(report.containers_deleted.unwrap(), vec!["8dfafdbc3a40"]);
    assert_eq!(report.space_reclaimed, Some(1024));
    mock.assert_async().await;
}
