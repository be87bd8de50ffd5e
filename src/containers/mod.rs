//! Container-side operations of the Engine API.
//!
//! Same translation pattern as the image module: one endpoint, one HTTP
//! round trip, query parameters only for the options the caller supplied.
//! State/action endpoints (`start`, `stop`, `restart`, `kill`, `rename`,
//! `pause`, `unpause`) resolve to `()` — their contract is success/failure
//! only.

use std::collections::HashMap;

use crate::client::{ByteStream, DockerClient};
use crate::error::EngineError;
use crate::models::{
    ContainerChange, ContainerCreateBody, ContainerCreateResponse, ContainerInspect,
    ContainerPruneResponse, ContainerStats, ContainerSummary, ContainerTopResponse,
    ContainerUpdateResponse, FilterMap, UpdateConfig,
};
use crate::query::QueryString;

/// Stateless handle to the container endpoints of one daemon.
///
/// Obtained from [`DockerClient::containers`].
pub struct Containers<'a> {
    client: &'a DockerClient,
}

/// Options for [`Containers::list`].
#[derive(Debug, Clone, Default)]
pub struct ContainerListOptions {
    /// Include stopped containers.
    pub all: Option<bool>,
    /// Return at most this many of the most recently created containers.
    pub limit: Option<i64>,
    /// Compute and return `SizeRw`/`SizeRootFs`.
    pub size: Option<bool>,
    pub filters: Option<FilterMap>,
}

impl ContainerListOptions {
    pub fn with_all(mut self, all: bool) -> Self {
        self.all = Some(all);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_size(mut self, size: bool) -> Self {
        self.size = Some(size);
        self
    }

    /// Add one accepted value to a named filter.
    pub fn with_filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters
            .get_or_insert_with(HashMap::new)
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }
}

/// Options for [`Containers::logs`].
#[derive(Debug, Clone, Default)]
pub struct ContainerLogsOptions {
    /// Keep the connection open and stream new output.
    pub follow: Option<bool>,
    pub stdout: Option<bool>,
    pub stderr: Option<bool>,
    /// Only logs since this Unix timestamp.
    pub since: Option<i64>,
    /// Only logs before this Unix timestamp.
    pub until: Option<i64>,
    /// Prefix every line with its timestamp.
    pub timestamps: Option<bool>,
    /// Number of trailing lines, or `all`.
    pub tail: Option<String>,
}

impl ContainerLogsOptions {
    /// Both output streams, no follow.
    pub fn stdout_and_stderr() -> Self {
        Self {
            stdout: Some(true),
            stderr: Some(true),
            ..Self::default()
        }
    }

    pub fn with_follow(mut self, follow: bool) -> Self {
        self.follow = Some(follow);
        self
    }

    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = Some(timestamps);
        self
    }

    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = Some(tail.into());
        self
    }
}

impl<'a> Containers<'a> {
    pub(crate) fn new(client: &'a DockerClient) -> Self {
        Self { client }
    }

    /// `GET /containers/json` — list containers.
    pub async fn list(
        &self,
        options: &ContainerListOptions,
    ) -> Result<Vec<ContainerSummary>, EngineError> {
        let mut query = QueryString::new();
        query.push_opt("all", options.all);
        query.push_opt("limit", options.limit);
        query.push_opt("size", options.size);
        query.push_json_opt("filters", options.filters.as_ref())?;

        let url = self.client.url(&query.apply("/containers/json"));
        self.client.send_json(self.client.http().get(url)).await
    }

    /// `POST /containers/create` — create a container from `body`, which
    /// is serialized exactly as given (no field renaming, no defaulting).
    pub async fn create(
        &self,
        name: Option<&str>,
        body: &ContainerCreateBody,
    ) -> Result<ContainerCreateResponse, EngineError> {
        let mut query = QueryString::new();
        query.push_opt("name", name);

        let url = self.client.url(&query.apply("/containers/create"));
        self.client
            .send_json(self.client.http().post(url).json(body))
            .await
    }

    /// `GET /containers/{id}/json` — low-level information about a
    /// container. `size` additionally computes `SizeRw`/`SizeRootFs`.
    pub async fn inspect(
        &self,
        id: &str,
        size: Option<bool>,
    ) -> Result<ContainerInspect, EngineError> {
        let mut query = QueryString::new();
        query.push_opt("size", size);

        let url = self
            .client
            .url(&query.apply(&format!("/containers/{}/json", id)));
        self.client.send_json(self.client.http().get(url)).await
    }

    /// `GET /containers/{id}/top` — processes running inside a container.
    /// `ps_args` are passed to `ps` on the daemon host (default `-ef`).
    pub async fn top(
        &self,
        id: &str,
        ps_args: Option<&str>,
    ) -> Result<ContainerTopResponse, EngineError> {
        let mut query = QueryString::new();
        query.push_opt("ps_args", ps_args);

        let url = self
            .client
            .url(&query.apply(&format!("/containers/{}/top", id)));
        self.client.send_json(self.client.http().get(url)).await
    }

    /// `GET /containers/{id}/logs` — stdout/stderr output as a raw byte
    /// stream. The caller owns the stream; dropping it cancels the
    /// transfer (relevant with `follow`).
    pub async fn logs(
        &self,
        id: &str,
        options: &ContainerLogsOptions,
    ) -> Result<ByteStream, EngineError> {
        let mut query = QueryString::new();
        query.push_opt("follow", options.follow);
        query.push_opt("stdout", options.stdout);
        query.push_opt("stderr", options.stderr);
        query.push_opt("since", options.since);
        query.push_opt("until", options.until);
        query.push_opt("timestamps", options.timestamps);
        query.push_opt("tail", options.tail.as_deref());

        let url = self
            .client
            .url(&query.apply(&format!("/containers/{}/logs", id)));
        self.client.send_stream(self.client.http().get(url)).await
    }

    /// `GET /containers/{id}/changes` — files and directories changed
    /// since the container started.
    pub async fn changes(&self, id: &str) -> Result<Vec<ContainerChange>, EngineError> {
        let url = self.client.url(&format!("/containers/{}/changes", id));
        self.client.send_json(self.client.http().get(url)).await
    }

    /// `GET /containers/{id}/export` — the container's filesystem as a
    /// tar archive byte stream.
    pub async fn export(&self, id: &str) -> Result<ByteStream, EngineError> {
        let url = self.client.url(&format!("/containers/{}/export", id));
        self.client.send_stream(self.client.http().get(url)).await
    }

    /// `GET /containers/{id}/stats` — one resource usage snapshot.
    ///
    /// Always sends `stream=false` and `one-shot=true`: this client never
    /// opens the live statistics stream the API also supports.
    pub async fn stats(&self, id: &str) -> Result<ContainerStats, EngineError> {
        let mut query = QueryString::new();
        query.push("stream", false);
        query.push("one-shot", true);

        let url = self
            .client
            .url(&query.apply(&format!("/containers/{}/stats", id)));
        self.client.send_json(self.client.http().get(url)).await
    }

    /// `POST /containers/{id}/start`.
    pub async fn start(&self, id: &str, detach_keys: Option<&str>) -> Result<(), EngineError> {
        let mut query = QueryString::new();
        query.push_opt("detachKeys", detach_keys);

        let url = self
            .client
            .url(&query.apply(&format!("/containers/{}/start", id)));
        self.client.send_unit(self.client.http().post(url)).await
    }

    /// `POST /containers/{id}/stop`. `timeout` is the grace period in
    /// seconds before the container is killed (query key `t`).
    pub async fn stop(
        &self,
        id: &str,
        timeout: Option<i64>,
        signal: Option<&str>,
    ) -> Result<(), EngineError> {
        let mut query = QueryString::new();
        query.push_opt("signal", signal);
        query.push_opt("t", timeout);

        let url = self
            .client
            .url(&query.apply(&format!("/containers/{}/stop", id)));
        self.client.send_unit(self.client.http().post(url)).await
    }

    /// `POST /containers/{id}/restart`.
    pub async fn restart(
        &self,
        id: &str,
        timeout: Option<i64>,
        signal: Option<&str>,
    ) -> Result<(), EngineError> {
        let mut query = QueryString::new();
        query.push_opt("signal", signal);
        query.push_opt("t", timeout);

        let url = self
            .client
            .url(&query.apply(&format!("/containers/{}/restart", id)));
        self.client.send_unit(self.client.http().post(url)).await
    }

    /// `POST /containers/{id}/kill`. `signal` defaults to `SIGKILL` on
    /// the daemon side.
    pub async fn kill(&self, id: &str, signal: Option<&str>) -> Result<(), EngineError> {
        let mut query = QueryString::new();
        query.push_opt("signal", signal);

        let url = self
            .client
            .url(&query.apply(&format!("/containers/{}/kill", id)));
        self.client.send_unit(self.client.http().post(url)).await
    }

    /// `POST /containers/{id}/update` — change resource limits of a
    /// running container.
    pub async fn update(
        &self,
        id: &str,
        config: &UpdateConfig,
    ) -> Result<ContainerUpdateResponse, EngineError> {
        let url = self.client.url(&format!("/containers/{}/update", id));
        self.client
            .send_json(self.client.http().post(url).json(config))
            .await
    }

    /// `POST /containers/{id}/rename`.
    pub async fn rename(&self, id: &str, name: &str) -> Result<(), EngineError> {
        let mut query = QueryString::new();
        query.push("name", name);

        let url = self
            .client
            .url(&query.apply(&format!("/containers/{}/rename", id)));
        self.client.send_unit(self.client.http().post(url)).await
    }

    /// `POST /containers/{id}/pause` — suspend all processes via the
    /// freezer cgroup.
    pub async fn pause(&self, id: &str) -> Result<(), EngineError> {
        let url = self.client.url(&format!("/containers/{}/pause", id));
        self.client.send_unit(self.client.http().post(url)).await
    }

    /// `POST /containers/{id}/unpause`.
    pub async fn unpause(&self, id: &str) -> Result<(), EngineError> {
        let url = self.client.url(&format!("/containers/{}/unpause", id));
        self.client.send_unit(self.client.http().post(url)).await
    }

    /// `POST /containers/prune` — delete stopped containers.
    pub async fn prune(
        &self,
        filters: Option<&FilterMap>,
    ) -> Result<ContainerPruneResponse, EngineError> {
        let mut query = QueryString::new();
        query.push_json_opt("filters", filters)?;

        let url = self.client.url(&query.apply("/containers/prune"));
        self.client.send_json(self.client.http().post(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_options_accumulate_filters() {
        let options = ContainerListOptions::default()
            .with_all(true)
            .with_limit(5)
            .with_filter("status", "running")
            .with_filter("status", "paused");
        assert_eq!(options.all, Some(true));
        assert_eq!(options.limit, Some(5));
        assert_eq!(
            options.filters.unwrap()["status"],
            vec!["running", "paused"]
        );
    }

    #[test]
    fn logs_options_preset_selects_both_streams() {
        let options = ContainerLogsOptions::stdout_and_stderr().with_tail("100");
        assert_eq!(options.stdout, Some(true));
        assert_eq!(options.stderr, Some(true));
        assert_eq!(options.follow, None);
        assert_eq!(options.tail.as_deref(), Some("100"));
    }
}
