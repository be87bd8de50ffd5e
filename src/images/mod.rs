//! Image-side operations of the Engine API.
//!
//! Each function is one HTTP round trip: compose the endpoint, append the
//! query parameters the caller actually supplied, send, and map the
//! response. Registry credentials travel base64-JSON-encoded in the
//! `X-Registry-Config` / `X-Registry-Auth` headers.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::client::DockerClient;
use crate::error::EngineError;
use crate::models::{
    BuildPruneResponse, FilterMap, ImageInspect, ImageSummary, RegistryAuth, RegistryConfig,
};
use crate::query::QueryString;

/// Default body type for the build endpoint's tar archive.
const TAR_CONTENT_TYPE: &str = "application/x-tar";

/// Stateless handle to the image endpoints of one daemon.
///
/// Obtained from [`DockerClient::images`]; holds nothing but a borrow of
/// the client.
pub struct Images<'a> {
    client: &'a DockerClient,
}

/// Options for [`Images::list`].
#[derive(Debug, Clone, Default)]
pub struct ImageListOptions {
    /// Include intermediate images.
    pub all: Option<bool>,
    pub filters: Option<FilterMap>,
    /// Compute and return the `SharedSize` field.
    pub shared_size: Option<bool>,
    /// Include digest information.
    pub digests: Option<bool>,
}

impl ImageListOptions {
    pub fn with_all(mut self, all: bool) -> Self {
        self.all = Some(all);
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

    pub fn with_shared_size(mut self, shared_size: bool) -> Self {
        self.shared_size = Some(shared_size);
        self
    }

    pub fn with_digests(mut self, digests: bool) -> Self {
        self.digests = Some(digests);
        self
    }
}

/// Options for [`Images::build`]. Field names follow the caller-side
/// vocabulary; the query keys below are the daemon's (`rm`, `q`,
/// `nocache`, ...).
#[derive(Debug, Clone, Default)]
pub struct ImageBuildOptions {
    /// Path of the Dockerfile inside the archive (query key `dockerfile`).
    pub dockerfile: Option<String>,
    /// Names with optional tag to apply; each becomes a `t` parameter.
    pub tags: Vec<String>,
    /// Extra `host:ip` entries (query key `extrahosts`).
    pub extra_hosts: Option<String>,
    /// Git/HTTP URL to fetch the context from instead of the body.
    pub remote: Option<String>,
    /// Suppress verbose build output (query key `q`).
    pub quiet: Option<bool>,
    /// Do not use the build cache (query key `nocache`).
    pub no_cache: Option<bool>,
    /// Images to use as cache sources, JSON-encoded (query key `cachefrom`).
    pub cache_from: Option<Vec<String>>,
    /// Pull policy for the base image.
    pub pull: Option<String>,
    /// Remove intermediate containers after a successful build
    /// (query key `rm`).
    pub remove_intermediate: Option<bool>,
    /// Always remove intermediate containers (query key `forcerm`).
    pub force_remove: Option<bool>,
    /// Memory limit in bytes.
    pub memory: Option<i64>,
    /// Memory plus swap; -1 for unlimited swap (query key `memswap`).
    pub mem_swap: Option<i64>,
    pub cpu_shares: Option<i64>,
    /// CPUs the build may run on, e.g. `0-3` (query key `cpusetcpus`).
    pub cpu_set_cpus: Option<String>,
    pub cpu_period: Option<i64>,
    pub cpu_quota: Option<i64>,
    /// Build-time variables, JSON-encoded (query key `buildargs`).
    pub build_args: Option<HashMap<String, String>>,
    /// Size of `/dev/shm` in bytes (query key `shmsize`).
    pub shm_size: Option<i64>,
    /// Squash the resulting layers into one.
    pub squash: Option<bool>,
    /// Labels for the resulting image, JSON-encoded.
    pub labels: Option<HashMap<String, String>>,
    /// Networking mode for the `RUN` instructions (query key `networkmode`).
    pub network_mode: Option<String>,
    /// Platform in `os[/arch[/variant]]` form.
    pub platform: Option<String>,
    /// Target build stage.
    pub target: Option<String>,
    /// Body `Content-Type`; defaults to `application/x-tar`.
    pub content_type: Option<String>,
    /// Per-registry credentials for base image pulls, sent
    /// base64-JSON-encoded in `X-Registry-Config`.
    pub registry_config: Option<RegistryConfig>,
}

impl ImageBuildOptions {
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_dockerfile(mut self, dockerfile: impl Into<String>) -> Self {
        self.dockerfile = Some(dockerfile.into());
        self
    }

    pub fn with_build_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.build_args
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_registry_auth(mut self, registry: impl Into<String>, auth: RegistryAuth) -> Self {
        self.registry_config
            .get_or_insert_with(HashMap::new)
            .insert(registry.into(), auth);
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }
}

/// Options for [`Images::build_prune`].
#[derive(Debug, Clone, Default)]
pub struct BuildPruneOptions {
    /// Amount of disk space to keep for the cache, in bytes
    /// (query key `keep-storage`).
    pub keep_storage: Option<i64>,
    /// Remove all cache entries, not only dangling ones.
    pub all: Option<bool>,
    pub filters: Option<FilterMap>,
}

/// Options for [`Images::create`]. Exactly one of `tarball` (import from
/// an archive) or `from_src` (import from a URL, `-` for the body) must be
/// set; `from_image`/`tag` name what is being pulled or how the import is
/// tagged.
#[derive(Debug, Clone, Default)]
pub struct ImageCreateOptions {
    /// Image tarball sent as the request body.
    pub tarball: Option<Vec<u8>>,
    /// Registry credentials, sent base64-JSON-encoded in `X-Registry-Auth`.
    pub auth: Option<RegistryAuth>,
    pub from_image: Option<String>,
    pub from_src: Option<String>,
    pub repo: Option<String>,
    pub tag: Option<String>,
    /// Commit message to apply to the imported image.
    pub message: Option<String>,
    /// Dockerfile instructions to apply while importing; each becomes a
    /// `changes` parameter.
    pub changes: Option<Vec<String>>,
    pub platform: Option<String>,
}

impl<'a> Images<'a> {
    pub(crate) fn new(client: &'a DockerClient) -> Self {
        Self { client }
    }

    /// `GET /images/json` — list images known to the daemon.
    pub async fn list(&self, options: &ImageListOptions) -> Result<Vec<ImageSummary>, EngineError> {
        let mut query = QueryString::new();
        query.push_opt("all", options.all);
        query.push_json_opt("filters", options.filters.as_ref())?;
        query.push_opt("shared-size", options.shared_size);
        query.push_opt("digests", options.digests);

        let url = self.client.url(&query.apply("/images/json"));
        self.client.send_json(self.client.http().get(url)).await
    }

    /// `POST /build` — build an image from a tar archive containing the
    /// build context. Resolves to `()` on success; build progress is not
    /// surfaced.
    pub async fn build(
        &self,
        tarball: Vec<u8>,
        options: &ImageBuildOptions,
    ) -> Result<(), EngineError> {
        let mut query = QueryString::new();
        query.push_opt("dockerfile", options.dockerfile.as_deref());
        for tag in &options.tags {
            query.push("t", tag);
        }
        query.push_opt("extrahosts", options.extra_hosts.as_deref());
        query.push_opt("remote", options.remote.as_deref());
        query.push_opt("q", options.quiet);
        query.push_opt("nocache", options.no_cache);
        query.push_json_opt("cachefrom", options.cache_from.as_ref())?;
        query.push_opt("pull", options.pull.as_deref());
        query.push_opt("rm", options.remove_intermediate);
        query.push_opt("forcerm", options.force_remove);
        query.push_opt("memory", options.memory);
        query.push_opt("memswap", options.mem_swap);
        query.push_opt("cpushares", options.cpu_shares);
        query.push_opt("cpusetcpus", options.cpu_set_cpus.as_deref());
        query.push_opt("cpuperiod", options.cpu_period);
        query.push_opt("cpuquota", options.cpu_quota);
        query.push_json_opt("buildargs", options.build_args.as_ref())?;
        query.push_opt("shmsize", options.shm_size);
        query.push_opt("squash", options.squash);
        query.push_json_opt("labels", options.labels.as_ref())?;
        query.push_opt("networkmode", options.network_mode.as_deref());
        query.push_opt("platform", options.platform.as_deref());
        query.push_opt("target", options.target.as_deref());

        let url = self.client.url(&query.apply("/build"));
        let content_type = options.content_type.as_deref().unwrap_or(TAR_CONTENT_TYPE);
        let mut request = self
            .client
            .http()
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .body(tarball);
        if let Some(config) = &options.registry_config {
            request = request.header("X-Registry-Config", header_value(config)?);
        }
        self.client.send_unit(request).await
    }

    /// `POST /build/prune` — delete builder cache records.
    pub async fn build_prune(
        &self,
        options: &BuildPruneOptions,
    ) -> Result<BuildPruneResponse, EngineError> {
        let mut query = QueryString::new();
        query.push_opt("keep-storage", options.keep_storage);
        query.push_opt("all", options.all);
        query.push_json_opt("filters", options.filters.as_ref())?;

        let url = self.client.url(&query.apply("/build/prune"));
        self.client.send_json(self.client.http().post(url)).await
    }

    /// `POST /images/create` — import an image from a tarball or pull it
    /// from a source URL.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidArguments`] before any network call
    /// when both or neither of `tarball` and `from_src` are set.
    pub async fn create(&self, options: ImageCreateOptions) -> Result<(), EngineError> {
        match (&options.tarball, &options.from_src) {
            (Some(_), Some(_)) => {
                return Err(EngineError::InvalidArguments(
                    "image create takes either a tarball body or `from_src`, not both".to_string(),
                ))
            }
            (None, None) => {
                return Err(EngineError::InvalidArguments(
                    "image create requires a tarball body or `from_src`".to_string(),
                ))
            }
            _ => {}
        }

        let mut query = QueryString::new();
        query.push_opt("fromImage", options.from_image.as_deref());
        query.push_opt("fromSrc", options.from_src.as_deref());
        query.push_opt("repo", options.repo.as_deref());
        query.push_opt("tag", options.tag.as_deref());
        query.push_opt("message", options.message.as_deref());
        if let Some(changes) = &options.changes {
            for change in changes {
                query.push("changes", change);
            }
        }
        query.push_opt("platform", options.platform.as_deref());

        let url = self.client.url(&query.apply("/images/create"));
        let mut request = self.client.http().post(url);
        if let Some(auth) = &options.auth {
            request = request.header("X-Registry-Auth", header_value(auth)?);
        }
        if let Some(tarball) = options.tarball {
            request = request
                .header(CONTENT_TYPE, TAR_CONTENT_TYPE)
                .body(tarball);
        }
        self.client.send_unit(request).await
    }

    /// `GET /images/{name}/json` — low-level information about an image.
    pub async fn inspect(&self, name: &str) -> Result<ImageInspect, EngineError> {
        let url = self.client.url(&format!("/images/{}/json", name));
        self.client.send_json(self.client.http().get(url)).await
    }
}

/// Base64-encode a JSON document for the registry auth headers.
fn header_value<T: Serialize>(value: &T) -> Result<String, EngineError> {
    Ok(BASE64.encode(serde_json::to_vec(value)?))
}
