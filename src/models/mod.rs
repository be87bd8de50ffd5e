//! Pass-through representations of the Engine API JSON schemas.
//!
//! Every shape mirrors the wire format exactly — field names, casing and
//! enum numeric values — and the crate neither validates nor mutates them
//! beyond (de)serialization. The API is an open schema: the daemon may add
//! properties at any time, so fields are optional and the config structs
//! keep a flattened catch-all map for anything not modelled here.

use std::collections::HashMap;

pub mod auth;
pub mod change;
pub mod config;
pub mod container;
pub mod image;
pub mod responses;
pub mod stats;

pub use auth::{RegistryAuth, RegistryConfig};
pub use change::{ChangeKind, ContainerChange};
pub use config::{
    ContainerConfig, ContainerCreateBody, DeviceMapping, EndpointIpamConfig, EndpointSettings,
    HealthConfig, HostConfig, LogConfig, Mount, NetworkingConfig, PortBinding, RestartPolicy,
    Ulimit, UpdateConfig,
};
pub use container::{
    ContainerInspect, ContainerState, ContainerSummary, Health, MountPoint, NetworkSettings, Port,
    SummaryHostConfig, SummaryNetworkSettings,
};
pub use image::{ImageInspect, ImageMetadata, ImageSummary, RootFs};
pub use responses::{
    BuildPruneResponse, ContainerCreateResponse, ContainerPruneResponse, ContainerTopResponse,
    ContainerUpdateResponse, ErrorMessage,
};
pub use stats::{
    BlkioStatEntry, BlkioStats, ContainerStats, CpuStats, CpuUsage, MemoryStats, NetworkStats,
    PidsStats, ThrottlingData,
};

/// Filter map as the Engine API expects it on the wire: filter name to a
/// list of accepted values, JSON-encoded into a single query parameter.
pub type FilterMap = HashMap<String, Vec<String>>;
