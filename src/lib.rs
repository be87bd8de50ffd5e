//! dockhand: typed asynchronous client for the Docker Engine HTTP API.
//!
//! This library translates image and container lifecycle operations into
//! single HTTP round trips against a Docker daemon. It builds query strings,
//! serializes JSON and tar bodies, and maps daemon error responses into a
//! typed error — all lifecycle semantics live in the daemon itself.
//!
//! # Example
//!
//! ```ignore
//! use dockhand::{ContainerListOptions, DockerClient};
//!
//! let client = DockerClient::new("http://localhost:2375");
//!
//! let running = client
//!     .containers()
//!     .list(&ContainerListOptions::default().with_filter("status", "running"))
//!     .await?;
//!
//! for container in running {
//!     println!("{:?} {:?}", container.id, container.names);
//! }
//! ```

pub mod client;
pub mod containers;
pub mod error;
pub mod images;
pub mod models;
mod query;

pub use client::{ByteStream, DockerClient};
pub use containers::{ContainerListOptions, ContainerLogsOptions, Containers};
pub use error::EngineError;
pub use images::{BuildPruneOptions, ImageBuildOptions, ImageCreateOptions, ImageListOptions, Images};
