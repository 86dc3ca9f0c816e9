//! Clients for the services sitegen talks to.
//!
//! Two capabilities sit behind traits so callers never care where bundles
//! come from or where projects are kept:
//! - [`GenerationService`]: prompt in, [`GeneratedWebsite`](sg_common::GeneratedWebsite) out
//! - [`ProjectStore`]: list, get, save, update and delete named projects
//!
//! [`HttpApi`] implements both against the remote REST API.
//! [`MemoryProjectStore`] and [`StaticGenerator`] implement them in-process.

pub mod error;
pub mod http;
pub mod memory;
pub mod service;

pub use error::{ClientError, Result};
pub use http::{HttpApi, DEFAULT_TIMEOUT};
pub use memory::{title_from_prompt, MemoryProjectStore, StaticGenerator};
pub use service::{GenerationService, ProjectStore};
