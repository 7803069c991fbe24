//! # Communication layer
//!
//! Named, typed, process-local topics connecting nodes:
//!
//! ```rust,no_run
//! use serpent_core::communication::Hub;
//! let hub: Hub<String> = Hub::new("topic_name").unwrap();
//! ```
//!
//! Every `Hub` created with the same name shares one bounded queue, so a
//! publisher and a subscriber only need to agree on the topic string.

pub mod hub;

pub use hub::{Hub, HubMetrics};
