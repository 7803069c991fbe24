//! Pure computational algorithms for the snake simulation
//!
//! Nothing in here touches topics, terminals or clocks; every function takes
//! plain data and returns plain data so nodes, apps and tests can share it.
//!
//! # Available Algorithms
//!
//! - **segment_chain**: Body data model, head integration and follower motion
//! - **collision**: Boundary and self-overlap checks
//! - **food**: Food capture test and relocation inside an inset rectangle
//! - **shading**: Per-segment colours

pub mod collision;
pub mod food;
pub mod segment_chain;
pub mod shading;
