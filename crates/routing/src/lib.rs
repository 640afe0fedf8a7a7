//! # Schemata Routing
//!
//! Composition of routes, route groups and middleware into a flat route
//! table. There is no server here: the table maps `"METHOD pattern"` keys to
//! fully wrapped handlers and the caller mounts them wherever it likes.
//!
//! ## Core Concepts
//!
//! - **Route**: method, pattern, handler and its own middleware
//! - **RouteGroup**: a prefix plus nested routes, groups and middleware
//! - **RouteItem**: the closed set of things a group or app accepts
//! - **App**: top-level registration and global middleware
//!
//! Middleware ordering is global, then each enclosing group from outer to
//! inner, then the route's own. The first middleware in that order ends up
//! outermost.

pub mod app;
pub mod method;
pub mod route;

pub use app::{App, RouteTable};
pub use method::Method;
pub use route::{Middleware, Route, RouteGroup, RouteItem, middleware};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
