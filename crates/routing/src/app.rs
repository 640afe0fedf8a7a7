//! Application-level registration and the flattened route table

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use schemata_core::{SchemaError, SchemaResult};

use crate::method::Method;
use crate::route::{Middleware, Route, RouteGroup, RouteItem, wrap};

// ============================================================================
// App
// ============================================================================

/// Top-level route registration
///
/// Only routes and groups may be passed to [`App::routes`]; global middleware
/// goes through [`App::use_middleware`].
pub struct App<H> {
    routes: Vec<Route<H>>,
    groups: Vec<RouteGroup<H>>,
    middlewares: Vec<Middleware<H>>,
}

impl<H> Default for App<H> {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            groups: Vec::new(),
            middlewares: Vec::new(),
        }
    }
}

impl<H> App<H> {
    /// App with no routes or middleware
    pub fn new() -> Self {
        Self::default()
    }

    /// Register routes and groups
    ///
    /// A middleware item rejects the whole call and registers nothing.
    pub fn routes<I>(&mut self, items: I) -> SchemaResult<()>
    where
        I: IntoIterator<Item = RouteItem<H>>,
    {
        let items: Vec<RouteItem<H>> = items.into_iter().collect();

        if let Some(item) = items.iter().find(|item| item.is_middleware()) {
            return Err(SchemaError::configuration(format!(
                "a {} cannot be registered as a route; use App::use_middleware or a group",
                item.kind()
            )));
        }

        for item in items {
            match item {
                RouteItem::Route(route) => self.routes.push(route),
                RouteItem::Group(group) => self.groups.push(group),
                RouteItem::Middleware(_) | RouteItem::Middlewares(_) => {}
            }
        }

        tracing::debug!(
            routes = self.routes.len(),
            groups = self.groups.len(),
            "registered routes"
        );
        Ok(())
    }

    /// Register global middleware, outermost of every chain
    pub fn use_middleware<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(H) -> H + Send + Sync + 'static,
    {
        self.middlewares.push(Arc::new(f));
        self
    }
}

impl<H: Clone> App<H> {
    /// Every registered route with prefixes applied, direct routes first
    pub fn flatten(&self) -> Vec<Route<H>> {
        let mut routes = self.routes.clone();
        for group in &self.groups {
            routes.extend(group.flatten("", &[]));
        }
        routes
    }

    /// Build the `"METHOD pattern"` table of fully wrapped handlers
    ///
    /// Two registrations with the same method and pattern are a
    /// configuration error.
    pub fn route_table(&self) -> SchemaResult<RouteTable<H>> {
        let mut entries = BTreeMap::new();

        for route in self.flatten() {
            let key = route.key();
            if entries.contains_key(&key) {
                tracing::warn!(key = key.as_str(), "duplicate route");
                return Err(SchemaError::configuration(format!(
                    "route '{}' is registered more than once",
                    key
                )));
            }

            let handler = wrap(route.handle(), &self.middlewares);
            entries.insert(key, handler);
        }

        tracing::info!(routes = entries.len(), "built route table");
        Ok(RouteTable { entries })
    }
}

impl<H> fmt::Debug for App<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("routes", &self.routes)
            .field("groups", &self.groups)
            .field("middlewares", &self.middlewares.len())
            .finish()
    }
}

// ============================================================================
// RouteTable
// ============================================================================

/// Flattened routes keyed by `"METHOD pattern"`
pub struct RouteTable<H> {
    entries: BTreeMap<String, H>,
}

impl<H> RouteTable<H> {
    /// Exact lookup, no pattern matching
    pub fn handler(&self, method: Method, path: &str) -> Option<&H> {
        self.entries.get(&format!("{} {}", method, path))
    }

    /// Lookup by full `"METHOD pattern"` key
    pub fn get(&self, key: &str) -> Option<&H> {
        self.entries.get(key)
    }

    /// Keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of routes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H> fmt::Debug for RouteTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.keys()).finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
