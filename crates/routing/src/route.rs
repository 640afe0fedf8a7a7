//! Routes, groups and the items they are composed from

use std::fmt;
use std::sync::Arc;

use crate::method::Method;

/// Handler transformer applied around a route's handler
pub type Middleware<H> = Arc<dyn Fn(H) -> H + Send + Sync>;

/// Box a closure as a [`Middleware`]
pub fn middleware<H, F>(f: F) -> Middleware<H>
where
    F: Fn(H) -> H + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Apply `chain` so that its first entry is the outermost wrapper
pub(crate) fn wrap<H>(handler: H, chain: &[Middleware<H>]) -> H {
    chain
        .iter()
        .rev()
        .fold(handler, |inner, middleware| middleware(inner))
}

// ============================================================================
// Route
// ============================================================================

/// A single method + pattern registration
#[derive(Clone)]
pub struct Route<H> {
    method: Method,
    pattern: String,
    handler: H,
    middlewares: Vec<Middleware<H>>,
}

impl<H> Route<H> {
    /// Route for an arbitrary method
    pub fn new(method: Method, pattern: impl Into<String>, handler: H) -> Self {
        Self {
            method,
            pattern: pattern.into(),
            handler,
            middlewares: Vec::new(),
        }
    }

    /// `GET` route
    pub fn get(pattern: impl Into<String>, handler: H) -> Self {
        Self::new(Method::Get, pattern, handler)
    }

    /// `POST` route
    pub fn post(pattern: impl Into<String>, handler: H) -> Self {
        Self::new(Method::Post, pattern, handler)
    }

    /// `PUT` route
    pub fn put(pattern: impl Into<String>, handler: H) -> Self {
        Self::new(Method::Put, pattern, handler)
    }

    /// `DELETE` route
    pub fn delete(pattern: impl Into<String>, handler: H) -> Self {
        Self::new(Method::Delete, pattern, handler)
    }

    /// `PATCH` route
    pub fn patch(pattern: impl Into<String>, handler: H) -> Self {
        Self::new(Method::Patch, pattern, handler)
    }

    /// Attach route-level middleware, innermost of the chain
    pub fn with<F>(mut self, f: F) -> Self
    where
        F: Fn(H) -> H + Send + Sync + 'static,
    {
        self.middlewares.push(Arc::new(f));
        self
    }

    /// HTTP method
    pub fn method(&self) -> Method {
        self.method
    }

    /// Pattern as registered, prefix included once flattened
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Number of route-level middlewares
    pub fn middleware_count(&self) -> usize {
        self.middlewares.len()
    }

    /// `"METHOD pattern"`
    pub fn key(&self) -> String {
        format!("{} {}", self.method, self.pattern)
    }
}

impl<H: Clone> Route<H> {
    /// Handler wrapped in this route's middleware
    pub fn handle(&self) -> H {
        wrap(self.handler.clone(), &self.middlewares)
    }

    /// Copy of this route under `prefix`, with `outer` running before its own
    /// middleware
    fn nested(&self, prefix: &str, outer: &[Middleware<H>]) -> Self {
        let mut middlewares = outer.to_vec();
        middlewares.extend(self.middlewares.iter().cloned());

        Self {
            method: self.method,
            pattern: format!("{}{}", prefix, self.pattern),
            handler: self.handler.clone(),
            middlewares,
        }
    }
}

impl<H> fmt::Debug for Route<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("middlewares", &self.middlewares.len())
            .finish()
    }
}

// ============================================================================
// RouteItem
// ============================================================================

/// Everything a group accepts
pub enum RouteItem<H> {
    Route(Route<H>),
    Group(RouteGroup<H>),
    Middleware(Middleware<H>),
    Middlewares(Vec<Middleware<H>>),
}

impl<H> RouteItem<H> {
    /// Whether this item only carries middleware
    pub fn is_middleware(&self) -> bool {
        matches!(self, RouteItem::Middleware(_) | RouteItem::Middlewares(_))
    }

    /// Short name used in registration errors
    pub fn kind(&self) -> &'static str {
        match self {
            RouteItem::Route(_) => "route",
            RouteItem::Group(_) => "group",
            RouteItem::Middleware(_) => "middleware",
            RouteItem::Middlewares(_) => "middleware list",
        }
    }
}

impl<H> From<Route<H>> for RouteItem<H> {
    fn from(route: Route<H>) -> Self {
        RouteItem::Route(route)
    }
}

impl<H> From<RouteGroup<H>> for RouteItem<H> {
    fn from(group: RouteGroup<H>) -> Self {
        RouteItem::Group(group)
    }
}

impl<H> From<Middleware<H>> for RouteItem<H> {
    fn from(middleware: Middleware<H>) -> Self {
        RouteItem::Middleware(middleware)
    }
}

impl<H> From<Vec<Middleware<H>>> for RouteItem<H> {
    fn from(middlewares: Vec<Middleware<H>>) -> Self {
        RouteItem::Middlewares(middlewares)
    }
}

impl<H> fmt::Debug for RouteItem<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteItem::Route(route) => f.debug_tuple("Route").field(route).finish(),
            RouteItem::Group(group) => f.debug_tuple("Group").field(group).finish(),
            RouteItem::Middleware(_) => f.write_str("Middleware"),
            RouteItem::Middlewares(list) => write!(f, "Middlewares({})", list.len()),
        }
    }
}

// ============================================================================
// RouteGroup
// ============================================================================

/// Routes and nested groups sharing a prefix and middleware
///
/// Group middleware applies to every route in the group no matter where it
/// appears in the item list.
#[derive(Clone)]
pub struct RouteGroup<H> {
    prefix: String,
    middlewares: Vec<Middleware<H>>,
    routes: Vec<Route<H>>,
    groups: Vec<RouteGroup<H>>,
}

impl<H> RouteGroup<H> {
    /// Group under `prefix`, sorting `items` into routes, groups and middleware
    pub fn new<I>(prefix: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = RouteItem<H>>,
    {
        let mut group = Self {
            prefix: prefix.into(),
            middlewares: Vec::new(),
            routes: Vec::new(),
            groups: Vec::new(),
        };

        for item in items {
            match item {
                RouteItem::Route(route) => group.routes.push(route),
                RouteItem::Group(nested) => group.groups.push(nested),
                RouteItem::Middleware(middleware) => group.middlewares.push(middleware),
                RouteItem::Middlewares(list) => group.middlewares.extend(list),
            }
        }

        group
    }

    /// Prefix as given, without parents
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number of routes in this group and all nested groups
    pub fn route_count(&self) -> usize {
        self.routes.len() + self.groups.iter().map(RouteGroup::route_count).sum::<usize>()
    }
}

impl<H: Clone> RouteGroup<H> {
    /// Direct routes first, then nested groups depth-first
    pub fn flatten(&self, parent_prefix: &str, parent_middlewares: &[Middleware<H>]) -> Vec<Route<H>> {
        let prefix = format!("{}{}", parent_prefix, self.prefix);
        let mut chain = parent_middlewares.to_vec();
        chain.extend(self.middlewares.iter().cloned());

        let mut routes: Vec<Route<H>> = self
            .routes
            .iter()
            .map(|route| route.nested(&prefix, &chain))
            .collect();

        for group in &self.groups {
            routes.extend(group.flatten(&prefix, &chain));
        }

        routes
    }
}

impl<H> fmt::Debug for RouteGroup<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteGroup")
            .field("prefix", &self.prefix)
            .field("middlewares", &self.middlewares.len())
            .field("routes", &self.routes)
            .field("groups", &self.groups)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    type Handler = Arc<dyn Fn(&str) -> String + Send + Sync>;

    fn handler(name: &'static str) -> Handler {
        Arc::new(move |req: &str| format!("{}:{}", name, req))
    }

    fn tag(name: &'static str) -> impl Fn(Handler) -> Handler + Send + Sync + 'static {
        move |inner: Handler| -> Handler { Arc::new(move |req: &str| format!("{}({})", name, inner(req))) }
    }

    #[test]
    fn test_route_constructors() {
        let routes = vec![
            Route::get("/a", handler("a")),
            Route::post("/a", handler("a")),
            Route::put("/a", handler("a")),
            Route::delete("/a", handler("a")),
            Route::patch("/a", handler("a")),
        ];
        let keys: Vec<String> = routes.iter().map(Route::key).collect();
        assert_eq!(keys, vec!["GET /a", "POST /a", "PUT /a", "DELETE /a", "PATCH /a"]);
    }

    #[test]
    fn test_route_middleware_first_is_outermost() {
        let route = Route::get("/", handler("h")).with(tag("a")).with(tag("b"));
        assert_eq!(route.middleware_count(), 2);
        assert_eq!((route.handle())("r"), "a(b(h:r))");
    }

    #[test]
    fn test_group_sorts_items() {
        let v2: Vec<RouteItem<Handler>> = vec![Route::get("/x", handler("x")).into()];
        let items: Vec<RouteItem<Handler>> = vec![
            Route::get("/users", handler("list")).into(),
            middleware(tag("auth")).into(),
            RouteGroup::new("/v2", v2).into(),
            vec![middleware(tag("log")), middleware(tag("trace"))].into(),
        ];
        let group = RouteGroup::new("/api", items);

        assert_eq!(group.prefix(), "/api");
        assert_eq!(group.route_count(), 2);
        assert_eq!(group.middlewares.len(), 3);
    }

    #[test]
    fn test_flatten_concatenates_prefixes_and_middleware() {
        let admin: Vec<RouteItem<Handler>> = vec![
            middleware(tag("admin")).into(),
            Route::delete("/users/{id}", handler("del")).with(tag("audit")).into(),
        ];
        let api: Vec<RouteItem<Handler>> = vec![
            RouteGroup::new("/admin", admin).into(),
            Route::get("/health", handler("ok")).into(),
            middleware(tag("auth")).into(),
        ];
        let outer = RouteGroup::new("/api", api);

        let routes = outer.flatten("", &[]);
        let keys: Vec<String> = routes.iter().map(Route::key).collect();
        assert_eq!(keys, vec!["GET /api/health", "DELETE /api/admin/users/{id}"]);

        assert_eq!((routes[0].handle())("r"), "auth(ok:r)");
        assert_eq!((routes[1].handle())("r"), "auth(admin(audit(del:r)))");
    }

    #[test]
    fn test_item_classification() {
        let item: RouteItem<Handler> = middleware(tag("m")).into();
        assert!(item.is_middleware());
        assert_eq!(item.kind(), "middleware");

        let item: RouteItem<Handler> = Route::get("/", handler("h")).into();
        assert!(!item.is_middleware());
        assert_eq!(format!("{:?}", item), "Route(Route { method: Get, pattern: \"/\", middlewares: 0 })");
    }
}
