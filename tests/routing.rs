//! Route composition through the public facade

use std::sync::Arc;

use pretty_assertions::assert_eq;
use schemata::routing::{App, Method, Route, RouteGroup, RouteItem, middleware};

type Handler = Arc<dyn Fn(&str) -> String + Send + Sync>;

fn respond(body: &'static str) -> Handler {
    Arc::new(move |path: &str| format!("{} {}", body, path))
}

fn prefix_with(label: &'static str) -> impl Fn(Handler) -> Handler + Send + Sync + 'static {
    move |next: Handler| -> Handler { Arc::new(move |path: &str| format!("[{}] {}", label, next(path))) }
}

#[test]
fn test_nested_groups_build_route_table() -> anyhow::Result<()> {
    let admin: Vec<RouteItem<Handler>> = vec![
        Route::delete("/posts/{id}", respond("deleted")).into(),
        middleware(prefix_with("admin")).into(),
    ];
    let api: Vec<RouteItem<Handler>> = vec![
        vec![middleware(prefix_with("cors")), middleware(prefix_with("auth"))].into(),
        Route::get("/posts", respond("posts")).into(),
        Route::patch("/posts/{id}", respond("patched")).with(prefix_with("etag")).into(),
        RouteGroup::new("/admin", admin).into(),
    ];

    let mut app = App::new();
    app.use_middleware(prefix_with("log"));
    app.routes(vec![
        RouteItem::from(Route::get("/", respond("home"))),
        RouteItem::from(RouteGroup::new("/api/v1", api)),
    ])?;

    let table = app.route_table()?;
    assert_eq!(
        table.keys().collect::<Vec<_>>(),
        vec![
            "DELETE /api/v1/admin/posts/{id}",
            "GET /",
            "GET /api/v1/posts",
            "PATCH /api/v1/posts/{id}",
        ]
    );

    let delete = table
        .handler(Method::Delete, "/api/v1/admin/posts/{id}")
        .ok_or_else(|| anyhow::anyhow!("missing route"))?;
    assert_eq!(delete("/x"), "[log] [cors] [auth] [admin] deleted /x");

    let patch = table.get("PATCH /api/v1/posts/{id}").ok_or_else(|| anyhow::anyhow!("missing route"))?;
    assert_eq!(patch("/y"), "[log] [cors] [auth] [etag] patched /y");
    Ok(())
}

#[test]
fn test_app_rejects_bare_middleware() {
    let mut app: App<Handler> = App::new();
    let err = app
        .routes(vec![RouteItem::from(middleware(prefix_with("oops")))])
        .unwrap_err();
    assert!(err.is_configuration());
}
