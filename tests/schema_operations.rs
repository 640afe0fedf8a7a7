//! End-to-end schema operations against a recording connection

use std::io;

use pretty_assertions::assert_eq;
use schemata::prelude::*;
use schemata::{MySqlOptions, PostgresOptions};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Records every statement and fails the `fail_at`-th execution
#[derive(Default)]
struct RecordingConnection {
    statements: Vec<String>,
    attempts: usize,
    fail_at: Option<usize>,
    scalar: Option<ScalarValue>,
    params: Vec<Vec<String>>,
}

impl RecordingConnection {
    fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Default::default()
        }
    }

    fn answering(value: ScalarValue) -> Self {
        Self {
            scalar: Some(value),
            ..Default::default()
        }
    }
}

impl Connection for RecordingConnection {
    type Error = io::Error;

    fn execute(&mut self, sql: &str) -> Result<(), io::Error> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_at == Some(attempt) {
            return Err(io::Error::other(format!("statement {} refused", attempt)));
        }
        self.statements.push(sql.to_string());
        Ok(())
    }

    fn query_scalar(&mut self, _sql: &str, params: &[&str]) -> Result<ScalarValue, io::Error> {
        self.params.push(params.iter().map(|p| p.to_string()).collect());
        self.scalar
            .clone()
            .ok_or_else(|| io::Error::other("no scalar configured"))
    }
}

#[test]
fn test_mysql_create_single_statement() -> anyhow::Result<()> {
    init_tracing();
    let mut conn = RecordingConnection::default();

    Schema::mysql(&mut conn).create("users", |t| {
        t.string("name", 255).not_nullable();
        t.integer("age").nullable().default(0);
    })?;

    assert_eq!(
        conn.statements,
        vec![
            "CREATE TABLE `users` (\n  `name` VARCHAR(255) NOT NULL,\n  `age` INT DEFAULT 0\n) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci"
        ]
    );
    Ok(())
}

#[test]
fn test_postgres_create_statement_groups() -> anyhow::Result<()> {
    init_tracing();
    let mut conn = RecordingConnection::default();

    Schema::postgres(&mut conn).create("comments", |t| {
        t.id();
        t.big_integer("post_id");
        t.text("body");
        t.index(&["post_id"]);
        t.index(&["body"]);
        t.foreign("post_id")
            .references("id")
            .on("posts")
            .on_delete(ReferentialAction::Cascade);
    })?;

    assert_eq!(
        conn.statements,
        vec![
            "CREATE TABLE \"comments\" (\n  \"id\" BIGSERIAL PRIMARY KEY,\n  \"post_id\" BIGINT NOT NULL,\n  \"body\" TEXT NOT NULL\n)",
            "CREATE INDEX post_id_index ON \"comments\" (post_id)",
            "CREATE INDEX body_index ON \"comments\" (body)",
            "ALTER TABLE \"comments\" ADD FOREIGN KEY (post_id) REFERENCES posts (id)",
            "ALTER TABLE \"comments\" ADD FOREIGN KEY (post_id) REFERENCES posts (id) ON DELETE CASCADE",
        ]
    );
    Ok(())
}

#[test]
fn test_execution_stops_at_first_failure() {
    init_tracing();
    let mut conn = RecordingConnection::failing_at(1);

    let err = Schema::postgres(&mut conn)
        .create("tags", |t| {
            t.serial("id");
            t.string("label", 40);
            t.index(&["label"]);
            t.unique_index(&["label"]);
        })
        .unwrap_err();

    assert!(err.is_execution());
    assert_eq!(err.to_string(), "statement 1 refused");
    assert_eq!(conn.attempts, 2);
    assert_eq!(conn.statements.len(), 1);
    assert!(conn.statements[0].starts_with("CREATE TABLE \"tags\""));
}

#[test]
fn test_alter_never_emits_foreign_keys() -> anyhow::Result<()> {
    init_tracing();

    let mut mysql = RecordingConnection::default();
    Schema::mysql(&mut mysql).table("posts", |t| {
        t.big_integer("editor_id").nullable().after("user_id");
        t.foreign("editor_id").references("id").on("users").on_delete("SET NULL");
    })?;

    let mut postgres = RecordingConnection::default();
    Schema::postgres(&mut postgres).table("posts", |t| {
        t.big_integer("editor_id").nullable();
        t.foreign("editor_id").references("id").on("users").on_delete("SET NULL");
    })?;

    assert_eq!(
        mysql.statements,
        vec!["ALTER TABLE `posts` ADD COLUMN `editor_id` BIGINT AFTER `user_id`"]
    );
    assert_eq!(
        postgres.statements,
        vec!["ALTER TABLE \"posts\" ADD COLUMN \"editor_id\" BIGINT"]
    );
    Ok(())
}

#[test]
fn test_drop_and_drop_if_exists() -> anyhow::Result<()> {
    let mut conn = RecordingConnection::default();
    {
        let mut schema = Schema::postgres(&mut conn);
        schema.drop_if_exists("sessions")?;
        schema.drop("sessions")?;
    }

    assert_eq!(
        conn.statements,
        vec!["DROP TABLE IF EXISTS \"sessions\"", "DROP TABLE \"sessions\""]
    );
    Ok(())
}

#[test]
fn test_existence_checks() -> anyhow::Result<()> {
    let mut conn = RecordingConnection::answering(ScalarValue::Int(1));
    assert!(Schema::mysql(&mut conn).has_table("users")?);

    conn.scalar = Some(ScalarValue::Bool(false));
    assert!(!Schema::postgres(&mut conn).has_column("users", "email")?);

    conn.scalar = Some(ScalarValue::Text("t".into()));
    assert!(Schema::postgres(&mut conn).has_table("users")?);

    assert_eq!(
        conn.params,
        vec![
            vec!["users"],
            vec!["public", "users", "email"],
            vec!["public", "users"],
        ]
    );
    Ok(())
}

#[test]
fn test_existence_check_propagates_query_error() {
    let mut conn = RecordingConnection::default();
    let err = Schema::mysql(&mut conn).has_column("users", "id").unwrap_err();
    assert_eq!(err.to_string(), "no scalar configured");
}

#[test]
fn test_custom_options_flow_into_sql() -> anyhow::Result<()> {
    let options = MySqlOptions::from_toml_str("engine = \"MyISAM\"\ncharset = \"latin1\"")?;
    let mut conn = RecordingConnection::default();
    Schema::new(&mut conn, MySql::new(options)).create("logs", |t| {
        t.text("line");
    })?;
    assert!(conn.statements[0].ends_with(") ENGINE=MyISAM DEFAULT CHARSET=latin1 COLLATE=utf8mb4_unicode_ci"));

    let options = PostgresOptions::from_json_str(r#"{"schema": "o'brien"}"#)?;
    let mut conn = RecordingConnection::answering(ScalarValue::Bool(true));
    assert!(Schema::new(&mut conn, Postgres::new(options)).has_table("users")?);
    assert_eq!(conn.params, vec![vec!["o'brien", "users"]]);
    Ok(())
}

#[test]
fn test_dialect_helpers_through_schema() -> anyhow::Result<()> {
    let mut conn = RecordingConnection::default();

    Schema::mysql(&mut conn).create("places", |t| {
        t.enumeration("kind", &["city", "town"]).default("'city'");
        t.point("location");
    })?;
    Schema::postgres(&mut conn).create("hosts", |t| {
        t.inet("ip");
        t.array("aliases", "TEXT").default("{}");
    })?;

    assert!(conn.statements[0].contains("`kind` ENUM('city', 'town') NOT NULL DEFAULT 'city'"));
    assert!(conn.statements[0].contains("`location` POINT NOT NULL"));
    assert!(conn.statements[1].contains("\"aliases\" TEXT[] NOT NULL DEFAULT '{}'"));
    Ok(())
}
