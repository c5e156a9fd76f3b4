//! SQL DDL for initializing the relational store.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `users.email` UNIQUE — the sole concurrency-control point for account
///   creation (duplicate inserts fail here, not in application locking)
/// - `users.password_digest` — bcrypt output only, never plaintext
/// - `departments.org_id` FK with ON DELETE CASCADE
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_digest TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'user'
);

CREATE TABLE IF NOT EXISTS organizations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NULL
);

CREATE TABLE IF NOT EXISTS departments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    org_id INTEGER NOT NULL REFERENCES organizations(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_departments_org_id ON departments(org_id);
"#;
