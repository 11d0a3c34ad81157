//! SQL rendering for derived rows.
//!
//! Statements are rendered one per row with every column listed explicitly,
//! in schema order. Text is single-quoted with embedded quotes doubled;
//! integers are written bare and missing values as `NULL`. MySQL treats a
//! backslash inside a literal as an escape, so for that dialect backslashes
//! are doubled too.

use mygrate_core::types::{Row, SqlValue, TableSchema};
use mygrate_core::{ConflictPolicy, Dialect};

pub fn quote_text(value: &str, dialect: Dialect) -> String {
    let quoted = value.replace('\'', "''");
    match dialect {
        Dialect::Mysql => format!("'{}'", quoted.replace('\\', "\\\\")),
        Dialect::Sqlite => format!("'{quoted}'"),
    }
}

pub fn render_value(value: &SqlValue, dialect: Dialect) -> String {
    match value {
        SqlValue::Text(s) => quote_text(s, dialect),
        SqlValue::Integer(n) => n.to_string(),
        SqlValue::Null => "NULL".to_string(),
    }
}

/// The clause appended after `VALUES (...)` for `policy`, empty for plain
/// inserts. Every non-key column is overwritten on conflict.
pub fn conflict_clause(schema: &TableSchema, policy: ConflictPolicy, dialect: Dialect) -> String {
    if policy == ConflictPolicy::Insert {
        return String::new();
    }

    let updated = schema.columns.iter().filter(|c| !c.primary_key);
    match dialect {
        Dialect::Mysql => {
            let sets: Vec<String> = updated.map(|c| format!("{0} = VALUES({0})", c.name)).collect();
            format!(" ON DUPLICATE KEY UPDATE {}", sets.join(", "))
        }
        Dialect::Sqlite => {
            let key = schema.primary_key().unwrap_or("id");
            let sets: Vec<String> = updated.map(|c| format!("{0} = excluded.{0}", c.name)).collect();
            format!(" ON CONFLICT ({key}) DO UPDATE SET {}", sets.join(", "))
        }
    }
}

fn column_list(schema: &TableSchema) -> String {
    schema.column_names().collect::<Vec<_>>().join(", ")
}

/// Render a single `INSERT` statement (terminated by `;`, no newline).
pub fn render_statement<R: Row>(
    table: &str,
    row: &R,
    policy: ConflictPolicy,
    dialect: Dialect,
) -> String {
    render_statements(table, std::slice::from_ref(row), policy, dialect)
        .next()
        .unwrap_or_default()
}

/// Render one statement per row, in row order.
pub fn render_statements<'a, R: Row>(
    table: &'a str,
    rows: &'a [R],
    policy: ConflictPolicy,
    dialect: Dialect,
) -> impl Iterator<Item = String> + 'a {
    let columns = column_list(R::SCHEMA);
    let clause = conflict_clause(R::SCHEMA, policy, dialect);
    rows.iter().map(move |row| {
        let values: Vec<String> = row.values().iter().map(|v| render_value(v, dialect)).collect();
        format!("INSERT INTO {table} ({columns}) VALUES ({}){clause};", values.join(", "))
    })
}

/// Parameterised insert (`?1, ?2, ...`) for drivers that bind values.
pub fn parameterised_insert(schema: &TableSchema, policy: ConflictPolicy, dialect: Dialect) -> String {
    let placeholders: Vec<String> = (1..=schema.columns.len()).map(|i| format!("?{i}")).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}){}",
        schema.name,
        column_list(schema),
        placeholders.join(", "),
        conflict_clause(schema, policy, dialect)
    )
}

/// `CREATE TABLE` for `schema`. With `if_not_exists` an existing table is
/// left untouched.
pub fn create_table(schema: &TableSchema, if_not_exists: bool) -> String {
    let columns: Vec<String> = schema
        .columns
        .iter()
        .map(|c| {
            let mut def = format!("{} {}", c.name, c.kind);
            if c.primary_key {
                def.push_str(" PRIMARY KEY");
            }
            if !c.nullable {
                def.push_str(" NOT NULL");
            }
            def
        })
        .collect();
    format!(
        "CREATE TABLE {}{} ({})",
        if if_not_exists { "IF NOT EXISTS " } else { "" },
        schema.name,
        columns.join(", ")
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
