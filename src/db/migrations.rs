use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

/// Apply every `*.sql` file in `migrations_dir` that has not been applied
/// yet, in file name order. Each file runs inside its own transaction
/// together with its bookkeeping row. Returns the number of files applied.
pub fn run_migrations(conn: &Connection, migrations_dir: &Path) -> rusqlite::Result<usize> {
    tracing::debug!(dir = %migrations_dir.display(), "Checking for database migrations");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let files = migration_files(migrations_dir);
    if files.is_empty() {
        tracing::warn!(dir = %migrations_dir.display(), "No migration files found");
    }

    let mut applied_count = 0;
    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let already_applied: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM _migrations WHERE name = ?)",
            [&name],
            |row| row.get(0),
        )?;
        if already_applied {
            continue;
        }

        let sql = fs::read_to_string(&path)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        tracing::info!(migration = %name, "Applying migration");
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(&sql)?;
        tx.execute("INSERT INTO _migrations (name) VALUES (?)", [&name])?;
        tx.commit()?;
        applied_count += 1;
    }

    if applied_count > 0 {
        tracing::info!(count = applied_count, "Migrations applied successfully");
    } else {
        tracing::debug!("No new migrations to apply");
    }

    Ok(applied_count)
}

fn migration_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map(|rd| {
            rd.filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "sql"))
                .collect()
        })
        .unwrap_or_default();
    files.sort();
    files
}
