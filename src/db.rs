use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Schema,
    Statement,
};
use sea_orm::sea_query::TableCreateStatement;
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::entity::{department, staff};

/// Initialize database connection and create missing tables
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let database_url = config.connection_url();

    info!("Connecting to database: {}:{}/{}", config.host, config.port, config.name);

    let timeout = Duration::from_secs(config.connect_timeout_secs);
    let mut opt = ConnectOptions::new(&database_url);
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(timeout)
        .acquire_timeout(timeout)
        .sqlx_logging(config.sqlx_logging)
        .sqlx_logging_level(tracing::log::LevelFilter::Debug)
        .set_schema_search_path("public");

    let db = Database::connect(opt).await?;
    info!("Database connection established");

    auto_migrate(&db).await?;

    Ok(db)
}

/// Table definitions in dependency order: department before staff
fn table_statements(backend: DbBackend) -> Vec<TableCreateStatement> {
    let schema = Schema::new(backend);
    vec![
        schema.create_table_from_entity(department::Entity),
        schema.create_table_from_entity(staff::Entity),
    ]
}

async fn auto_migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();

    info!("Running auto-migration for all entities...");

    for stmt in table_statements(backend) {
        create_table_if_not_exists(db, backend, stmt).await?;
    }

    info!("Auto-migration completed successfully");
    Ok(())
}

/// Create a table if it doesn't exist
async fn create_table_if_not_exists(
    db: &DatabaseConnection,
    backend: DbBackend,
    mut stmt: TableCreateStatement,
) -> Result<(), DbErr> {
    stmt.if_not_exists();

    let sql = backend.build(&stmt);

    db.execute(Statement::from_string(backend, sql.to_string())).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(backend: DbBackend) -> Vec<String> {
        table_statements(backend)
            .iter()
            .map(|stmt| backend.build(stmt).to_string())
            .collect()
    }

    #[test]
    fn test_department_table() {
        let sql = &rendered(DbBackend::Postgres)[0];
        assert!(sql.contains(r#"CREATE TABLE "department""#), "{sql}");
        assert!(sql.contains(r#""department_id" bigserial"#), "{sql}");
        assert!(sql.contains(r#""department_name" varchar(100)"#), "{sql}");
        assert!(sql.contains("UNIQUE"), "{sql}");
    }

    #[test]
    fn test_staff_table_references_department() {
        let sql = &rendered(DbBackend::Postgres)[1];
        assert!(sql.contains(r#"CREATE TABLE "staff""#), "{sql}");
        assert!(sql.contains(r#""salary" decimal(12, 2)"#), "{sql}");
        assert!(sql.contains(r#"REFERENCES "department" ("department_id")"#), "{sql}");
        assert!(sql.contains("ON DELETE RESTRICT"), "{sql}");
    }

    #[tokio::test]
    async fn test_auto_migrate_creates_both_tables() {
        let db = sea_orm::MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([
                sea_orm::MockExecResult { last_insert_id: 0, rows_affected: 0 },
                sea_orm::MockExecResult { last_insert_id: 0, rows_affected: 0 },
            ])
            .into_connection();

        auto_migrate(&db).await.unwrap();

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains(r#"CREATE TABLE IF NOT EXISTS \"department\""#), "{log}");
        assert!(log.contains(r#"CREATE TABLE IF NOT EXISTS \"staff\""#), "{log}");
    }
}
