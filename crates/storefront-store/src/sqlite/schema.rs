use sqlx::SqlitePool;
use tracing::info;

use storefront_core::{EntityModel, Result, TableCount, creation_order, validate_model};

use super::ddl::{create_table_sql, drop_table_sql, quote_ident};
use super::queries;
use crate::errors::map_db_error;
use crate::unit::UnitOfWork;

/// Drop every table of `model` and recreate it empty.
///
/// Tables are dropped children-first and created parents-first, all inside
/// one unit of work.
pub async fn reset_schema(pool: &SqlitePool, model: &EntityModel) -> Result<()> {
    validate_model(model)?;
    let order = creation_order(model)?;

    let mut unit = UnitOfWork::begin(pool).await?;
    for table in order.iter().rev() {
        let sql = drop_table_sql(table);
        sqlx::query(&sql)
            .execute(&mut *unit.conn())
            .await
            .map_err(map_db_error)?;
    }
    for table in &order {
        let sql = create_table_sql(table, false);
        sqlx::query(&sql)
            .execute(&mut *unit.conn())
            .await
            .map_err(map_db_error)?;
    }
    unit.commit().await?;

    info!(
        event = "schema_reset",
        model = %model.name,
        tables = order.len()
    );
    Ok(())
}

/// Create any missing table of `model`, keeping existing rows.
pub async fn ensure_schema(pool: &SqlitePool, model: &EntityModel) -> Result<()> {
    validate_model(model)?;
    let order = creation_order(model)?;

    let mut unit = UnitOfWork::begin(pool).await?;
    for table in &order {
        let sql = create_table_sql(table, true);
        sqlx::query(&sql)
            .execute(&mut *unit.conn())
            .await
            .map_err(map_db_error)?;
    }
    unit.commit().await?;

    info!(
        event = "schema_ensured",
        model = %model.name,
        tables = order.len()
    );
    Ok(())
}

/// Row count for every table of `model`, in declaration order.
pub async fn table_counts(pool: &SqlitePool, model: &EntityModel) -> Result<Vec<TableCount>> {
    let mut counts = Vec::with_capacity(model.tables.len());
    for table in &model.tables {
        let rows = queries::count_rows(pool, &quote_ident(&table.name)).await?;
        counts.push(TableCount {
            table: table.name.clone(),
            rows,
        });
    }
    Ok(counts)
}
