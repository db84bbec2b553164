use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::model::{Constraint, EntityModel};

/// Validate internal consistency of an entity model.
///
/// This checks:
/// - duplicate tables/columns
/// - every table has a primary key on existing columns
/// - foreign key columns and referenced targets exist
/// - unique constraint columns exist
pub fn validate_model(model: &EntityModel) -> Result<()> {
    let mut catalog: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

    for table in &model.tables {
        if catalog.contains_key(table.name.as_str()) {
            return Err(Error::InvalidModel(format!(
                "duplicate table name: {}",
                table.name
            )));
        }

        let mut columns = BTreeSet::new();
        for column in &table.columns {
            if !columns.insert(column.name.as_str()) {
                return Err(Error::InvalidModel(format!(
                    "duplicate column name: {}.{}",
                    table.name, column.name
                )));
            }
        }

        catalog.insert(table.name.as_str(), columns);
    }

    for table in &model.tables {
        let columns = &catalog[table.name.as_str()];
        let has_column = |name: &str| columns.contains(name);

        if table.primary_key().is_none() {
            return Err(Error::InvalidModel(format!(
                "table has no primary key: {}",
                table.name
            )));
        }

        for constraint in &table.constraints {
            match constraint {
                Constraint::PrimaryKey(pk) => {
                    if let Some(column) = pk.columns.iter().find(|column| !has_column(column)) {
                        return Err(Error::InvalidModel(format!(
                            "primary key column not found: {}.{}",
                            table.name, column
                        )));
                    }
                }
                Constraint::ForeignKey(fk) => {
                    if let Some(column) = fk.columns.iter().find(|column| !has_column(column)) {
                        return Err(Error::InvalidModel(format!(
                            "foreign key column not found: {}.{}",
                            table.name, column
                        )));
                    }
                    let referenced = catalog.get(fk.referenced_table.as_str()).ok_or_else(|| {
                        Error::InvalidModel(format!(
                            "foreign key {} references unknown table: {}",
                            fk.name, fk.referenced_table
                        ))
                    })?;
                    if let Some(column) = fk
                        .referenced_columns
                        .iter()
                        .find(|column| !referenced.contains(column.as_str()))
                    {
                        return Err(Error::InvalidModel(format!(
                            "foreign key {} references unknown column: {}.{}",
                            fk.name, fk.referenced_table, column
                        )));
                    }
                    if fk.columns.len() != fk.referenced_columns.len() {
                        return Err(Error::InvalidModel(format!(
                            "foreign key {} column count mismatch",
                            fk.name
                        )));
                    }
                }
                Constraint::Check(_) => {}
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColumnDef, ColumnType, commerce_model, scoring_model};

    #[test]
    fn published_models_are_valid() {
        validate_model(&commerce_model()).unwrap();
        validate_model(&scoring_model()).unwrap();
    }

    #[test]
    fn rejects_duplicate_columns() {
        let mut model = scoring_model();
        model.tables[0]
            .columns
            .push(ColumnDef::required("score", ColumnType::Integer));
        let err = validate_model(&model).unwrap_err();
        assert!(err.to_string().contains("player_score.score"));
    }

    #[test]
    fn rejects_foreign_key_to_missing_table() {
        let mut model = commerce_model();
        // credit_card without its parent table
        model.tables.retain(|table| table.name != "customer");
        let err = validate_model(&model).unwrap_err();
        assert!(err.to_string().contains("unknown table: customer"));
    }
}
