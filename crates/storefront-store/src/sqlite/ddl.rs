use storefront_core::{Cardinality, ColumnDef, ColumnType, Constraint, TableDef};

/// Quote an identifier; `order` is a keyword, so everything is quoted.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_list(columns: &[String]) -> String {
    columns
        .iter()
        .map(|column| quote_ident(column))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn create_table_sql(table: &TableDef, if_not_exists: bool) -> String {
    let rowid_key = rowid_key(table);
    let mut lines: Vec<String> = table
        .columns
        .iter()
        .map(|column| column_sql(column, rowid_key == Some(column.name.as_str())))
        .collect();

    for constraint in &table.constraints {
        match constraint {
            Constraint::PrimaryKey(_) if rowid_key.is_some() => {}
            Constraint::PrimaryKey(pk) => {
                lines.push(format!("PRIMARY KEY ({})", quote_list(&pk.columns)));
            }
            Constraint::ForeignKey(fk) => {
                lines.push(format!(
                    "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
                    quote_ident(&fk.name),
                    quote_list(&fk.columns),
                    quote_ident(&fk.referenced_table),
                    quote_list(&fk.referenced_columns)
                ));
                if fk.cardinality == Cardinality::OneToOne {
                    lines.push(format!(
                        "CONSTRAINT {} UNIQUE ({})",
                        quote_ident(&format!("uq_{}", fk.name)),
                        quote_list(&fk.columns)
                    ));
                }
            }
            Constraint::Check(check) => {
                lines.push(format!(
                    "CONSTRAINT {} CHECK ({})",
                    quote_ident(&check.name),
                    check.expression
                ));
            }
        }
    }

    let guard = if if_not_exists { "IF NOT EXISTS " } else { "" };
    format!(
        "CREATE TABLE {guard}{} (\n  {}\n)",
        quote_ident(&table.name),
        lines.join(",\n  ")
    )
}

pub fn drop_table_sql(table: &TableDef) -> String {
    format!("DROP TABLE IF EXISTS {}", quote_ident(&table.name))
}

/// Single integer primary key column, rendered as an AUTOINCREMENT rowid
/// alias so ids only ever grow.
fn rowid_key(table: &TableDef) -> Option<&str> {
    let pk = table.primary_key()?;
    let [column] = pk.columns.as_slice() else {
        return None;
    };
    let column = table.column(column)?;
    (column.column_type == ColumnType::Integer).then_some(column.name.as_str())
}

fn column_sql(column: &ColumnDef, is_rowid_key: bool) -> String {
    let name = quote_ident(&column.name);
    if is_rowid_key {
        return format!("{name} INTEGER PRIMARY KEY AUTOINCREMENT");
    }

    let mut sql = match column.column_type {
        ColumnType::Integer => format!("{name} INTEGER"),
        ColumnType::Real => format!("{name} REAL"),
        ColumnType::Text { max_len: Some(len) } => format!("{name} VARCHAR({len})"),
        ColumnType::Text { max_len: None } => format!("{name} TEXT"),
    };
    if !column.is_nullable {
        sql.push_str(" NOT NULL");
    }
    // SQLite ignores declared VARCHAR lengths
    if let ColumnType::Text { max_len: Some(len) } = column.column_type {
        sql.push_str(&format!(" CHECK (length({name}) <= {len})"));
    }
    sql
}
