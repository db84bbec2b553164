//! Declarative table catalogue for the entity model.
//!
//! Every table, column and constraint the engine enforces is declared here;
//! the store renders DDL from these declarations rather than from ad-hoc SQL.

use serde::{Deserialize, Serialize};

use crate::entities::MAX_CATEGORY_LEN;
use crate::types::{COUNTRY_CODE_LEN, MAX_CARD_NUMBER_LEN};

/// Entity backed by a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Customer,
    CreditCard,
    Product,
    Order,
    PlayerScore,
}

impl Entity {
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::CreditCard => "credit_card",
            Self::Product => "product",
            Self::Order => "order",
            Self::PlayerScore => "player_score",
        }
    }
}

/// Storage class of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnType {
    Integer,
    Real,
    Text { max_len: Option<u32> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub column_type: ColumnType,
    pub is_nullable: bool,
}

impl ColumnDef {
    pub fn required(name: &str, column_type: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            column_type,
            is_nullable: false,
        }
    }

    pub fn optional(name: &str, column_type: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            column_type,
            is_nullable: true,
        }
    }
}

/// Primary key definition preserving column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKey {
    pub columns: Vec<String>,
}

/// How many children a parent row may have through a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    OneToOne,
    OneToMany,
}

/// Foreign key definition preserving column ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub name: String,
    pub columns: Vec<String>,
    pub referenced_table: String,
    pub referenced_columns: Vec<String>,
    pub cardinality: Cardinality,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConstraint {
    pub name: String,
    pub expression: String,
}

/// Table-level constraint definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    PrimaryKey(PrimaryKey),
    ForeignKey(ForeignKey),
    Check(CheckConstraint),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
    pub name: String,
    pub entity: Entity,
    pub columns: Vec<ColumnDef>,
    pub constraints: Vec<Constraint>,
}

impl TableDef {
    pub fn primary_key(&self) -> Option<&PrimaryKey> {
        self.constraints.iter().find_map(|constraint| match constraint {
            Constraint::PrimaryKey(pk) => Some(pk),
            _ => None,
        })
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = &ForeignKey> {
        self.constraints.iter().filter_map(|constraint| match constraint {
            Constraint::ForeignKey(fk) => Some(fk),
            _ => None,
        })
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|column| column.name == name)
    }
}

/// A forward/reverse accessor pair derived from a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub child: Entity,
    pub parent: Entity,
    pub column: String,
    pub cardinality: Cardinality,
}

impl Relation {
    /// Child to parent, e.g. `order.customer`.
    pub fn forward_name(&self) -> String {
        format!("{}.{}", self.child.table_name(), self.parent.table_name())
    }

    /// Parent to children, e.g. `customer.orders` or `customer.credit_card`.
    pub fn reverse_name(&self) -> String {
        match self.cardinality {
            Cardinality::OneToOne => {
                format!("{}.{}", self.parent.table_name(), self.child.table_name())
            }
            Cardinality::OneToMany => {
                format!("{}.{}s", self.parent.table_name(), self.child.table_name())
            }
        }
    }
}

/// A named set of tables created and dropped together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityModel {
    pub name: String,
    pub tables: Vec<TableDef>,
}

impl EntityModel {
    pub fn table(&self, name: &str) -> Option<&TableDef> {
        self.tables.iter().find(|table| table.name == name)
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|table| table.name.as_str()).collect()
    }

    /// Relationships declared through foreign keys, in declaration order.
    pub fn relations(&self) -> Vec<Relation> {
        let mut relations = Vec::new();
        for table in &self.tables {
            for fk in table.foreign_keys() {
                let Some(parent) = self.table(&fk.referenced_table) else {
                    continue;
                };
                let Some(column) = fk.columns.first() else {
                    continue;
                };
                relations.push(Relation {
                    child: table.entity,
                    parent: parent.entity,
                    column: column.clone(),
                    cardinality: fk.cardinality,
                });
            }
        }
        relations
    }
}

fn id_column() -> ColumnDef {
    ColumnDef::required("id", ColumnType::Integer)
}

fn id_primary_key() -> Constraint {
    Constraint::PrimaryKey(PrimaryKey {
        columns: vec!["id".to_string()],
    })
}

fn text(max_len: Option<usize>) -> ColumnType {
    ColumnType::Text {
        max_len: max_len.and_then(|len| u32::try_from(len).ok()),
    }
}

fn references(name: &str, column: &str, table: &str, cardinality: Cardinality) -> Constraint {
    Constraint::ForeignKey(ForeignKey {
        name: name.to_string(),
        columns: vec![column.to_string()],
        referenced_table: table.to_string(),
        referenced_columns: vec!["id".to_string()],
        cardinality,
    })
}

fn check(name: &str, expression: &str) -> Constraint {
    Constraint::Check(CheckConstraint {
        name: name.to_string(),
        expression: expression.to_string(),
    })
}

/// Customer, product, credit card and order tables.
pub fn commerce_model() -> EntityModel {
    let customer = TableDef {
        name: Entity::Customer.table_name().to_string(),
        entity: Entity::Customer,
        columns: vec![
            id_column(),
            ColumnDef::required("fullname", text(None)),
            ColumnDef::optional("email", text(None)),
            ColumnDef::optional("address", text(None)),
            ColumnDef::optional("country_code", text(Some(COUNTRY_CODE_LEN))),
        ],
        constraints: vec![
            id_primary_key(),
            check(
                "ck_customer_country_code",
                &format!("country_code is null or length(country_code) = {COUNTRY_CODE_LEN}"),
            ),
        ],
    };

    let product = TableDef {
        name: Entity::Product.table_name().to_string(),
        entity: Entity::Product,
        columns: vec![
            id_column(),
            ColumnDef::required("name", text(None)),
            ColumnDef::required("price", ColumnType::Real),
            ColumnDef::optional("description", text(None)),
            ColumnDef::required("category", text(Some(MAX_CATEGORY_LEN))),
        ],
        constraints: vec![id_primary_key(), check("ck_product_price", "price >= 0")],
    };

    let credit_card = TableDef {
        name: Entity::CreditCard.table_name().to_string(),
        entity: Entity::CreditCard,
        columns: vec![
            id_column(),
            ColumnDef::required("number", text(Some(MAX_CARD_NUMBER_LEN))),
            ColumnDef::required("customer_id", ColumnType::Integer),
        ],
        constraints: vec![
            id_primary_key(),
            references(
                "fk_credit_card_customer",
                "customer_id",
                Entity::Customer.table_name(),
                Cardinality::OneToOne,
            ),
        ],
    };

    let order = TableDef {
        name: Entity::Order.table_name().to_string(),
        entity: Entity::Order,
        columns: vec![
            id_column(),
            ColumnDef::required("customer_id", ColumnType::Integer),
            ColumnDef::required("product_id", ColumnType::Integer),
            ColumnDef::optional("quantity", ColumnType::Integer),
        ],
        constraints: vec![
            id_primary_key(),
            references(
                "fk_order_customer",
                "customer_id",
                Entity::Customer.table_name(),
                Cardinality::OneToMany,
            ),
            references(
                "fk_order_product",
                "product_id",
                Entity::Product.table_name(),
                Cardinality::OneToMany,
            ),
            check("ck_order_quantity", "quantity is null or quantity > 0"),
        ],
    };

    EntityModel {
        name: "commerce".to_string(),
        tables: vec![customer, product, credit_card, order],
    }
}

/// The scoring service's single table.
pub fn scoring_model() -> EntityModel {
    let player_score = TableDef {
        name: Entity::PlayerScore.table_name().to_string(),
        entity: Entity::PlayerScore,
        columns: vec![
            id_column(),
            ColumnDef::required("player", text(None)),
            ColumnDef::required("score", ColumnType::Integer),
        ],
        constraints: vec![
            id_primary_key(),
            check("ck_player_score_player", "length(trim(player)) > 0"),
        ],
    };

    EntityModel {
        name: "scoring".to_string(),
        tables: vec![player_score],
    }
}
