use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::model::{EntityModel, TableDef};

/// Tables ordered parents-first; ties keep declaration order.
///
/// Reverse the result to get a safe drop order.
pub fn creation_order(model: &EntityModel) -> Result<Vec<&TableDef>> {
    let graph = build_adjacency(model);
    match toposort(&graph) {
        Ok(order) => Ok(order.into_iter().map(|idx| &model.tables[idx]).collect()),
        Err(cycle) => {
            let tables: Vec<&str> = cycle
                .into_iter()
                .map(|idx| model.tables[idx].name.as_str())
                .collect();
            Err(Error::InvalidModel(format!(
                "foreign key cycle between tables: {}",
                tables.join(", ")
            )))
        }
    }
}

/// Edges run parent -> child, keyed by declaration index. References to
/// tables outside the model are left to validation.
fn build_adjacency(model: &EntityModel) -> BTreeMap<usize, BTreeSet<usize>> {
    let mut graph: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
    let index: BTreeMap<&str, usize> = model
        .tables
        .iter()
        .enumerate()
        .map(|(idx, table)| (table.name.as_str(), idx))
        .collect();

    for (child, table) in model.tables.iter().enumerate() {
        graph.entry(child).or_default();
        for fk in table.foreign_keys() {
            if let Some(&parent) = index.get(fk.referenced_table.as_str()) {
                graph.entry(parent).or_default().insert(child);
            }
        }
    }

    graph
}

fn toposort(
    graph: &BTreeMap<usize, BTreeSet<usize>>,
) -> std::result::Result<Vec<usize>, Vec<usize>> {
    let mut indegree: BTreeMap<usize, usize> = graph.keys().map(|node| (*node, 0)).collect();
    for targets in graph.values() {
        for target in targets {
            *indegree.entry(*target).or_insert(0) += 1;
        }
    }

    let mut ready: BTreeSet<usize> = indegree
        .iter()
        .filter_map(|(node, count)| (*count == 0).then_some(*node))
        .collect();
    let mut order = Vec::with_capacity(graph.len());

    while let Some(node) = ready.pop_first() {
        order.push(node);
        if let Some(targets) = graph.get(&node) {
            for target in targets {
                if let Some(count) = indegree.get_mut(target) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        ready.insert(*target);
                    }
                }
            }
        }
    }

    if order.len() == graph.len() {
        Ok(order)
    } else {
        Err(indegree
            .into_iter()
            .filter_map(|(node, count)| (count > 0).then_some(node))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Cardinality, ColumnDef, ColumnType, Constraint, Entity, ForeignKey, commerce_model,
    };

    #[test]
    fn commerce_tables_are_created_parents_first() {
        let model = commerce_model();
        let order: Vec<&str> = creation_order(&model)
            .unwrap()
            .into_iter()
            .map(|table| table.name.as_str())
            .collect();
        assert_eq!(order, vec!["customer", "product", "credit_card", "order"]);
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let mut model = commerce_model();
        let customer = model
            .tables
            .iter_mut()
            .find(|table| table.entity == Entity::Customer)
            .unwrap();
        customer
            .columns
            .push(ColumnDef::optional("referrer_id", ColumnType::Integer));
        customer.constraints.push(Constraint::ForeignKey(ForeignKey {
            name: "fk_customer_referrer".to_string(),
            columns: vec!["referrer_id".to_string()],
            referenced_table: "customer".to_string(),
            referenced_columns: vec!["id".to_string()],
            cardinality: Cardinality::OneToMany,
        }));

        let err = creation_order(&model).unwrap_err();
        let Error::InvalidModel(message) = &err else {
            panic!("expected an invalid model error, got {err}");
        };
        assert!(message.contains("customer"));
    }
}
