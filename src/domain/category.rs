use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName, ParentCategoryId};

/// Catalog category as stored in `vod_class`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub type_id: CategoryId,
    pub type_pid: ParentCategoryId,
    pub type_name: CategoryName,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert or replace a [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub type_id: CategoryId,
    pub type_pid: ParentCategoryId,
    pub type_name: CategoryName,
}

/// A category together with its nested sub-categories.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryNode {
    pub type_id: CategoryId,
    pub type_pid: ParentCategoryId,
    pub type_name: CategoryName,
    pub children: Vec<CategoryNode>,
}

/// Assemble a category forest from a flat, parent-referencing list.
///
/// Rows with `type_pid == 0` become roots. Every other row is attached to its
/// parent when that parent is part of `categories`; rows whose parent is
/// missing (and everything below them) are left out of the tree. Sibling
/// order follows the input order.
pub fn build_category_tree(categories: &[Category]) -> Vec<CategoryNode> {
    let known: HashMap<i32, &Category> = categories
        .iter()
        .map(|category| (category.type_id.get(), category))
        .collect();

    let mut children: HashMap<i32, Vec<&Category>> = HashMap::new();
    for category in categories {
        let pid = category.type_pid.get();
        if !category.type_pid.is_root() && known.contains_key(&pid) {
            children.entry(pid).or_default().push(category);
        }
    }

    categories
        .iter()
        .filter(|category| category.type_pid.is_root())
        .map(|root| attach_children(root, &children))
        .collect()
}

fn attach_children(category: &Category, children: &HashMap<i32, Vec<&Category>>) -> CategoryNode {
    let nested = children
        .get(&category.type_id.get())
        .map(|items| {
            items
                .iter()
                .map(|child| attach_children(child, children))
                .collect()
        })
        .unwrap_or_default();

    CategoryNode {
        type_id: category.type_id,
        type_pid: category.type_pid,
        type_name: category.type_name.clone(),
        children: nested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn category(id: i32, pid: i32, name: &str) -> Category {
        Category {
            type_id: CategoryId::new(id).unwrap(),
            type_pid: ParentCategoryId::new(pid).unwrap(),
            type_name: CategoryName::new(name).unwrap(),
            updated_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    #[test]
    fn roots_and_children_are_assembled() {
        let flat = vec![
            category(1, 0, "Movies"),
            category(2, 0, "Series"),
            category(6, 1, "Action"),
            category(7, 1, "Comedy"),
            category(13, 2, "Drama"),
        ];

        let tree = build_category_tree(&flat);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].type_id, 1);
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[1].type_name, "Comedy");
        assert_eq!(tree[1].children.len(), 1);
        assert!(tree[1].children[0].children.is_empty());
    }

    #[test]
    fn orphans_are_dropped_from_tree() {
        let flat = vec![category(1, 0, "Movies"), category(20, 99, "Lost")];

        let tree = build_category_tree(&flat);

        assert_eq!(tree.len(), 1);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn deeper_levels_are_nested() {
        let flat = vec![
            category(1, 0, "Movies"),
            category(6, 1, "Action"),
            category(60, 6, "Martial Arts"),
        ];

        let tree = build_category_tree(&flat);

        assert_eq!(tree[0].children[0].children[0].type_id, 60);
    }

    #[test]
    fn self_referencing_rows_never_loop() {
        let flat = vec![category(1, 0, "Movies"), category(5, 5, "Loop")];

        let tree = build_category_tree(&flat);

        assert_eq!(tree.len(), 1);
        assert!(tree[0].children.is_empty());
    }
}
