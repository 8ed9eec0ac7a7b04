use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{Category as DomainCategory, NewCategory as DomainNewCategory};
use crate::domain::types::{CategoryName, ParentCategoryId, TypeConstraintError};

/// Diesel model representing the `vod_class` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::vod_class)]
#[diesel(primary_key(type_id))]
pub struct Category {
    pub type_id: i32,
    pub type_pid: i32,
    pub type_name: String,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Category`]; written with `REPLACE INTO`.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::vod_class)]
pub struct NewCategory {
    pub type_id: i32,
    pub type_pid: i32,
    pub type_name: String,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            type_id: category.type_id.try_into()?,
            type_pid: ParentCategoryId::new(category.type_pid)?,
            type_name: CategoryName::new(category.type_name)?,
            updated_at: category.updated_at,
        })
    }
}

impl NewCategory {
    /// Build the row for `category`, stamped with `updated_at`.
    pub fn from_domain(category: &DomainNewCategory, updated_at: NaiveDateTime) -> Self {
        Self {
            type_id: category.type_id.get(),
            type_pid: category.type_pid.get(),
            type_name: category.type_name.as_str().to_string(),
            updated_at,
        }
    }
}
