use sea_orm::entity::prelude::*;

/// A ride offer. `edit_code` is the only credential for updating the row and
/// is unique across the table. Coordinates are null for rows that were never
/// geocoded.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "offers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub postal_code: String,
    pub city: String,
    pub street: Option<String>,
    pub name: String,
    pub email: String,
    pub class_label: Option<String>,
    pub phone: Option<String>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[sea_orm(unique)]
    pub edit_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
