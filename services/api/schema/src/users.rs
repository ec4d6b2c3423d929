use sea_orm::entity::prelude::*;

/// Local profile row, one per identity-provider user.
///
/// Rows are inserted by a database trigger reacting to provider sign-ups;
/// the application only reads them.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub auth_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// One of `admin`, `manager`, `staff` (CHECK constraint in the database).
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
