use sea_orm::entity::prelude::*;
use std::str::FromStr;

/// Whether the account grows produce or buys it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum UserType {
    #[sea_orm(string_value = "farmer")]
    Farmer,
    #[sea_orm(string_value = "buyer")]
    Buyer,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Farmer => "farmer",
            UserType::Buyer => "buyer",
        }
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "farmer" => Ok(UserType::Farmer),
            "buyer" => Ok(UserType::Buyer),
            other => Err(format!("Unknown user type '{}'", other)),
        }
    }
}

/// A registered farmer or buyer.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// bcrypt hash, never the clear-text password.
    pub password_hash: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub user_type: UserType,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::farm::Entity")]
    Farm,
    #[sea_orm(has_many = "super::marketplace_listing::Entity")]
    MarketplaceListing,
    #[sea_orm(has_many = "super::user_learning_progress::Entity")]
    UserLearningProgress,
}

impl Related<super::farm::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Farm.def()
    }
}

impl Related<super::marketplace_listing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MarketplaceListing.def()
    }
}

created_at_behavior!();
