use chrono::{DateTime, Utc};
use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

/// Marketplace roles. The single tagged enum every authorization check
/// goes through - no ad-hoc role-string comparisons anywhere else.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[derive(Default)]
pub enum Role {
    #[sea_orm(string_value = "user")]
    #[serde(rename = "user")]
    #[default]
    User,
    #[sea_orm(string_value = "guide")]
    #[serde(rename = "guide")]
    Guide,
    #[sea_orm(string_value = "vehicle_owner")]
    #[serde(rename = "vehicle_owner")]
    VehicleOwner,
    #[sea_orm(string_value = "admin")]
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Guide => "guide",
            Role::VehicleOwner => "vehicle_owner",
            Role::Admin => "admin",
        }
    }
}

/// Account state for tracking whether a user may authenticate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[derive(Default)]
pub enum UserState {
    #[sea_orm(string_value = "active")]
    #[serde(rename = "active")]
    #[default]
    Active,
    #[sea_orm(string_value = "disabled")]
    #[serde(rename = "disabled")]
    Disabled,
}

impl UserState {
    /// Check if the state allows authentication
    pub fn is_active(&self) -> bool {
        matches!(self, UserState::Active)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(16))", default_value = "user")]
    pub role: Role,
    #[sea_orm(column_type = "String(StringLen::N(16))", default_value = "active")]
    pub state: UserState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Default for Model {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            email: String::new(),
            password_hash: String::new(),
            display_name: None,
            role: Role::User,
            state: UserState::Active,
            created_at: now,
            updated_at: now,
            last_login: None,
        }
    }
}

impl Model {
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            role,
            ..Default::default()
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_state(mut self, state: UserState) -> Self {
        self.state = state;
        self
    }
}
