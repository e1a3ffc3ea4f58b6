//! Company repository for database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::companies;

/// Fields written on insert and update.
#[derive(Debug, Clone)]
pub struct CompanyFields {
    /// Name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Share capital.
    pub share_capital: Decimal,
}

/// Company repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    db: DatabaseConnection,
}

impl CompanyRepository {
    /// Creates a new company repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a company by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<companies::Model>, DbErr> {
        companies::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists a user's companies, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<companies::Model>, DbErr> {
        companies::Entity::find()
            .filter(companies::Column::UserId.eq(user_id))
            .order_by_desc(companies::Column::CreatedAt)
            .order_by_desc(companies::Column::Id)
            .all(&self.db)
            .await
    }

    /// Creates a company.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: Uuid,
        fields: CompanyFields,
    ) -> Result<companies::Model, DbErr> {
        let now = chrono::Utc::now().into();

        let company = companies::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(fields.name),
            description: Set(fields.description),
            share_capital: Set(fields.share_capital),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        company.insert(&self.db).await
    }

    /// Replaces a company's editable fields.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` if the company does not exist.
    pub async fn update(&self, id: Uuid, fields: CompanyFields) -> Result<companies::Model, DbErr> {
        let company = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("company {id}")))?;

        let mut active: companies::ActiveModel = company.into();
        active.name = Set(fields.name);
        active.description = Set(fields.description);
        active.share_capital = Set(fields.share_capital);
        active.updated_at = Set(chrono::Utc::now().into());

        active.update(&self.db).await
    }
}
