//! Expense repository for database operations.

use async_trait::async_trait;
use cashflow_core::expenses::{
    Expense, ExpensesReadOnlyRepository, ExpensesWriteOnlyRepository, NewExpense, PaymentType,
    RepositoryError, RepositoryResult,
};
use cashflow_core::reports::ReportMonth;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Select, Set,
};

use crate::entities::expenses;

/// Expense repository backed by `SeaORM`.
///
/// Listings are ordered by date, then by ID, so repeated reads of unchanged
/// data come back in the same order.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn ordered(query: Select<expenses::Entity>) -> Select<expenses::Entity> {
        query
            .order_by_asc(expenses::Column::Date)
            .order_by_asc(expenses::Column::Id)
    }
}

fn db_error(err: DbErr) -> RepositoryError {
    tracing::error!(error = %err, "Expense query failed");
    RepositoryError::Database(err.to_string())
}

fn into_domain(model: expenses::Model) -> Expense {
    let payment_type = PaymentType::from_code(model.payment_type);
    if !payment_type.is_recognized() {
        tracing::warn!(
            expense_id = model.id,
            code = model.payment_type,
            "Unrecognized payment type code"
        );
    }

    Expense {
        id: model.id,
        title: model.title,
        description: model.description,
        date: model.date,
        amount: model.amount,
        payment_type,
    }
}

#[async_trait]
impl ExpensesReadOnlyRepository for ExpenseRepository {
    async fn get_all(&self) -> RepositoryResult<Vec<Expense>> {
        let rows = Self::ordered(expenses::Entity::find())
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(into_domain).collect())
    }

    async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Expense>> {
        let row = expenses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(row.map(into_domain))
    }

    async fn get_by_title(&self, title: &str) -> RepositoryResult<Option<Expense>> {
        let row = expenses::Entity::find()
            .filter(expenses::Column::Title.eq(title))
            .order_by_asc(expenses::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(row.map(into_domain))
    }

    async fn filter_by_month(&self, month: ReportMonth) -> RepositoryResult<Vec<Expense>> {
        let rows = Self::ordered(
            expenses::Entity::find()
                .filter(expenses::Column::Date.gte(month.first_instant()))
                .filter(expenses::Column::Date.lt(month.end_exclusive())),
        )
        .all(&self.db)
        .await
        .map_err(db_error)?;

        tracing::debug!(%month, count = rows.len(), "Loaded expenses for month");
        Ok(rows.into_iter().map(into_domain).collect())
    }
}

#[async_trait]
impl ExpensesWriteOnlyRepository for ExpenseRepository {
    async fn add(&self, expense: NewExpense) -> RepositoryResult<Expense> {
        let model = expenses::ActiveModel {
            id: NotSet,
            title: Set(expense.title),
            description: Set(expense.description),
            date: Set(expense.date),
            amount: Set(expense.amount),
            payment_type: Set(expense.payment_type.code()),
        }
        .insert(&self.db)
        .await
        .map_err(db_error)?;

        tracing::info!(expense_id = model.id, "Expense recorded");
        Ok(into_domain(model))
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = expenses::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected > 0)
    }
}
