//! Diesel-backed `ContactRepository` implementation.
//!
//! Every query is written once and expanded for PostgreSQL and SQLite via
//! `with_connection!`. Mutations run inside a transaction so the existence
//! check and the write observe the same snapshot.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{ContactRepository, ContactRepositoryError};
use crate::domain::{Contact, PhoneNumber};

use super::models::{ContactRow, NewContactRow};
use super::pool::{DbPool, PoolError, with_connection};
use super::schema::contacts;

diesel::define_sql_function! {
    /// SQL `lower()`, available on both supported backends.
    fn lower(x: Text) -> Text;
}

const LIKE_ESCAPE: char = '\\';

/// Diesel-backed implementation of the `ContactRepository` port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use contact_directory::outbound::persistence::{
    ///     DbPool, DieselContactRepository, PoolConfig,
    /// };
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("sqlite://directory.db")).await?;
    /// let repository = DieselContactRepository::new(pool);
    /// # drop(repository);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failures raised inside a mutation transaction.
enum TxError {
    Duplicate,
    Missing,
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for TxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

/// Map pool errors to repository connection errors.
fn map_pool_error(error: PoolError) -> ContactRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ContactRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to repository errors, keeping the driver's message.
fn map_diesel_error(error: diesel::result::Error) -> ContactRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            ContactRepositoryError::connection(info.message())
        }
        DieselError::DatabaseError(_, info) => ContactRepositoryError::query(info.message()),
        other => ContactRepositoryError::query(other.to_string()),
    }
}

fn map_tx_error(error: TxError, phone: &str) -> ContactRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        TxError::Duplicate
        | TxError::Diesel(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            ContactRepositoryError::duplicate_key(phone)
        }
        TxError::Missing => ContactRepositoryError::not_found(phone),
        TxError::Diesel(error) => map_diesel_error(error),
    }
}

fn row_to_contact(row: ContactRow) -> Result<Contact, ContactRepositoryError> {
    let phone = row.phone.clone();
    Contact::try_from(row).map_err(|err| {
        ContactRepositoryError::query(format!("stored contact {phone} is invalid: {err}"))
    })
}

fn rows_to_contacts(rows: Vec<ContactRow>) -> Result<Vec<Contact>, ContactRepositoryError> {
    rows.into_iter().map(row_to_contact).collect()
}

/// Build a `LIKE` pattern matching `fragment` anywhere, with wildcards in
/// the fragment itself matched literally.
///
/// Case is left alone: the query folds pattern and column with the same SQL
/// `lower()`, so both sides agree on every backend.
fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut db = self.pool.get().await.map_err(map_pool_error)?;
        let key = phone.as_ref();
        let row = with_connection!(db, |conn| {
            contacts::table
                .filter(contacts::phone.eq(key))
                .select(ContactRow::as_select())
                .first(conn)
                .await
                .optional()
        })
        .map_err(map_diesel_error)?;

        row.map(row_to_contact).transpose()
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Contact>, ContactRepositoryError> {
        let pattern = contains_pattern(fragment);
        let mut db = self.pool.get().await.map_err(map_pool_error)?;
        let rows = with_connection!(db, |conn| {
            contacts::table
                .filter(
                    lower(contacts::name)
                        .like(lower(pattern.as_str()))
                        .escape(LIKE_ESCAPE),
                )
                .order((contacts::name.asc(), contacts::phone.asc()))
                .select(ContactRow::as_select())
                .load(conn)
                .await
        })
        .map_err(map_diesel_error)?;

        rows_to_contacts(rows)
    }

    async fn list_all(&self) -> Result<Vec<Contact>, ContactRepositoryError> {
        let mut db = self.pool.get().await.map_err(map_pool_error)?;
        let rows = with_connection!(db, |conn| {
            contacts::table
                .order((contacts::name.asc(), contacts::phone.asc()))
                .select(ContactRow::as_select())
                .load(conn)
                .await
        })
        .map_err(map_diesel_error)?;

        rows_to_contacts(rows)
    }

    async fn count(&self) -> Result<u64, ContactRepositoryError> {
        let mut db = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = with_connection!(db, |conn| {
            contacts::table.count().get_result::<i64>(conn).await
        })
        .map_err(map_diesel_error)?;

        u64::try_from(total)
            .map_err(|_| ContactRepositoryError::query(format!("invalid row count {total}")))
    }

    async fn insert(&self, contact: &Contact) -> Result<(), ContactRepositoryError> {
        let row = NewContactRow::from(contact);
        let key = row.phone;
        let mut db = self.pool.get().await.map_err(map_pool_error)?;
        let outcome = with_connection!(db, |conn| {
            conn.transaction(|tx| {
                async move {
                    let existing: i64 = contacts::table
                        .filter(contacts::phone.eq(key))
                        .count()
                        .get_result(tx)
                        .await?;
                    if existing > 0 {
                        return Err(TxError::Duplicate);
                    }
                    diesel::insert_into(contacts::table)
                        .values(&row)
                        .execute(tx)
                        .await?;
                    Ok::<(), TxError>(())
                }
                .scope_boxed()
            })
            .await
        });
        outcome.map_err(|err| map_tx_error(err, key))
    }

    async fn delete(&self, phone: &PhoneNumber) -> Result<Contact, ContactRepositoryError> {
        let key = phone.as_ref();
        let mut db = self.pool.get().await.map_err(map_pool_error)?;
        let removed = with_connection!(db, |conn| {
            conn.transaction(|tx| {
                async move {
                    let row = contacts::table
                        .filter(contacts::phone.eq(key))
                        .select(ContactRow::as_select())
                        .first(tx)
                        .await
                        .optional()?
                        .ok_or(TxError::Missing)?;
                    diesel::delete(contacts::table.filter(contacts::phone.eq(key)))
                        .execute(tx)
                        .await?;
                    Ok::<ContactRow, TxError>(row)
                }
                .scope_boxed()
            })
            .await
        })
        .map_err(|err| map_tx_error(err, key))?;

        row_to_contact(removed)
    }
}
