use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::Address;
use crate::domain::user::models::CartItem;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Postgres-backed account directory.
///
/// Addresses and cart items live in child tables keyed by user id; profile
/// updates replace both sets inside one transaction.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn user_from_row(
        row: &PgRow,
        addresses: Vec<Address>,
        cart_items: Vec<CartItem>,
    ) -> Result<User, UserError> {
        let role: String = row
            .try_get("role")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;
        let email: String = row
            .try_get("email")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(User {
            id: UserId(
                row.try_get("id")
                    .map_err(|e| UserError::DatabaseError(e.to_string()))?,
            ),
            name: row
                .try_get("name")
                .map_err(|e| UserError::DatabaseError(e.to_string()))?,
            email: EmailAddress::new(email)?,
            phone: row
                .try_get("phone")
                .map_err(|e| UserError::DatabaseError(e.to_string()))?,
            role: role.parse::<Role>()?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| UserError::DatabaseError(e.to_string()))?,
            addresses,
            cart_items,
        })
    }

    async fn load_owned_sets(
        &self,
        user_id: i64,
    ) -> Result<(Vec<Address>, Vec<CartItem>), UserError> {
        let address_rows = sqlx::query(
            "SELECT street, city, zip FROM addresses WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let addresses = address_rows
            .iter()
            .map(|r| {
                Ok(Address {
                    street: r
                        .try_get("street")
                        .map_err(|e: sqlx::Error| UserError::DatabaseError(e.to_string()))?,
                    city: r
                        .try_get("city")
                        .map_err(|e: sqlx::Error| UserError::DatabaseError(e.to_string()))?,
                    zip: r
                        .try_get("zip")
                        .map_err(|e: sqlx::Error| UserError::DatabaseError(e.to_string()))?,
                })
            })
            .collect::<Result<Vec<_>, UserError>>()?;

        let cart_rows = sqlx::query(
            "SELECT product_id, quantity FROM cart_items WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let cart_items = cart_rows
            .iter()
            .map(|r| {
                Ok(CartItem {
                    product_id: r
                        .try_get("product_id")
                        .map_err(|e: sqlx::Error| UserError::DatabaseError(e.to_string()))?,
                    quantity: r
                        .try_get("quantity")
                        .map_err(|e: sqlx::Error| UserError::DatabaseError(e.to_string()))?,
                })
            })
            .collect::<Result<Vec<_>, UserError>>()?;

        Ok((addresses, cart_items))
    }

    async fn hydrate(&self, row: Option<PgRow>) -> Result<Option<User>, UserError> {
        match row {
            Some(r) => {
                let id: i64 = r
                    .try_get("id")
                    .map_err(|e| UserError::DatabaseError(e.to_string()))?;
                let (addresses, cart_items) = self.load_owned_sets(id).await?;
                Ok(Some(Self::user_from_row(&r, addresses, cart_items)?))
            }
            None => Ok(None),
        }
    }
}

enum DuplicateKind {
    Email,
    Phone,
}

fn duplicate_kind(e: &sqlx::Error) -> Option<DuplicateKind> {
    let db_err = e.as_database_error()?;
    if !db_err.is_unique_violation() {
        return None;
    }
    match db_err.constraint() {
        Some("users_email_key") => Some(DuplicateKind::Email),
        Some("users_phone_key") => Some(DuplicateKind::Phone),
        _ => None,
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (name, email, phone, role, password_hash)
            VALUES ($1, $2, NULL, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(user.role.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match duplicate_kind(&e) {
            Some(DuplicateKind::Email) => {
                UserError::EmailAlreadyExists(user.email.as_str().to_string())
            }
            Some(DuplicateKind::Phone) => UserError::PhoneAlreadyExists(String::new()),
            None => UserError::DatabaseError(e.to_string()),
        })?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(User {
            id: UserId(id),
            name: user.name,
            email: user.email,
            phone: None,
            role: user.role,
            password_hash: user.password_hash,
            addresses: vec![],
            cart_items: vec![],
        })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            "SELECT id, name, email, phone, role, password_hash FROM users WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        self.hydrate(row).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            "SELECT id, name, email, phone, role, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        self.hydrate(row).await
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let result = sqlx::query("UPDATE users SET name = $1, phone = $2 WHERE id = $3")
            .bind(&user.name)
            .bind(&user.phone)
            .bind(user.id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| match duplicate_kind(&e) {
                Some(DuplicateKind::Phone) => {
                    UserError::PhoneAlreadyExists(user.phone.clone().unwrap_or_default())
                }
                Some(DuplicateKind::Email) => {
                    UserError::EmailAlreadyExists(user.email.as_str().to_string())
                }
                None => UserError::DatabaseError(e.to_string()),
            })?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.id.to_string()));
        }

        // Wholesale replacement of both owned sets
        sqlx::query("DELETE FROM addresses WHERE user_id = $1")
            .bind(user.id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        for address in &user.addresses {
            sqlx::query("INSERT INTO addresses (user_id, street, city, zip) VALUES ($1, $2, $3, $4)")
                .bind(user.id.0)
                .bind(&address.street)
                .bind(&address.city)
                .bind(&address.zip)
                .execute(&mut *tx)
                .await
                .map_err(|e| UserError::DatabaseError(e.to_string()))?;
        }

        sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user.id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        for item in &user.cart_items {
            sqlx::query("INSERT INTO cart_items (user_id, product_id, quantity) VALUES ($1, $2, $3)")
                .bind(user.id.0)
                .bind(item.product_id)
                .bind(item.quantity)
                .execute(&mut *tx)
                .await
                .map_err(|e| UserError::DatabaseError(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(user)
    }

    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<(), UserError> {
        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
