//! Database repository for product inventory operations.
//!
//! Provides CRUD operations for catalogue products.

use crate::{
    api::common::PaginationFilter,
    database::models::{CreateProduct, Product, UpdateProduct},
};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Creates a new ProductRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new product in the database.
    ///
    /// # Arguments
    /// * `product` - CreateProduct DTO containing product details
    ///
    /// # Returns
    /// The newly created Product with all fields populated
    pub async fn create_product(&self, product: CreateProduct) -> Result<Product> {
        let now = Utc::now();

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, price, created_at, updated_at
            "#,
        )
        .bind(product.name)
        .bind(product.price)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Retrieves a product by its identifier.
    ///
    /// # Returns
    /// `Some(Product)` if found, `None` otherwise
    pub async fn get_product_by_id(&self, id: i64) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, created_at, updated_at
            FROM products WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Retrieves one page of products, oldest first.
    pub async fn get_products(&self, pagination: &PaginationFilter) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, created_at, updated_at
            FROM products
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Get total count of products
    pub async fn get_products_count(&self) -> Result<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;

        Ok(count as u64)
    }

    /// Updates the present fields of a product.
    ///
    /// # Returns
    /// The updated Product, `None` if no product has this id
    pub async fn update_product(&self, id: i64, update: UpdateProduct) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
            name = COALESCE(?, name),
            price = COALESCE(?, price),
            updated_at = ?
            WHERE id = ?
            RETURNING id, name, price, created_at, updated_at
            "#,
        )
        .bind(update.name)
        .bind(update.price)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Removes a product.
    ///
    /// # Returns
    /// The removed Product, `None` if no product has this id
    pub async fn delete_product(&self, id: i64) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            DELETE FROM products WHERE id = ?
            RETURNING id, name, price, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }
}
