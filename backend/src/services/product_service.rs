//! Product catalogue business logic.

use crate::api::common::PaginationFilter;
use crate::database::models::{CreateProduct, Product, UpdateProduct, round_price};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::product_repository::ProductRepository;
use sqlx::SqlitePool;
use validator::Validate;

pub struct ProductService<'a> {
    repo: ProductRepository<'a>,
}

impl<'a> ProductService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self {
            repo: ProductRepository::new(pool),
        }
    }

    /// Validates and stores a product, rounding the price to cents.
    pub async fn create_product(&self, mut product: CreateProduct) -> ServiceResult<Product> {
        product.validate()?;
        product.price = round_price(product.price);

        let product = self.repo.create_product(product).await?;
        tracing::info!("Created product {} ({})", product.id, product.name);
        Ok(product)
    }

    pub async fn list_products(
        &self,
        pagination: &PaginationFilter,
    ) -> ServiceResult<(Vec<Product>, u64)> {
        let products = self.repo.get_products(pagination).await?;
        let total = self.repo.get_products_count().await?;
        Ok((products, total))
    }

    pub async fn get_product_required(&self, id: i64) -> ServiceResult<Product> {
        self.repo
            .get_product_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Product", id))
    }

    pub async fn update_product(
        &self,
        id: i64,
        mut update: UpdateProduct,
    ) -> ServiceResult<Product> {
        update.validate()?;
        update.price = update.price.map(round_price);

        self.repo
            .update_product(id, update)
            .await?
            .ok_or_else(|| ServiceError::not_found("Product", id))
    }

    pub async fn delete_product(&self, id: i64) -> ServiceResult<Product> {
        let product = self
            .repo
            .delete_product(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Product", id))?;

        tracing::info!("Deleted product {}", product.id);
        Ok(product)
    }
}
