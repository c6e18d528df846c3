//! Catalog repository: restaurants, products, menu availability.
//!
//! Catalog rows are written by administration tooling outside this service;
//! everything here is a read.

use std::collections::HashSet;

use sqlx::PgPool;

use flamegrill_core::{CategoryId, MenuEntryId, Price, ProductId, RestaurantId};

use super::RepositoryError;
use crate::models::catalog::{MenuEntry, Product, Restaurant};

#[derive(sqlx::FromRow)]
struct RestaurantRow {
    id: i64,
    name: String,
    address: String,
    contact_phone: String,
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    category_id: Option<i64>,
    price: rust_decimal::Decimal,
}

#[derive(sqlx::FromRow)]
struct MenuEntryRow {
    id: i64,
    restaurant_id: i64,
    product_id: i64,
    availability: bool,
}

/// Repository for catalog reads.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All restaurants, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn restaurants(&self) -> Result<Vec<Restaurant>, RepositoryError> {
        let rows = sqlx::query_as::<_, RestaurantRow>(
            r"
            SELECT id, name, address, contact_phone
            FROM restaurants
            ORDER BY name, id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Restaurant {
                id: RestaurantId::new(r.id),
                name: r.name,
                address: r.address,
                contact_phone: r.contact_phone,
            })
            .collect())
    }

    /// Products matching the given IDs. Missing IDs are simply absent from
    /// the result; callers decide whether that is an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is negative.
    pub async fn products_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<Vec<Product>, RepositoryError> {
        let raw_ids: Vec<i64> = ids.iter().map(|id| id.as_i64()).collect();

        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, category_id, price
            FROM products
            WHERE id = ANY($1)
            ORDER BY id
            ",
        )
        .bind(&raw_ids)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter()
            .map(|r| {
                let price = Price::new(r.price).map_err(|e| {
                    RepositoryError::DataCorruption(format!(
                        "invalid price for product {}: {e}",
                        r.id
                    ))
                })?;
                Ok(Product {
                    id: ProductId::new(r.id),
                    name: r.name,
                    category_id: r.category_id.map(CategoryId::new),
                    price,
                })
            })
            .collect()
    }

    /// All menu entries with `availability = true`.
    ///
    /// This is the working set for eligibility resolution; one query serves
    /// a whole dashboard render.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn available_menu_entries(&self) -> Result<Vec<MenuEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, MenuEntryRow>(
            r"
            SELECT id, restaurant_id, product_id, availability
            FROM menu_entries
            WHERE availability = TRUE
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| MenuEntry {
                id: MenuEntryId::new(r.id),
                restaurant_id: RestaurantId::new(r.restaurant_id),
                product_id: ProductId::new(r.product_id),
                availability: r.availability,
            })
            .collect())
    }

    /// IDs of products available at one or more restaurants.
    ///
    /// Used by order validation: a product nobody can prepare is rejected at
    /// creation time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn available_product_ids(&self) -> Result<HashSet<ProductId>, RepositoryError> {
        let rows = sqlx::query_scalar::<_, i64>(
            r"
            SELECT DISTINCT product_id
            FROM menu_entries
            WHERE availability = TRUE
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductId::new).collect())
    }
}
