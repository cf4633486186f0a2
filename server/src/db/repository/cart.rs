//! Cart Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Cart, CartLine};
use crate::money;
use saffron_shared::{now_millis, snowflake_id};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "cart";

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find the customer's cart (at most one, enforced by a unique index)
    pub async fn find_by_customer(&self, customer: &RecordId) -> RepoResult<Option<Cart>> {
        let carts: Vec<Cart> = self
            .base
            .db()
            .query("SELECT * FROM cart WHERE customer = $customer LIMIT 1")
            .bind(("customer", customer.to_string()))
            .await?
            .take(0)?;
        Ok(carts.into_iter().next())
    }

    /// Fetch the customer's cart, creating an empty one on first use
    pub async fn get_or_create(&self, customer: &RecordId) -> RepoResult<Cart> {
        if let Some(cart) = self.find_by_customer(customer).await? {
            return Ok(cart);
        }
        let now = now_millis();
        let cart = Cart {
            id: None,
            customer: customer.clone(),
            lines: Vec::new(),
            total_price: 0.0,
            created_at: now,
            updated_at: now,
        };
        let created: Option<Cart> = self
            .base
            .db()
            .create((TABLE, snowflake_id()))
            .content(cart)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create cart".to_string()))
    }

    /// Add a line, merging quantity when the dish is already present.
    ///
    /// `price` is the current menu unit price, resolved by the caller.
    pub async fn upsert_line(
        &self,
        customer: &RecordId,
        menu_item: &RecordId,
        quantity: u32,
        price: f64,
    ) -> RepoResult<Cart> {
        let mut cart = self.get_or_create(customer).await?;
        match cart.lines.iter_mut().find(|l| &l.menu_item == menu_item) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(quantity);
                line.price = price;
            }
            None => cart.lines.push(CartLine {
                menu_item: menu_item.clone(),
                quantity,
                price,
            }),
        }
        self.save(cart).await
    }

    /// Set a line's quantity; zero removes the line
    pub async fn set_quantity(
        &self,
        customer: &RecordId,
        menu_item: &RecordId,
        quantity: u32,
    ) -> RepoResult<Cart> {
        let mut cart = self
            .find_by_customer(customer)
            .await?
            .ok_or_else(|| RepoError::NotFound("Cart not found".to_string()))?;
        if quantity == 0 {
            cart.lines.retain(|l| &l.menu_item != menu_item);
        } else {
            let line = cart
                .lines
                .iter_mut()
                .find(|l| &l.menu_item == menu_item)
                .ok_or_else(|| RepoError::NotFound("Item not in cart".to_string()))?;
            line.quantity = quantity;
        }
        self.save(cart).await
    }

    /// Remove one line from the cart
    pub async fn remove_line(&self, customer: &RecordId, menu_item: &RecordId) -> RepoResult<Cart> {
        let mut cart = self
            .find_by_customer(customer)
            .await?
            .ok_or_else(|| RepoError::NotFound("Cart not found".to_string()))?;
        let before = cart.lines.len();
        cart.lines.retain(|l| &l.menu_item != menu_item);
        if cart.lines.len() == before {
            return Err(RepoError::NotFound("Item not in cart".to_string()));
        }
        self.save(cart).await
    }

    /// Empty the cart (after checkout, or on request)
    pub async fn clear(&self, customer: &RecordId) -> RepoResult<Cart> {
        let mut cart = self.get_or_create(customer).await?;
        cart.lines.clear();
        self.save(cart).await
    }

    /// Recompute the total and write the cart back
    async fn save(&self, mut cart: Cart) -> RepoResult<Cart> {
        let thing = cart
            .id
            .take()
            .ok_or_else(|| RepoError::Database("Cart has no id".to_string()))?;
        cart.total_price =
            money::lines_total(cart.lines.iter().map(|l| (l.price, l.quantity)));
        cart.updated_at = now_millis();
        // id is skipped during serialization; the record key comes from `thing`
        let updated: Option<Cart> = self.base.db().update(thing).content(cart).await?;
        updated.ok_or_else(|| RepoError::Database("Failed to update cart".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn merged_quantity_saturates_instead_of_overflowing() {
        let db = DbService::memory().await.expect("db");
        let repo = CartRepository::new(db.db.clone());
        let customer: RecordId = "user:1".parse().expect("record id");
        let item: RecordId = "menu_item:1".parse().expect("record id");

        repo.upsert_line(&customer, &item, u32::MAX, 2.5)
            .await
            .expect("first add");
        let cart = repo
            .upsert_line(&customer, &item, 5, 2.5)
            .await
            .expect("merge");
        assert_eq!(cart.lines[0].quantity, u32::MAX);
    }
}
