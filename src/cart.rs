//! Subscriptions and accessories picked for checkout.

use crate::models::{CartItem, Product};
use crate::store::{self, KeyValueStore};

pub const STORAGE_KEY: &str = "eztech_cart_items";

const CATALOG_JSON: &str = include_str!("catalog.json");

/// Products offered on the subscriptions page.
pub fn catalog() -> Result<Vec<Product>, serde_json::Error> {
    serde_json::from_str(CATALOG_JSON)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("You can only have one subscription plan in your cart at a time.")]
    OtherSubscriptionInCart,
    #[error("This subscription is already in your cart.")]
    SubscriptionAlreadyInCart,
}

pub struct Cart<S> {
    store: S,
    items: Vec<CartItem>,
}

impl<S> Cart<S>
where
    S: KeyValueStore,
{
    pub fn load(store: S) -> Self {
        let items: Vec<CartItem> = store::load_json(&store, STORAGE_KEY).unwrap_or_default();
        Self { store, items }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn has_subscription(&self) -> bool {
        self.items.iter().any(|item| item.is_subscription)
    }

    /// Sum of all quantities, the number shown on the cart badge.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn total_price(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Puts `product` in the cart. At most one subscription plan may be in
    /// the cart, with quantity one; accessories stack.
    pub fn add(&mut self, product: &Product) -> Result<(), CartError> {
        if product.is_subscription() {
            if let Some(existing) = self.items.iter().find(|item| item.is_subscription) {
                return Err(if existing.id() == product.id {
                    CartError::SubscriptionAlreadyInCart
                } else {
                    CartError::OtherSubscriptionInCart
                });
            }
        }

        match self.items.iter_mut().find(|item| item.id() == product.id) {
            Some(item) => item.quantity += 1,
            None => self.items.push(CartItem::new(product.clone())),
        }
        log::debug!("added product {} to cart", product.id);
        self.persist();
        Ok(())
    }

    pub fn increment(&mut self, id: u32) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            return false;
        };
        if item.is_subscription {
            return false;
        }
        item.quantity += 1;
        self.persist();
        true
    }

    /// Lowers the quantity by one, dropping the line when it reaches zero.
    pub fn decrement(&mut self, id: u32) -> bool {
        let Some(index) = self.items.iter().position(|item| item.id() == id) else {
            return false;
        };
        let item = &mut self.items[index];
        item.quantity = item.quantity.saturating_sub(1);
        if item.quantity == 0 {
            self.items.remove(index);
        }
        self.persist();
        true
    }

    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        if self.items.len() == before {
            return false;
        }
        self.persist();
        true
    }

    fn persist(&mut self) {
        store::save_json(&mut self.store, STORAGE_KEY, &self.items);
    }
}
