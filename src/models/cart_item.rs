use serde::{Deserialize, Serialize};

use super::product::Product;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
    #[serde(default)]
    pub is_subscription: bool,
}

impl CartItem {
    pub fn new(product: Product) -> Self {
        let is_subscription = product.is_subscription();
        Self {
            product,
            quantity: 1,
            is_subscription,
        }
    }

    pub fn id(&self) -> u32 {
        self.product.id
    }

    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}
