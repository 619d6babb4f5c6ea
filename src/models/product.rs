use serde::{Deserialize, Serialize};

/// Something that can be put in the cart: a streaming plan or an accessory.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub service: String,
    pub service_info: String,
    pub price: f64,
    pub img: Option<String>,
}

impl Product {
    pub fn is_subscription(&self) -> bool {
        self.service.contains("Subscription")
    }
}
