//! Demo checkout form. Only a display summary of the card is ever stored and
//! the CVV is never kept.

use serde::{Deserialize, Serialize};

use crate::store::{self, KeyValueStore, StoreError};

pub const STORAGE_KEY: &str = "eztech_credit_card";

const CARD_DIGITS: usize = 16;
const EXPIRY_DIGITS: usize = 4;
const CVV_MAX_DIGITS: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum CardError {
    #[error("Please enter a full 16-digit card number.")]
    IncompleteNumber,
    #[error("Please enter the name on the card.")]
    MissingName,
    #[error("Please enter a valid expiry date (MM/YY).")]
    InvalidExpiry,
    #[error("Please enter a valid CVV.")]
    InvalidCvv,
    #[error("Failed to save card information.")]
    Storage(#[source] StoreError),
}

fn digits(raw: &str, max: usize) -> String {
    raw.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// `"4111-1111 1111111122"` becomes `"4111 1111 1111 1111"`.
pub fn format_card_number(raw: &str) -> String {
    let digits = digits(raw, CARD_DIGITS);
    digits
        .as_bytes()
        .chunks(4)
        .map(|group| String::from_utf8_lossy(group).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"0828"` becomes `"08/28"`; fewer than three digits are left alone.
pub fn format_expiry(raw: &str) -> String {
    let digits = digits(raw, EXPIRY_DIGITS);
    if digits.len() >= 3 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

pub fn format_cvv(raw: &str) -> String {
    digits(raw, CVV_MAX_DIGITS)
}

/// Form fields, each already passed through its formatter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardForm {
    pub name_on_card: String,
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
}

impl CardForm {
    pub fn new(name_on_card: &str, card_number: &str, expiry: &str, cvv: &str) -> Self {
        Self {
            name_on_card: name_on_card.to_string(),
            card_number: format_card_number(card_number),
            expiry: format_expiry(expiry),
            cvv: format_cvv(cvv),
        }
    }

    /// Reports the first problem in form order.
    pub fn validate(&self) -> Result<(), CardError> {
        if digits(&self.card_number, usize::MAX).len() != CARD_DIGITS {
            return Err(CardError::IncompleteNumber);
        }
        if self.name_on_card.trim().is_empty() {
            return Err(CardError::MissingName);
        }
        if self.expiry.len() < EXPIRY_DIGITS {
            return Err(CardError::InvalidExpiry);
        }
        if self.cvv.len() < 3 {
            return Err(CardError::InvalidCvv);
        }
        Ok(())
    }

    pub fn save<S>(&self, store: &mut S) -> Result<SavedCard, CardError>
    where
        S: KeyValueStore + ?Sized,
    {
        self.validate()?;
        let number = digits(&self.card_number, CARD_DIGITS);
        let card = SavedCard {
            name_on_card: self.name_on_card.trim().to_string(),
            card_number_formatted: self.card_number.clone(),
            last4: number[number.len() - 4..].to_string(),
            expiry: self.expiry.clone(),
        };
        let serialized =
            serde_json::to_string(&card).map_err(|e| CardError::Storage(e.into()))?;
        store
            .set(STORAGE_KEY, &serialized)
            .map_err(CardError::Storage)?;
        log::info!("saved card ending in {}", card.last4);
        Ok(card)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavedCard {
    #[serde(default)]
    pub name_on_card: String,
    #[serde(default)]
    pub card_number_formatted: String,
    #[serde(default)]
    pub last4: String,
    #[serde(default)]
    pub expiry: String,
}

impl SavedCard {
    pub fn load<S>(store: &S) -> Option<Self>
    where
        S: KeyValueStore + ?Sized,
    {
        store::load_json(store, STORAGE_KEY)
    }

    /// Prefills a form; the CVV has to be typed again.
    pub fn to_form(&self) -> CardForm {
        CardForm {
            name_on_card: self.name_on_card.clone(),
            card_number: self.card_number_formatted.clone(),
            expiry: self.expiry.clone(),
            cvv: String::new(),
        }
    }
}
