//! Quotation types used by the quotations screen

use crate::{errors::ValidationError, id::DbId};

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct Quotation {
    pub id: DbId,
    pub client_name: String,
    pub amount: f64,
}

/// A quotation that has passed local checks and is ready to be submitted
#[derive(Debug, serde::Serialize, Clone, PartialEq)]
pub struct QuotationDraft {
    client_name: String,
    amount: f64,
}

impl QuotationDraft {
    pub fn try_new(client_name: String, amount: f64) -> Result<Self, ValidationError> {
        if client_name.is_empty() {
            return Err(ValidationError::new("client_name", "Client name is required"));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::new(
                "amount",
                "Amount must be greater than 0",
            ));
        }
        Ok(Self {
            client_name,
            amount,
        })
    }

    /// Parses the amount from form text before validating
    pub fn try_from_input(client_name: String, amount: &str) -> Result<Self, ValidationError> {
        let amount = amount
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::new("amount", "Amount must be a number"))?;
        Self::try_new(client_name, amount)
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}
