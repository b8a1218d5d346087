// ─────────────────────────────────────────────────────────────────
// Orders - payment-proof submission and verification lifecycle
// ─────────────────────────────────────────────────────────────────
// pending ──(payment verified)──▶ verified ──(shipped)──▶ delivered
//
// Status only moves forward one step at a time. There is no
// cancellation or refund state, and orders are never deleted.
// ─────────────────────────────────────────────────────────────────

use crate::CalcError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Verified,
    Delivered,
}

impl OrderStatus {
    /// The single status this one may move to, if any.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Verified),
            OrderStatus::Verified => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Label shown to the buyer.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending Verification",
            OrderStatus::Verified => "Payment Verified",
            OrderStatus::Delivered => "Delivered",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Verified => "verified",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "verified" => Ok(OrderStatus::Verified),
            "delivered" => Ok(OrderStatus::Delivered),
            other => Err(CalcError::InvalidInput(format!(
                "unknown order status '{}'",
                other
            ))),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    pub product_id: u32,
    /// Always 1; the store sells one unit per order.
    pub quantity: u32,
    pub screenshot_present: bool,
    pub transaction_id: String,
    /// Amount charged (cents), from the checkout quote
    pub total: u64,
    pub status: OrderStatus,
}

impl Order {
    /// Accept a checkout submission. Both a payment screenshot and a
    /// non-blank transaction id are required; the order starts pending.
    pub fn submit(
        id: impl Into<String>,
        product_id: u32,
        transaction_id: &str,
        screenshot_present: bool,
        total: u64,
    ) -> Result<Self, CalcError> {
        let order = Self {
            id: id.into(),
            product_id,
            quantity: 1,
            screenshot_present,
            transaction_id: transaction_id.trim().to_string(),
            total,
            status: OrderStatus::Pending,
        };
        order.validate()?;
        Ok(order)
    }

    /// Check the submission invariants. Orders read back from storage go
    /// through this too, whatever their status.
    pub fn validate(&self) -> Result<(), CalcError> {
        if !self.screenshot_present || self.transaction_id.trim().is_empty() {
            return Err(CalcError::InvalidInput(
                "payment screenshot and transaction id are both required".to_string(),
            ));
        }
        if self.id.trim().is_empty() {
            return Err(CalcError::InvalidInput("order id is empty".to_string()));
        }
        if self.quantity != 1 {
            return Err(CalcError::InvalidInput(format!(
                "order quantity must be 1, got {}",
                self.quantity
            )));
        }
        Ok(())
    }

    /// Move to `to`, which must be the immediate next status.
    pub fn transition_to(&mut self, to: OrderStatus) -> Result<(), CalcError> {
        if self.status.next() != Some(to) {
            return Err(CalcError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    /// Payment proof accepted by an administrator.
    pub fn verify(&mut self) -> Result<(), CalcError> {
        self.transition_to(OrderStatus::Verified)
    }

    pub fn deliver(&mut self) -> Result<(), CalcError> {
        self.transition_to(OrderStatus::Delivered)
    }
}
