// src/services/payment.rs

//! Simulated payment provider. Capture always succeeds; a real integration
//! (Stripe, Razorpay, ...) would slot in behind the same signature.

use crate::errors::{AppError, Result};
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct PaymentReceipt {
  /// Provider-side transaction reference.
  pub provider_ref: String,
  pub amount_cents: i64,
  pub status: &'static str,
}

#[instrument(name = "payment::capture", skip_all, fields(%user_id, %order_id, amount_cents))]
pub async fn capture(user_id: Uuid, order_id: Uuid, amount_cents: i64) -> Result<PaymentReceipt> {
  if amount_cents <= 0 {
    return Err(AppError::Payment("Amount must be greater than zero.".to_string()));
  }

  let receipt = PaymentReceipt {
    provider_ref: format!("mock_pay_{}", Uuid::new_v4()),
    amount_cents,
    status: "success",
  };
  info!(provider_ref = %receipt.provider_ref, "Simulated payment captured.");
  Ok(receipt)
}
