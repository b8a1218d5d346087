// ─────────────────────────────────────────────────────────────────
// Checkout Pricing - product discount stacked with member discount
// ─────────────────────────────────────────────────────────────────
// product_price   = list × (1 − product discount)      rounded to cent
// member_discount = product_price × member rate         rounded to cent
// total           = product_price − member_discount
// savings         = list − total
//
// Catalog products carry their advertised sale price, which stands in for
// the first line; the member discount always applies to the sale price.
// ─────────────────────────────────────────────────────────────────

use crate::{apply_bps, ensure_rate_below_whole, CalcError, BPS_DENOMINATOR};
use serde::{Deserialize, Serialize};

/// Checkout breakdown, all amounts in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckoutQuote {
    pub list_price: u64,
    pub product_price: u64,
    pub member_discount_amount: u64,
    pub total: u64,
    pub total_savings: u64,
}

/// Compute the checkout total for a product.
///
/// Fails with `InvalidInput` when `list_price` is zero or either discount is
/// 100% or more.
pub fn compute_checkout_total(
    list_price: u64,
    product_discount_bps: u32,
    member_discount_bps: u32,
) -> Result<CheckoutQuote, CalcError> {
    if list_price == 0 {
        return Err(CalcError::InvalidInput(
            "list price must be greater than zero".to_string(),
        ));
    }
    ensure_rate_below_whole(product_discount_bps, "product discount")?;
    ensure_rate_below_whole(member_discount_bps, "member discount")?;

    let product_price = apply_bps(list_price, BPS_DENOMINATOR - product_discount_bps);
    let member_discount_amount = apply_bps(product_price, member_discount_bps);
    // member rate < 100%, so the rounded discount never exceeds product_price
    let total = product_price - member_discount_amount;

    Ok(CheckoutQuote {
        list_price,
        product_price,
        member_discount_amount,
        total,
        total_savings: list_price - total,
    })
}

/// Quote a product whose sale price is already fixed: the member discount
/// applies to `sale_price` and savings are measured against `list_price`.
///
/// Fails with `InvalidInput` when the sale price is zero or above the list
/// price, or the member discount is 100% or more.
pub fn quote_sale_price(
    list_price: u64,
    sale_price: u64,
    member_discount_bps: u32,
) -> Result<CheckoutQuote, CalcError> {
    if sale_price == 0 {
        return Err(CalcError::InvalidInput(
            "sale price must be greater than zero".to_string(),
        ));
    }
    if sale_price > list_price {
        return Err(CalcError::InvalidInput(format!(
            "sale price {} is above list price {}",
            sale_price, list_price
        )));
    }
    ensure_rate_below_whole(member_discount_bps, "member discount")?;

    let member_discount_amount = apply_bps(sale_price, member_discount_bps);
    let total = sale_price - member_discount_amount;

    Ok(CheckoutQuote {
        list_price,
        product_price: sale_price,
        member_discount_amount,
        total,
        total_savings: list_price - total,
    })
}

impl CheckoutQuote {
    /// Savings from the product discount alone.
    pub fn product_savings(&self) -> u64 {
        self.list_price - self.product_price
    }
}
