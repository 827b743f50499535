//! Touch 'n Go eWallet statement parser (text)
//!
//! Expected extracted-text rows (often wrapped over several lines, with the
//! reference number glued to the amount):
//!   Date       Status   Transaction Type   Reference   Description   Details   Amount (RM)   Wallet Balance
//!   30/9/2025  Success  DuitNow QR  20250930101 ... 025Day By Day NanYang 2025...74677RM15.00 RM0.00

use anyhow::Result;

use bookkeep_core::Transaction;

use crate::layout::StatementLayout;

pub const CURRENCY_MARKER: &str = "RM";

/// Known transaction-type labels.
pub const TRANSACTION_TYPES: &[&str] = &[
    "Payment Cancelled",
    "GO+ Daily Earnings",
    "GO+ Cash In",
    "DuitNow QR TNGD",
    "DUITNOW_RECEIVEFROM",
    "Transfer to Wallet",
    "Receive from Wallet",
    "eWallet Cash Out",
    "DuitNow QR",
    "Reload",
    "Payment",
];

pub fn tng_ewallet_layout() -> Result<StatementLayout> {
    StatementLayout::new(CURRENCY_MARKER, TRANSACTION_TYPES)
}

/// Parse extracted statement text into eWallet transactions.
pub fn parse_tng_ewallet_text(text: &str) -> Result<Vec<Transaction>> {
    let layout = tng_ewallet_layout()?;
    Ok(crate::parse_statement_text(&layout, text))
}
