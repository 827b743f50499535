//! Bank/wallet specific statement layouts.

pub mod tng_ewallet;
