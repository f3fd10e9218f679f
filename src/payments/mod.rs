//! pawaPay payments integration
//!
//! Payouts, deposits and refunds against the pawaPay REST API. Requests are
//! built in [`payload`], sent by [`transport`], and exposed per endpoint
//! through [`traits::MobileMoneyProvider`].

pub mod payload;
pub mod providers;
pub mod traits;
pub mod transport;
pub mod types;
