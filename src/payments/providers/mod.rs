//! Provider implementations
//!
//! Concrete implementations of the MobileMoneyProvider trait.

pub mod pawapay;

pub use pawapay::PawaPayService;
