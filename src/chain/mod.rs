//! Chain module - signing and the activation transaction

pub mod activator;
pub mod signer;

pub use activator::{Activator, ChainClient};
pub use signer::{address_of, sign_message};
