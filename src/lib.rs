//! # Finnotech API Client
//!
//! Client library for the Finnotech financial data REST API: IBAN and card
//! inquiries, card-to-IBAN resolution, credit reliability reports, and
//! SMS-based national-ID verification.
//!
//! The heart of the crate is the authenticated request pipeline: a
//! client-credential token is fetched on demand through the OAuth-style
//! exchange, cached per client instance, and reused while valid. When the
//! provider answers `403` the pipeline refreshes the credential and resends
//! the request exactly once.
//!
//! Modules:
//! - `client` — [`FinnotechClient`], its builder, and the request executor
//! - `token` — token data model, decoding, validity policies, and the cache
//! - `auth` — scope tables, the credential exchange, and the SMS flow
//! - `responses` — typed projections of the provider's `result` payloads

pub mod auth;
pub mod client;
pub mod error;
pub mod responses;
pub mod token;

mod api;
mod validate;

#[cfg(test)]
mod tests;

pub use crate::api::facility::NidVerificationRequest;
pub use crate::auth::sms::{SmsChallenge, SmsGrant};
pub use crate::client::{FinnotechClient, FinnotechClientBuilder, URL_MAINNET, URL_SANDBOX};
pub use crate::error::{Error, Result};
pub use crate::token::cache::TokenCache;
pub use crate::token::{ExpiryPolicy, HeaderScheme, Token, TokenKind};
