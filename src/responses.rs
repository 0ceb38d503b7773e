//! Typed projections of the provider's `result` payloads.
//!
//! Field names mirror the provider's JSON; everything is optional because
//! the provider omits fields freely depending on the queried bank.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DepositOwner {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Result of an IBAN inquiry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IbanInquiry {
    #[serde(rename = "IBAN", default)]
    pub iban: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub deposit: Option<String>,
    #[serde(default)]
    pub deposit_status: Option<String>,
    #[serde(default)]
    pub deposit_description: Option<String>,
    #[serde(default)]
    pub deposit_comment: Option<String>,
    #[serde(default)]
    pub deposit_owners: Vec<DepositOwner>,
    #[serde(default)]
    pub alert_code: Option<String>,
}

impl IbanInquiry {
    /// `depositStatus` code `02`: the deposit is open and transacting.
    pub fn is_active(&self) -> bool {
        self.deposit_status.as_deref() == Some("02")
    }

    /// First name of the sole owner; `None` for joint deposits.
    pub fn owner_first_name(&self) -> Option<&str> {
        match self.deposit_owners.as_slice() {
            [owner] => owner.first_name.as_deref(),
            _ => None,
        }
    }

    pub fn owner_last_name(&self) -> Option<&str> {
        match self.deposit_owners.as_slice() {
            [owner] => owner.last_name.as_deref(),
            _ => None,
        }
    }
}

/// Result of a card inquiry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInquiry {
    #[serde(default)]
    pub dest_card: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub do_time: Option<String>,
}

impl CardInquiry {
    /// Result code `0`: the card exists and is serviceable.
    pub fn is_valid(&self) -> bool {
        self.result.as_deref() == Some("0")
    }

    pub fn full_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Result of resolving a card number to its backing deposit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardToIban {
    #[serde(default)]
    pub card: Option<String>,
    #[serde(flatten)]
    pub deposit: IbanInquiry,
}

impl CardToIban {
    pub fn is_active(&self) -> bool {
        self.deposit.is_active()
    }
}

/// Result of the SMS national-ID verification service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NationalIdVerification {
    #[serde(default)]
    pub national_code: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub full_name_similarity: Option<u32>,
    #[serde(default)]
    pub first_name_similarity: Option<u32>,
    #[serde(default)]
    pub last_name_similarity: Option<u32>,
    #[serde(default)]
    pub father_name_similarity: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub death_status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
