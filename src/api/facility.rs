use http::Method;

use crate::api::result_object;
use crate::client::{FinnotechClient, RequestAuth, Tracking};
use crate::error::{Error, Result};
use crate::responses::{CardToIban, NationalIdVerification};
use crate::token::Token;
use crate::validate;

/// Identity attributes to verify against the civil registry.
///
/// `gender` is `مرد` or `زن`. At least one of `full_name`, `first_name`,
/// `last_name` must be given; when `full_name` is absent and both name
/// parts are present, they are joined for the provider.
#[derive(Debug, Clone, Default)]
pub struct NidVerificationRequest<'a> {
    pub national_id: &'a str,
    /// Jalali date, `YYYY/MM/DD`.
    pub birth_date: &'a str,
    pub gender: &'a str,
    pub full_name: Option<&'a str>,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub father_name: Option<&'a str>,
}

impl FinnotechClient {
    /// Resolve a card number to its backing IBAN
    /// (`facility:card-to-iban:get`).
    pub async fn card_to_iban(&self, card: &str) -> Result<CardToIban> {
        validate::card(card)?;
        let path = format!("/facility/v2/clients/{}/cardToIban", self.client_id());
        let envelope = self
            .execute(
                Method::GET,
                &path,
                &[("card", card)],
                None,
                RequestAuth::ClientCredential,
                Tracking::Auto,
            )
            .await?;
        result_object(&envelope)
    }

    /// Verify identity attributes against a national ID
    /// (`facility:sms-nid-verification:get`).
    ///
    /// Requires an access token from the SMS authorization flow.
    pub async fn national_id_verification(
        &self,
        access_token: &Token,
        request: &NidVerificationRequest<'_>,
    ) -> Result<NationalIdVerification> {
        validate::national_id(request.national_id)?;
        validate::birth_date(request.birth_date)?;
        validate::gender(request.gender)?;
        if request.full_name.is_none()
            && request.first_name.is_none()
            && request.last_name.is_none()
        {
            return Err(Error::InvalidInput {
                field: "full_name",
                value: String::new(),
            });
        }

        let joined;
        let full_name = match (request.full_name, request.first_name, request.last_name) {
            (Some(full), _, _) => Some(full),
            (None, Some(first), Some(last)) => {
                joined = format!("{first} {last}");
                Some(joined.as_str())
            }
            _ => None,
        };

        let mut query: Vec<(&str, &str)> = vec![
            ("birthDate", request.birth_date),
            ("gender", request.gender),
        ];
        if let Some(value) = full_name {
            query.push(("fullName", value));
        }
        if let Some(value) = request.first_name {
            query.push(("firstName", value));
        }
        if let Some(value) = request.last_name {
            query.push(("lastName", value));
        }
        if let Some(value) = request.father_name {
            query.push(("fatherName", value));
        }

        let path = format!(
            "/facility/v2/clients/{}/users/{}/sms/nidVerification",
            self.client_id(),
            request.national_id
        );
        let envelope = self
            .execute(
                Method::GET,
                &path,
                &query,
                None,
                RequestAuth::Access(access_token),
                Tracking::Auto,
            )
            .await?;
        result_object(&envelope)
    }
}
