use http::Method;

use crate::api::result_object;
use crate::client::{FinnotechClient, RequestAuth, Tracking};
use crate::error::Result;
use crate::responses::IbanInquiry;
use crate::validate;

impl FinnotechClient {
    /// Look up the deposit behind an IBAN (`oak:iban-inquiry:get`).
    ///
    /// The IBAN must be `IR` followed by 24 digits,
    /// e.g. `IR910800005000115426432001`.
    pub async fn iban_inquiry(&self, iban: &str) -> Result<IbanInquiry> {
        validate::iban(iban)?;
        let path = format!("/oak/v2/clients/{}/ibanInquiry", self.client_id());
        let envelope = self
            .execute(
                Method::GET,
                &path,
                &[("iban", iban)],
                None,
                RequestAuth::ClientCredential,
                Tracking::Auto,
            )
            .await?;
        result_object(&envelope)
    }
}
