use http::Method;

use crate::api::result_object;
use crate::client::{FinnotechClient, RequestAuth, Tracking};
use crate::error::Result;
use crate::responses::CardInquiry;
use crate::validate;

impl FinnotechClient {
    /// Look up a 16-digit Shetab card number (`card:information:get`).
    pub async fn card_inquiry(&self, card: &str) -> Result<CardInquiry> {
        validate::card(card)?;
        let path = format!("/mpg/v2/clients/{}/cards/{}", self.client_id(), card);
        let envelope = self
            .execute(
                Method::GET,
                &path,
                &[],
                None,
                RequestAuth::ClientCredential,
                Tracking::Auto,
            )
            .await?;
        result_object(&envelope)
    }
}
