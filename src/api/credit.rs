use http::Method;
use serde_json::Value;

use crate::api::result_object;
use crate::client::{FinnotechClient, RequestAuth, Tracking};
use crate::error::Result;
use crate::validate;

impl FinnotechClient {
    /// Fetch the credit-reliability report for a national ID
    /// (`credit:cc-standard-reliability:get`).
    ///
    /// The OTP must have been texted to a phone number registered to the
    /// same person. The bureau report has no stable shape, so the raw
    /// `result` JSON is returned as-is.
    pub async fn standard_reliability(
        &self,
        national_id: &str,
        phone_number: &str,
        otp: &str,
    ) -> Result<Value> {
        validate::national_id(national_id)?;
        validate::phone(phone_number)?;
        validate::otp(otp)?;

        let path = format!(
            "/oak/v2/clients/{}/users/{}/standardReliability",
            self.client_id(),
            national_id
        );
        let envelope = self
            .execute(
                Method::GET,
                &path,
                &[("phoneNumber", phone_number), ("otp", otp)],
                None,
                RequestAuth::ClientCredential,
                Tracking::Auto,
            )
            .await?;
        result_object(&envelope)
    }
}
