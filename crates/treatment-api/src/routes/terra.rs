use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use treatment_core::models::linked_account::LinkStatus;
use treatment_db::wearables::SampleInput;
use treatment_terra::error::TerraError;
use treatment_terra::normalize::normalize;
use treatment_terra::payload::WebhookPayload;
use treatment_terra::signature::{self, DEFAULT_TOLERANCE_SECS};

use crate::error::ApiError;
use crate::state::AppState;

/// Terra links are stored with this provider name; the per-sample provider
/// field carries the upstream wearable (oura, google, ...).
const TERRA_PROVIDER: &str = "terra";

#[derive(Serialize)]
pub struct WebhookAck {
    pub accepted: u64,
}

/// Terra webhook ingestion: verify the signature, normalize the payload,
/// write samples for the linked account.
///
/// Unknown Terra users and payload kinds are acknowledged with zero
/// accepted samples so Terra does not keep retrying them.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<WebhookAck>, ApiError> {
    let signature_header = headers
        .get("terra-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing terra-signature header".to_string()))?;

    signature::verify(
        &state.terra_secret,
        signature_header,
        &body,
        Utc::now(),
        DEFAULT_TOLERANCE_SECS,
    )?;

    let payload = WebhookPayload::from_json(&body).map_err(TerraError::PayloadParse)?;

    match payload.kind.as_str() {
        "auth" => {
            if let Some(user) = &payload.user {
                tracing::info!(terra_user_id = %user.user_id, "terra auth webhook received");
            }
            Ok(Json(WebhookAck { accepted: 0 }))
        }
        "deauth" => {
            if let Some(user) = &payload.user {
                let changed = treatment_db::linked_accounts::set_status_by_provider_user(
                    &state.db,
                    TERRA_PROVIDER,
                    &user.user_id,
                    LinkStatus::Revoked,
                )
                .await?;
                tracing::info!(terra_user_id = %user.user_id, changed, "terra deauth processed");
            }
            Ok(Json(WebhookAck { accepted: 0 }))
        }
        _ => {
            let samples = normalize(&payload, Utc::now());
            if samples.is_empty() {
                return Ok(Json(WebhookAck { accepted: 0 }));
            }

            // normalize() only emits samples when a user block is present.
            let terra_user_id = samples[0].terra_user_id.clone();

            let Some(link) = treatment_db::linked_accounts::find_by_provider_user(
                &state.db,
                TERRA_PROVIDER,
                &terra_user_id,
            )
            .await?
            else {
                tracing::warn!(
                    terra_user_id = %terra_user_id,
                    kind = %payload.kind,
                    "webhook for unknown terra user acknowledged"
                );
                return Ok(Json(WebhookAck { accepted: 0 }));
            };

            let inputs: Vec<SampleInput> = samples
                .into_iter()
                .map(|s| SampleInput {
                    provider: s.provider,
                    metric: s.metric,
                    value: s.value,
                    recorded_at: s.recorded_at,
                })
                .collect();

            let accepted =
                treatment_db::wearables::insert_batch(&state.db, link.account_id, &inputs).await?;

            tracing::info!(
                account_id = %link.account_id,
                kind = %payload.kind,
                accepted,
                "terra samples ingested"
            );

            Ok(Json(WebhookAck { accepted }))
        }
    }
}
