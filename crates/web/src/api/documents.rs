// =============================================================================
// Lumen Web - Hosted Document Store Client
// =============================================================================
// Writes `users/{uid}` profile documents through the Firestore REST API.
// Documents are write-only from this client.
// =============================================================================

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::{ApiClient, ApiError};
use crate::auth::{ProfileStore, UserProfileRecord, WriteMode};
use crate::config::HostedConfig;

const USERS_COLLECTION: &str = "users";

pub struct HostedDocuments {
    client: ApiClient,
    project_id: String,
}

impl HostedDocuments {
    pub fn new(config: &HostedConfig) -> Self {
        Self {
            client: ApiClient::new(config.documents_url.clone()),
            project_id: config.project_id.clone(),
        }
    }

    fn document_path(&self, collection: &str, id: &str) -> String {
        format!(
            "/projects/{}/databases/(default)/documents/{}/{}",
            self.project_id,
            collection,
            urlencoding::encode(id)
        )
    }
}

impl ProfileStore for HostedDocuments {
    async fn write_profile(
        &self,
        id_token: &str,
        uid: &str,
        record: &UserProfileRecord,
        mode: WriteMode,
    ) -> Result<(), ApiError> {
        let fields = encode_fields(record)?;
        let endpoint = format!(
            "{}{}",
            self.document_path(USERS_COLLECTION, uid),
            update_mask(&fields, mode)
        );

        log::debug!("Writing profile document for uid {} ({:?})", uid, mode);
        let _: Value = self
            .client
            .patch_authorized(&endpoint, &json!({ "fields": fields }), id_token)
            .await?;
        Ok(())
    }
}

/// Encode a flat serializable struct as a typed field map.
fn encode_fields<T: Serialize>(value: &T) -> Result<Map<String, Value>, ApiError> {
    match serde_json::to_value(value).map_err(|e| ApiError::Deserialize(e.to_string()))? {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(name, value)| (name, typed_value(value)))
            .collect()),
        other => Err(ApiError::Deserialize(format!(
            "expected an object, got {other}"
        ))),
    }
}

fn typed_value(value: Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) if n.is_i64() || n.is_u64() => json!({ "integerValue": n.to_string() }),
        Value::Number(n) => json!({ "doubleValue": n }),
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.into_iter().map(typed_value).collect::<Vec<_>>() }
        }),
        Value::Object(map) => json!({
            "mapValue": {
                "fields": map
                    .into_iter()
                    .map(|(k, v)| (k, typed_value(v)))
                    .collect::<Map<String, Value>>()
            }
        }),
    }
}

/// Query string restricting a PATCH to the written fields. Empty for a full
/// replace.
fn update_mask(fields: &Map<String, Value>, mode: WriteMode) -> String {
    match mode {
        WriteMode::Replace => String::new(),
        WriteMode::Merge => {
            let params: Vec<String> = fields
                .keys()
                .map(|name| format!("updateMask.fieldPaths={}", urlencoding::encode(name)))
                .collect();
            format!("?{}", params.join("&"))
        }
    }
}
