use crate::error::AuditError;
use crate::models::WebsiteSnapshot;

impl WebsiteSnapshot {
    /// Parse a snapshot from an already-decoded JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self, AuditError> {
        if value.is_null() {
            return Err(AuditError::MissingWebsiteData);
        }

        let snapshot: WebsiteSnapshot = serde_json::from_value(value)
            .map_err(|e| AuditError::InvalidSnapshot(e.to_string()))?;
        snapshot.validate()?;

        Ok(snapshot)
    }

    /// Parse and validate a snapshot from JSON text
    pub fn from_json(text: &str) -> Result<Self, AuditError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| AuditError::InvalidSnapshot(e.to_string()))?;

        // Accept both a bare snapshot and the `{ "websiteData": ... }` request envelope
        match value {
            serde_json::Value::Object(mut map) if map.contains_key("websiteData") => {
                Self::from_value(map.remove("websiteData").unwrap_or_default())
            }
            other => Self::from_value(other),
        }
    }

    pub fn validate(&self) -> Result<(), AuditError> {
        let images = &self.images;
        if u64::from(images.with_alt) + u64::from(images.without_alt) != u64::from(images.total) {
            return Err(AuditError::InvalidSnapshot(format!(
                "image counts do not add up: withAlt ({}) + withoutAlt ({}) != total ({})",
                images.with_alt, images.without_alt, images.total
            )));
        }

        Ok(())
    }
}
