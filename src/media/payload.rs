//! Drag-and-drop transfer schema between the media pool/library and the timeline.

use serde::{Deserialize, Serialize};

use crate::core::id::MediaId;
use crate::core::time::Units;
use crate::media::kind::MediaKind;

/// Value of the `type` field for media payloads
pub const MEDIA_PAYLOAD_TYPE: &str = "media";

/// Error type for payload decoding
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Malformed drag payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Unexpected drag payload type: {0}")]
    UnexpectedType(String),
}

/// JSON body carried by a media drag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    #[serde(rename = "type")]
    pub payload_type: String,
    pub media_id: MediaId,
    pub media_type: MediaKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Units>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_online: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl DragPayload {
    /// Payload for a media item with an explicit duration
    pub fn media(media_id: MediaId, media_type: MediaKind, title: &str, duration: Units) -> Self {
        Self {
            payload_type: MEDIA_PAYLOAD_TYPE.to_string(),
            media_id,
            media_type,
            title: title.to_string(),
            duration: Some(duration),
            is_online: None,
            thumbnail: None,
        }
    }

    /// Decode a payload, rejecting anything that is not a media drag
    pub fn parse(json: &str) -> Result<Self, PayloadError> {
        let payload: DragPayload = serde_json::from_str(json)?;
        if payload.payload_type != MEDIA_PAYLOAD_TYPE {
            return Err(PayloadError::UnexpectedType(payload.payload_type));
        }
        Ok(payload)
    }

    pub fn to_json(&self) -> String {
        // Plain structs of strings and numbers always serialize.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Duration to give a clip made from this payload.
    /// Missing or non-positive durations fall back to `fallback`.
    pub fn clip_duration(&self, fallback: Units) -> Units {
        self.duration.filter(|d| *d > 0.0).unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pool_payload() {
        let json = r#"{"type":"media","mediaId":"abc","mediaType":"video","title":"clip.mp4","duration":120}"#;
        let payload = DragPayload::parse(json).unwrap();

        assert_eq!(payload.media_id, MediaId::from("abc"));
        assert_eq!(payload.media_type, MediaKind::Video);
        assert_eq!(payload.title, "clip.mp4");
        assert_eq!(payload.duration, Some(120.0));
        assert_eq!(payload.is_online, None);
    }

    #[test]
    fn test_parse_library_payload() {
        let json = r#"{"type":"media","mediaId":"online-2","mediaType":"image","title":"Mountain Landscape","duration":60,"isOnline":true,"thumbnail":"/majestic-mountain-vista.png"}"#;
        let payload = DragPayload::parse(json).unwrap();

        assert_eq!(payload.is_online, Some(true));
        assert_eq!(payload.thumbnail.as_deref(), Some("/majestic-mountain-vista.png"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(DragPayload::parse("not json"), Err(PayloadError::Malformed(_))));
        assert!(matches!(
            DragPayload::parse(r#"{"type":"media","mediaId":"x"}"#),
            Err(PayloadError::Malformed(_))
        ));
        assert!(matches!(
            DragPayload::parse(r#"{"type":"media","mediaId":"x","mediaType":"text","title":"t"}"#),
            Err(PayloadError::Malformed(_))
        ));
    }

    #[test]
    fn test_rejects_other_types() {
        let json = r#"{"type":"track","mediaId":"x","mediaType":"video","title":"t"}"#;
        assert!(matches!(DragPayload::parse(json), Err(PayloadError::UnexpectedType(t)) if t == "track"));
    }

    #[test]
    fn test_clip_duration_fallback() {
        let mut payload = DragPayload::media(MediaId::from("a"), MediaKind::Audio, "a", 180.0);
        assert_eq!(payload.clip_duration(120.0), 180.0);

        payload.duration = None;
        assert_eq!(payload.clip_duration(120.0), 120.0);

        payload.duration = Some(0.0);
        assert_eq!(payload.clip_duration(120.0), 120.0);
    }

    #[test]
    fn test_to_json_uses_wire_names() {
        let payload = DragPayload::media(MediaId::from("a"), MediaKind::Audio, "song", 180.0);
        let json = payload.to_json();
        assert!(json.contains("\"type\":\"media\""));
        assert!(json.contains("\"mediaId\":\"a\""));
        assert!(json.contains("\"mediaType\":\"audio\""));
        assert!(!json.contains("isOnline"));
    }
}
