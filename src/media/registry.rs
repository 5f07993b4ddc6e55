//! Media registry: uploaded entries and the lifecycle of their content handles.

use chrono::{NaiveDate, Utc};

use crate::config::{ClipDefaults, EditorConfig, SizeLimits};
use crate::core::error::{EditorError, Result};
use crate::core::id::MediaId;
use crate::core::time::format_megabytes;
use crate::media::content::{ContentHandle, ContentStore};
use crate::media::kind::MediaKind;
use crate::media::payload::DragPayload;

/// Thumbnail source for a media entry
#[derive(Debug, Clone, PartialEq)]
pub enum Thumbnail {
    /// Generated placeholder reference
    Placeholder(String),
    /// The entry's own content (images)
    Content(ContentHandle),
}

/// An uploaded media item
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEntry {
    pub id: MediaId,
    pub kind: MediaKind,
    pub title: String,
    pub size_bytes: u64,
    pub duration_label: Option<String>,
    pub thumbnail: Thumbnail,
    pub added_at: NaiveDate,
    pub content: ContentHandle,
}

impl MediaEntry {
    /// Human-readable size, e.g. "4.0 MB"
    pub fn size_label(&self) -> String {
        format_megabytes(self.size_bytes)
    }

    pub fn thumbnail_ref(&self) -> &str {
        match &self.thumbnail {
            Thumbnail::Placeholder(reference) => reference,
            Thumbnail::Content(handle) => handle.url(),
        }
    }

    /// Drag payload for placing this entry on the timeline
    pub fn drag_payload(&self, defaults: &ClipDefaults) -> DragPayload {
        DragPayload::media(
            self.id.clone(),
            self.kind,
            &self.title,
            defaults.for_kind(self.kind),
        )
    }
}

/// In-memory store of uploaded media, most recent first
#[derive(Debug)]
pub struct MediaRegistry {
    entries: Vec<MediaEntry>,
    store: ContentStore,
    limits: SizeLimits,
}

impl MediaRegistry {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            entries: Vec::new(),
            store: ContentStore::new(config.content_pool_bytes),
            limits: config.limits.clone(),
        }
    }

    /// Ingest an upload.
    ///
    /// Validation happens before any allocation; on error the registry is
    /// unchanged. On success the entry is prepended and a copy returned.
    pub async fn add_media(&mut self, bytes: Vec<u8>, mime: &str, name: &str) -> Result<MediaEntry> {
        let kind = MediaKind::from_mime(mime).ok_or_else(|| EditorError::UnsupportedType {
            mime: mime.to_string(),
        })?;

        let ceiling = self.limits.ceiling(kind);
        let actual = bytes.len() as u64;
        if actual > ceiling {
            log::info!("Rejected {} upload {:?}: {} bytes > {}", kind, name, actual, ceiling);
            return Err(EditorError::SizeExceeded { kind, ceiling, actual });
        }

        let content = self.store.allocate(bytes).await?;

        let thumbnail = match kind {
            MediaKind::Image => Thumbnail::Content(content.clone()),
            _ => Thumbnail::Placeholder(placeholder_thumbnail(name)),
        };

        let entry = MediaEntry {
            id: MediaId::generate(),
            kind,
            title: name.to_string(),
            size_bytes: actual,
            duration_label: (kind == MediaKind::Video).then(|| "0:00".to_string()),
            thumbnail,
            added_at: Utc::now().date_naive(),
            content,
        };

        log::info!("Added {} {:?} as {} ({})", kind, name, entry.id, entry.size_label());
        self.entries.insert(0, entry.clone());
        Ok(entry)
    }

    /// Remove an entry and revoke its content. Absent ids are ignored.
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove_media(&mut self, id: &MediaId) -> bool {
        match self.entries.iter().position(|e| &e.id == id) {
            Some(pos) => {
                let entry = self.entries.remove(pos);
                entry.content.revoke();
                log::info!("Removed media {} ({:?})", entry.id, entry.title);
                true
            }
            None => false,
        }
    }

    pub fn lookup(&self, id: &MediaId) -> Option<&MediaEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Entries, most recently added first
    pub fn entries(&self) -> &[MediaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }
}

impl Drop for MediaRegistry {
    fn drop(&mut self) {
        for entry in &self.entries {
            entry.content.revoke();
        }
    }
}

fn placeholder_thumbnail(name: &str) -> String {
    format!(
        "/placeholder.svg?height=120&width=160&query={}",
        encode_query_component(name)
    )
}

// Same unreserved set as JavaScript's encodeURIComponent.
fn encode_query_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: usize = 1024 * 1024;

    fn registry() -> MediaRegistry {
        MediaRegistry::new(&EditorConfig::default())
    }

    #[tokio::test]
    async fn test_add_video() {
        let mut registry = registry();
        let entry = registry
            .add_media(vec![0; 4 * MB], "video/mp4", "beach.mp4")
            .await
            .unwrap();

        assert_eq!(entry.kind, MediaKind::Video);
        assert_eq!(entry.size_label(), "4.0 MB");
        assert_eq!(entry.duration_label.as_deref(), Some("0:00"));
        assert_eq!(entry.title, "beach.mp4");
        assert_eq!(
            entry.thumbnail_ref(),
            "/placeholder.svg?height=120&width=160&query=beach.mp4"
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup(&entry.id), Some(&entry));
    }

    #[tokio::test]
    async fn test_image_uses_own_content_as_thumbnail() {
        let mut registry = registry();
        let entry = registry
            .add_media(vec![0; 1000], "image/png", "logo.png")
            .await
            .unwrap();

        assert_eq!(entry.thumbnail, Thumbnail::Content(entry.content.clone()));
        assert_eq!(entry.thumbnail_ref(), entry.content.url());
        assert_eq!(entry.duration_label, None);
    }

    #[tokio::test]
    async fn test_size_ceilings() {
        let mut registry = registry();

        let err = registry
            .add_media(vec![0; 2 * MB], "image/png", "big.png")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            EditorError::SizeExceeded {
                kind: MediaKind::Image,
                ceiling: MB as u64,
                actual: 2 * MB as u64,
            }
        );

        assert!(registry.add_media(vec![0; 2 * MB + 1], "audio/mpeg", "a.mp3").await.is_err());
        assert!(registry.add_media(vec![0; 5 * MB + 1], "video/mp4", "v.mp4").await.is_err());
        assert!(registry.is_empty());
        assert_eq!(registry.store().live_bytes(), 0);

        // Exactly at the ceiling is accepted
        assert!(registry.add_media(vec![0; 2 * MB], "audio/mpeg", "a.mp3").await.is_ok());
    }

    #[tokio::test]
    async fn test_unsupported_type() {
        let mut registry = registry();
        let err = registry
            .add_media(vec![0; 10], "application/pdf", "doc.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, EditorError::UnsupportedType { mime } if mime == "application/pdf"));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_most_recent_first() {
        let mut registry = registry();
        let first = registry.add_media(vec![1], "audio/wav", "one.wav").await.unwrap();
        let second = registry.add_media(vec![2], "audio/wav", "two.wav").await.unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.entries()[0].id, second.id);
        assert_eq!(registry.entries()[1].id, first.id);
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let mut registry = registry();
        let entry = registry.add_media(vec![0; 64], "video/webm", "v.webm").await.unwrap();

        assert!(registry.remove_media(&entry.id));
        assert!(entry.content.is_revoked());
        assert!(registry.lookup(&entry.id).is_none());

        assert!(!registry.remove_media(&entry.id));
        assert!(registry.is_empty());
        assert_eq!(registry.store().live_bytes(), 0);
    }

    #[tokio::test]
    async fn test_pool_exhaustion_is_ingestion_error() {
        let mut config = EditorConfig::default();
        config.content_pool_bytes = 100;
        let mut registry = MediaRegistry::new(&config);

        let err = registry.add_media(vec![0; 101], "image/png", "x.png").await.unwrap_err();
        assert!(matches!(err, EditorError::Ingestion(_)));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_dropped_upload_leaves_no_trace() {
        let mut config = EditorConfig::default();
        config.content_pool_bytes = 1000;
        let mut registry = MediaRegistry::new(&config);

        {
            let mut upload = std::pin::pin!(registry.add_media(vec![0; 800], "video/mp4", "a.mp4"));
            std::future::poll_fn(|cx| {
                let _ = std::future::Future::poll(upload.as_mut(), cx);
                std::task::Poll::Ready(())
            })
            .await;
        }

        assert!(registry.is_empty());
        assert_eq!(registry.store().live_bytes(), 0);
        assert!(registry.add_media(vec![0; 800], "video/mp4", "b.mp4").await.is_ok());
        assert_eq!(registry.store().live_bytes(), 800);
    }

    #[test]
    fn test_encode_query_component() {
        assert_eq!(encode_query_component("my clip (1).mp4"), "my%20clip%20(1).mp4");
        assert_eq!(encode_query_component("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_query_component("é"), "%C3%A9");
    }

    #[tokio::test]
    async fn test_drag_payload_uses_kind_default() {
        let mut registry = registry();
        let entry = registry.add_media(vec![0; 8], "image/jpeg", "p.jpg").await.unwrap();
        let payload = entry.drag_payload(&ClipDefaults::default());

        assert_eq!(payload.media_id, entry.id);
        assert_eq!(payload.media_type, MediaKind::Image);
        assert_eq!(payload.duration, Some(60.0));
    }
}
