//! Online stock media catalogue.
//!
//! Items are not downloaded; they only produce drag payloads flagged as
//! online so the timeline can place them like uploaded media.

use crate::config::ClipDefaults;
use crate::core::id::MediaId;
use crate::media::kind::MediaKind;
use crate::media::payload::DragPayload;

#[derive(Debug, Clone, PartialEq)]
pub struct LibraryItem {
    pub id: u32,
    pub kind: MediaKind,
    pub title: &'static str,
    pub duration_label: Option<&'static str>,
    pub thumbnail: &'static str,
    pub source: &'static str,
}

impl LibraryItem {
    pub fn media_id(&self) -> MediaId {
        MediaId::from(format!("online-{}", self.id))
    }

    pub fn drag_payload(&self, defaults: &ClipDefaults) -> DragPayload {
        let mut payload = DragPayload::media(
            self.media_id(),
            self.kind,
            self.title,
            defaults.for_kind(self.kind),
        );
        payload.is_online = Some(true);
        payload.thumbnail = Some(self.thumbnail.to_string());
        payload
    }
}

/// Category filter for library browsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Only(MediaKind),
}

impl Category {
    fn matches(&self, kind: MediaKind) -> bool {
        match self {
            Category::All => true,
            Category::Only(wanted) => *wanted == kind,
        }
    }
}

const CATALOGUE: &[LibraryItem] = &[
    LibraryItem {
        id: 1,
        kind: MediaKind::Video,
        title: "Ocean Waves",
        duration_label: Some("0:15"),
        thumbnail: "/ocean-waves.png",
        source: "Pexels",
    },
    LibraryItem {
        id: 2,
        kind: MediaKind::Image,
        title: "Mountain Landscape",
        duration_label: None,
        thumbnail: "/majestic-mountain-vista.png",
        source: "Pexels",
    },
    LibraryItem {
        id: 3,
        kind: MediaKind::Video,
        title: "City Traffic",
        duration_label: Some("0:30"),
        thumbnail: "/busy-city-intersection.png",
        source: "Pexels",
    },
    LibraryItem {
        id: 4,
        kind: MediaKind::Image,
        title: "Abstract Pattern",
        duration_label: None,
        thumbnail: "/abstract-geometric-flow.png",
        source: "Pexels",
    },
    LibraryItem {
        id: 5,
        kind: MediaKind::Video,
        title: "Forest Walk",
        duration_label: Some("0:45"),
        thumbnail: "/forest-walk.png",
        source: "Pexels",
    },
    LibraryItem {
        id: 6,
        kind: MediaKind::Image,
        title: "Sunset Sky",
        duration_label: None,
        thumbnail: "/sunset-sky.png",
        source: "Pexels",
    },
];

/// Searchable view over the stock catalogue
#[derive(Debug, Clone, Default)]
pub struct MediaLibrary {
    pub query: String,
    pub category: Category,
}

impl MediaLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &'static [LibraryItem] {
        CATALOGUE
    }

    /// Items whose title contains the query (case-insensitive) and whose
    /// kind matches the category
    pub fn filtered(&self) -> Vec<&'static LibraryItem> {
        let query = self.query.to_lowercase();
        CATALOGUE
            .iter()
            .filter(|item| item.title.to_lowercase().contains(&query))
            .filter(|item| self.category.matches(item.kind))
            .collect()
    }

    pub fn find(&self, media_id: &MediaId) -> Option<&'static LibraryItem> {
        CATALOGUE.iter().find(|item| &item.media_id() == media_id)
    }
}
