use serde::{Deserialize, Serialize};

/// Placeholder used when no singer could be extracted.
pub const UNKNOWN_SINGER: &str = "未知歌手";

/// Placeholder used when no duration could be extracted.
pub const DEFAULT_DURATION: &str = "--:--";

fn default_duration() -> String {
    DEFAULT_DURATION.to_string()
}

/// One ranked song on a chart.
///
/// `rank` is 1-based and contiguous within a snapshot. `duration` is
/// display-only and never compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub rank: u32,
    pub title: String,
    pub singer: String,
    #[serde(default = "default_duration")]
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Entry {
    pub fn new(rank: u32, title: impl Into<String>, singer: impl Into<String>) -> Self {
        Self {
            rank,
            title: title.into(),
            singer: singer.into(),
            duration: default_duration(),
            url: None,
        }
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = duration.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.url = if url.is_empty() { None } else { Some(url) };
        self
    }

    /// Key used to match the same song across snapshots.
    ///
    /// Plain `title + singer` concatenation: exact and case-sensitive, so a
    /// differently formatted listing of the same song counts as a new song.
    pub fn identity_key(&self) -> String {
        format!("{}{}", self.title, self.singer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_key_is_exact_concatenation() {
        let a = Entry::new(1, "Song", "Artist");
        let b = Entry::new(7, "Song", "Artist");
        let c = Entry::new(1, "song", "Artist");
        assert_eq!(a.identity_key(), "SongArtist");
        assert_eq!(a.identity_key(), b.identity_key());
        assert_ne!(a.identity_key(), c.identity_key());
    }

    #[test]
    fn test_missing_duration_and_url_default_on_read() {
        let entry: Entry =
            serde_json::from_str(r#"{"rank":3,"title":"T","singer":"S"}"#).unwrap();
        assert_eq!(entry.duration, DEFAULT_DURATION);
        assert_eq!(entry.url, None);
    }

    #[test]
    fn test_empty_url_is_dropped() {
        let entry = Entry::new(1, "T", "S").with_url("");
        assert_eq!(entry.url, None);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("url"));
    }
}
