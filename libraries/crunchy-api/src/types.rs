//! Types for Crunchyroll API requests and responses.

use crate::error::{ClientError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Request Enums
// =============================================================================

/// Kind of catalogue object addressed by `info` and `list_media`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Media,
    Collection,
    Series,
}

impl ObjectType {
    pub const ALL: [ObjectType; 3] = [ObjectType::Media, ObjectType::Collection, ObjectType::Series];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Media => "media",
            ObjectType::Collection => "collection",
            ObjectType::Series => "series",
        }
    }

    /// Payload key carrying the object id.
    pub fn id_key(&self) -> &'static str {
        match self {
            ObjectType::Media => "media_id",
            ObjectType::Collection => "collection_id",
            ObjectType::Series => "series_id",
        }
    }
}

impl FromStr for ObjectType {
    type Err = ClientError;

    /// Accepts both the bare kind (`series`) and the payload key (`series_id`).
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "media" | "media_id" => Ok(ObjectType::Media),
            "collection" | "collection_id" => Ok(ObjectType::Collection),
            "series" | "series_id" => Ok(ObjectType::Series),
            other => Err(ClientError::UnknownVariant {
                kind: "object type",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media type selector for the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Anime,
    Drama,
    AnimeDrama,
}

impl MediaType {
    pub const ALL: [MediaType; 3] = [MediaType::Anime, MediaType::Drama, MediaType::AnimeDrama];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Anime => "anime",
            MediaType::Drama => "drama",
            MediaType::AnimeDrama => "anime|drama",
        }
    }
}

impl FromStr for MediaType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "anime" => Ok(MediaType::Anime),
            "drama" => Ok(MediaType::Drama),
            "anime|drama" => Ok(MediaType::AnimeDrama),
            other => Err(ClientError::UnknownVariant {
                kind: "media type",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering of `list_media` results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    #[default]
    Asc,
    Desc,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Asc => "asc",
            SortMode::Desc => "desc",
        }
    }
}

impl FromStr for SortMode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(SortMode::Asc),
            "desc" => Ok(SortMode::Desc),
            other => Err(ClientError::UnknownVariant {
                kind: "sort mode",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declares [`Field`] together with its wire table.
macro_rules! fields {
    ($($variant:ident => $wire:literal,)+) => {
        /// Projectable field of a queue or media listing.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Field {
            $($variant,)+
        }

        impl Field {
            pub const ALL: &'static [Field] = &[$(Field::$variant,)+];

            /// Dotted wire name, e.g. `media.media_id`.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Field::$variant => $wire,)+
                }
            }
        }

        impl FromStr for Field {
            type Err = ClientError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($wire => Ok(Field::$variant),)+
                    other => Err(ClientError::UnknownVariant {
                        kind: "field",
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

fields! {
    ImageFullUrl => "image.full_url",
    ImageFwideUrl => "image.fwide_url",
    ImageFwidestarUrl => "image.fwidestar_url",
    ImageHeight => "image.height",
    ImageLargeUrl => "image.large_url",
    ImageMediumUrl => "image.medium_url",
    ImageSmallUrl => "image.small_url",
    ImageThumbUrl => "image.thumb_url",
    ImageWideUrl => "image.wide_url",
    ImageWidestarUrl => "image.widestar_url",
    ImageWidth => "image.width",
    MediaAvailabilityNotes => "media.availability_notes",
    MediaAvailable => "media.available",
    MediaAvailableTime => "media.available_time",
    MediaBifUrl => "media.bif_url",
    MediaClass => "media.class",
    MediaClip => "media.clip",
    MediaCollectionId => "media.collection_id",
    MediaCollectionName => "media.collection_name",
    MediaCreated => "media.created",
    MediaDescription => "media.description",
    MediaDuration => "media.duration",
    MediaEpisodeNumber => "media.episode_number",
    MediaFreeAvailable => "media.free_available",
    MediaFreeAvailableTime => "media.free_available_time",
    MediaFreeUnavailableTime => "media.free_unavailable_time",
    MediaMediaId => "media.media_id",
    MediaMediaType => "media.media_type",
    MediaName => "media.name",
    MediaPlayhead => "media.playhead",
    MediaPremiumAvailable => "media.premium_available",
    MediaPremiumAvailableTime => "media.premium_available_time",
    MediaPremiumOnly => "media.premium_only",
    MediaPremiumUnavailableTime => "media.premium_unavailable_time",
    MediaScreenshotImage => "media.screenshot_image",
    MediaSeriesId => "media.series_id",
    MediaSeriesName => "media.series_name",
    MediaStreamData => "media.stream_data",
    MediaUnavailableTime => "media.unavailable_time",
    MediaUrl => "media.url",
    LastWatchedMedia => "last_watched_media",
    LastWatchedMediaPlayhead => "last_watched_media_playhead",
    MostLikelyMedia => "most_likely_media",
    MostLikelyMediaPlayhead => "most_likely_media_playhead",
    Ordering => "ordering",
    Playhead => "playhead",
    QueueEntryId => "queue_entry_id",
    Series => "series",
    SeriesClass => "series.class",
    SeriesCollectionCount => "series.collection_count",
    SeriesDescription => "series.description",
    SeriesGenres => "series.genres",
    SeriesInQueue => "series.in_queue",
    SeriesLandscapeImage => "series.landscape_image",
    SeriesMediaCount => "series.media_count",
    SeriesMediaType => "series.media_type",
    SeriesName => "series.name",
    SeriesPortraitImage => "series.portrait_image",
    SeriesPublisherName => "series.publisher_name",
    SeriesRating => "series.rating",
    SeriesSeriesId => "series.series_id",
    SeriesUrl => "series.url",
    SeriesYear => "series.year",
}

impl Field {
    /// Joins fields into the comma separated form the API expects.
    pub fn join(fields: &[Field]) -> String {
        fields
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional parameters of `list_media`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListMediaOptions {
    pub sort: SortMode,
    pub offset: u32,
    /// Page size; the server default applies when unset
    pub limit: Option<u32>,
    /// Overrides the client locale for this call
    pub locale: Option<String>,
}

impl ListMediaOptions {
    pub fn sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

// =============================================================================
// Response Envelope
// =============================================================================

/// Envelope wrapping every API response.
///
/// A failed call still decodes into this type with `error` set; callers must
/// check [`ApiResponse::is_error`] after every call.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiResponse {
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub error: bool,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ApiResponse {
    pub fn is_error(&self) -> bool {
        self.error
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Looks up a string member of `data`.
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data.as_ref()?.get(key)?.as_str()
    }

    /// Converts an error envelope into [`ClientError::Api`].
    pub fn into_result(self, method: &str) -> Result<Value> {
        if self.error {
            return Err(ClientError::Api {
                method: method.to_string(),
                code: self.code.unwrap_or_else(|| "unknown".to_string()),
                message: self.message.unwrap_or_default(),
            });
        }
        Ok(self.data.unwrap_or(Value::Null))
    }

    pub(crate) fn describe(&self) -> String {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => format!("{}: {}", code, message),
            (Some(code), None) => code.clone(),
            (None, Some(message)) => message.clone(),
            (None, None) => "no details".to_string(),
        }
    }
}

/// Accepts booleans, numbers and strings for the `error` flag.
fn deserialize_truthy<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !(s.is_empty() || s == "false" || s == "0"),
        Value::Null => false,
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    })
}
