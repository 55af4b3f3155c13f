//! Domain records returned by the BetaSeries API
//!
//! These structures mirror the JSON the service sends. Every field defaults
//! when absent or `null`, so a sparse payload decodes into zero values rather
//! than an error. Several counters are serialised by the service as strings
//! and are kept that way here.

use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Declares a record whose fields all fall back to their zero value.
macro_rules! record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$field_meta:meta])* pub $field:ident: $ty:ty, )*
        }
    ) => {
        $(#[$meta])*
        #[serde(default)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                #[serde(deserialize_with = "null_as_default")]
                pub $field: $ty,
            )*
        }
    };
}

record! {
    /// Per-season episode count as listed in `seasons_details`.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct SeasonDetails {
        pub number: u32,
        pub episodes: u32,
    }
}

record! {
    /// Aggregated ratings ("notes") of a show or an episode.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Notes {
        /// Number of members who rated
        pub total: u32,
        /// Average rating
        pub mean: f32,
        /// The authenticated member's own rating, 0 when unrated
        pub user: u32,
    }
}

record! {
    /// Artwork URLs of a show.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct ShowImages {
        pub show: String,
        pub banner: String,
        #[serde(rename = "box")]
        pub box_art: String,
        pub poster: String,
    }
}

record! {
    /// The authenticated member's relation to a show.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct ShowUserState {
        pub archived: bool,
        pub favorited: bool,
        /// Episodes left to watch
        pub remaining: u32,
        /// Viewing progress in percent
        pub status: f64,
        /// Code of the last seen episode, e.g. `S02E05`
        pub last: String,
        pub tags: String,
    }
}

record! {
    /// A television show.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Show {
        pub id: i64,
        pub thetvdb_id: i64,
        pub imdb_id: String,
        pub title: String,
        pub description: String,
        pub seasons: String,
        pub seasons_details: Vec<SeasonDetails>,
        pub episodes: String,
        pub followers: String,
        pub comments: String,
        pub similars: String,
        pub characters: String,
        pub creation: String,
        pub genres: Vec<String>,
        pub length: String,
        pub network: String,
        pub rating: String,
        pub status: String,
        pub language: String,
        pub notes: Notes,
        pub in_account: bool,
        pub images: ShowImages,
        pub aliases: Vec<String>,
        pub user: ShowUserState,
        pub resource_url: String,

        // Only filled by /episodes/list
        pub remaining: u32,
        pub unseen: Vec<Episode>,
    }
}

record! {
    /// A show recommended by a member as similar to another one.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Similar {
        pub id: i64,
        /// Login of the member who suggested the similarity
        pub login: String,
        pub login_id: i64,
        pub notes: String,
        pub show_title: String,
        pub show_id: i64,
        pub thetvdb_id: i64,
        /// Full record of the similar show, present when details were requested
        pub show: Show,
    }
}

record! {
    /// A character of a show and the actor playing it.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Character {
        pub id: i64,
        pub show_id: i64,
        pub name: String,
        pub role: String,
        pub actor: String,
        pub picture: String,
        pub description: String,
    }
}

record! {
    /// A video (trailer, recap, ...) linked to a show by a member.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Video {
        pub id: i64,
        pub show_id: i64,
        pub youtube_id: String,
        pub youtube_url: String,
        pub title: String,
        pub season: u32,
        pub episode: u32,
        pub login: String,
        pub login_id: i64,
    }
}

record! {
    /// Reference from an episode back to its show.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct EpisodeShow {
        pub id: i64,
        pub thetvdb_id: i64,
        pub title: String,
    }
}

record! {
    /// The authenticated member's viewing state for an episode.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct EpisodeUserState {
        pub seen: bool,
        pub downloaded: bool,
    }
}

record! {
    /// A single episode of a show.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Episode {
        pub id: i64,
        pub thetvdb_id: i64,
        pub youtube_id: String,
        pub title: String,
        pub season: u32,
        pub episode: u32,
        pub show: EpisodeShow,
        /// Episode code such as `S01E02`
        pub code: String,
        /// Absolute episode number across all seasons
        pub global: u32,
        pub special: u8,
        pub description: String,
        /// Air date, `YYYY-MM-DD`
        pub date: String,
        pub note: Notes,
        pub user: EpisodeUserState,
        pub comments: String,
        pub resource_url: String,
    }
}

record! {
    /// Member attached to an authentication token.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct TokenUser {
        pub id: i64,
        pub login: String,
        pub in_account: bool,
    }
}

record! {
    /// Result of a successful credential exchange.
    #[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Token {
        pub user: TokenUser,
        pub token: String,
        pub hash: String,
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}
