//! Operations on the `/shows/*` endpoints

use crate::endpoint::{Endpoint, IdPolicy, Query, ShowLookup};
use crate::envelope::{
    CharactersEnvelope, EpisodesEnvelope, ShowEnvelope, ShowsEnvelope, SimilarsEnvelope,
    VideosEnvelope,
};
use crate::error::{BetaSeriesError, Result};
use crate::models::{Character, Episode, Show, Similar, Video};
use crate::session::Session;
use crate::transport::HttpMethod::{Delete, Get, Post};

const SEARCH: Endpoint = Endpoint::new(Get, "/shows/search", IdPolicy::None);
const RANDOM: Endpoint = Endpoint::new(Get, "/shows/random", IdPolicy::None);
const FAVORITES: Endpoint = Endpoint::new(Get, "/shows/favorites", IdPolicy::None);
const FAVORITE_ADD: Endpoint = Endpoint::new(Post, "/shows/favorite", IdPolicy::LocalOrTvdb);
const FAVORITE_REMOVE: Endpoint = Endpoint::new(Delete, "/shows/favorite", IdPolicy::LocalOrTvdb);
const SIMILARS: Endpoint = Endpoint::new(Get, "/shows/similars", IdPolicy::LocalOrTvdb);
const CHARACTERS: Endpoint = Endpoint::new(Get, "/shows/characters", IdPolicy::LocalOrTvdb);
const LIST: Endpoint = Endpoint::new(Get, "/shows/list", IdPolicy::None);
const DISPLAY: Endpoint = Endpoint::new(Get, "/shows/display", IdPolicy::LocalTvdbOrImdb);
const SHOW_ADD: Endpoint = Endpoint::new(Post, "/shows/show", IdPolicy::LocalTvdbOrImdb);
const SHOW_REMOVE: Endpoint = Endpoint::new(Delete, "/shows/show", IdPolicy::LocalTvdbOrImdb);
const ARCHIVE: Endpoint = Endpoint::new(Post, "/shows/archive", IdPolicy::LocalOrTvdb);
const UNARCHIVE: Endpoint = Endpoint::new(Delete, "/shows/archive", IdPolicy::LocalOrTvdb);
const NOTE: Endpoint = Endpoint::new(Post, "/shows/note", IdPolicy::LocalOrTvdb);
const NOTE_REMOVE: Endpoint = Endpoint::new(Delete, "/shows/note", IdPolicy::LocalOrTvdb);
const VIDEOS: Endpoint = Endpoint::new(Get, "/shows/videos", IdPolicy::Exclusive);
const EPISODES: Endpoint = Endpoint::new(Get, "/shows/episodes", IdPolicy::LocalOrTvdb);

/// Page size requested by [`Session::shows_search`]
pub const SEARCH_PAGE_SIZE: u32 = 100;

/// Accepted `order` values for searches; anything else means `popularity`.
pub const SEARCH_ORDERS: &[&str] = &["title", "popularity", "followers"];

/// Accepted `order` values for listings; anything else means `popularity`.
pub const LIST_ORDERS: &[&str] = &["alphabetical", "popularity", "followers"];

const DEFAULT_ORDER: &str = "popularity";

/// Accepted range for show ratings.
pub const NOTE_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

/// Filters for [`Session::shows_list`]. Empty strings and `None` are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowsListOptions {
    /// Only shows added since this UNIX timestamp
    pub since: String,
    /// Only shows whose title starts with this string
    pub starting: String,
    /// `alphabetical`, `popularity` or `followers`
    pub order: String,
    /// Show ID to begin the listing with; sent only when positive
    pub start: Option<i64>,
    /// Maximum number of shows; sent only when positive
    pub limit: Option<i64>,
}

/// Filters for [`Session::shows_episodes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowEpisodesOptions {
    /// Restrict to one season; sent only when positive
    pub season: Option<i64>,
    /// Restrict to one episode of `season`; ignored without a season
    pub episode: Option<i64>,
    /// Include subtitle information
    pub subtitles: bool,
}

impl Session {
    /// Searches shows by title.
    ///
    /// The query is lower-cased and at most [`SEARCH_PAGE_SIZE`] results are
    /// requested. An `order` outside [`SEARCH_ORDERS`] falls back to
    /// `popularity`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use betaseries::{ClientConfig, Session};
    /// let session = Session::authenticate(&ClientConfig::new("my-api-key")).unwrap();
    /// for show in session.shows_search("Lost", "title", false).unwrap() {
    ///     println!("{} ({})", show.title, show.id);
    /// }
    /// ```
    pub fn shows_search(&self, title: &str, order: &str, summary: bool) -> Result<Vec<Show>> {
        let mut query = Query::new();
        query
            .set("title", title.to_lowercase())
            .set("nbpp", SEARCH_PAGE_SIZE)
            .choice("order", order, SEARCH_ORDERS, DEFAULT_ORDER)
            .flag("summary", summary);

        self.call::<ShowsEnvelope>(&SEARCH, &query)
    }

    /// Returns up to `count` random shows.
    pub fn shows_random(&self, count: Option<i64>, summary: bool) -> Result<Vec<Show>> {
        let mut query = Query::new();
        query.positive("nb", count).flag("summary", summary);

        self.call::<ShowsEnvelope>(&RANDOM, &query)
    }

    /// Lists a member's favorite shows; the authenticated member when
    /// `user_id` is not positive.
    pub fn shows_favorites(&self, user_id: i64) -> Result<Vec<Show>> {
        let mut query = Query::new();
        query.positive("id", Some(user_id));

        self.call::<ShowsEnvelope>(&FAVORITES, &query)
    }

    /// Marks the show as favorite.
    pub fn show_favorite(&self, id: i64) -> Result<Show> {
        self.single_show(&FAVORITE_ADD, &ShowLookup::by_id(id), None)
    }

    /// Removes the show from the favorites.
    pub fn show_favorite_remove(&self, id: i64) -> Result<Show> {
        self.single_show(&FAVORITE_REMOVE, &ShowLookup::by_id(id), None)
    }

    /// Lists shows members consider similar to the given one.
    pub fn shows_similars(&self, lookup: &ShowLookup, details: bool) -> Result<Vec<Similar>> {
        let mut query = SIMILARS.query_for(lookup)?;
        query.flag("details", details);

        self.call::<SimilarsEnvelope>(&SIMILARS, &query)
    }

    /// Lists the characters of a show with the actors playing them.
    pub fn shows_characters(&self, lookup: &ShowLookup) -> Result<Vec<Character>> {
        let query = CHARACTERS.query_for(lookup)?;
        self.call::<CharactersEnvelope>(&CHARACTERS, &query)
    }

    /// Lists shows, optionally narrowed by `options`.
    pub fn shows_list(&self, options: &ShowsListOptions) -> Result<Vec<Show>> {
        let mut query = Query::new();
        query
            .choice("order", &options.order, LIST_ORDERS, DEFAULT_ORDER)
            .non_empty("since", &options.since)
            .non_empty("starting", &options.starting)
            .positive("start", options.start)
            .positive("limit", options.limit);

        self.call::<ShowsEnvelope>(&LIST, &query)
    }

    /// Fetches a show as seen from the member's account.
    pub fn show_display(&self, lookup: &ShowLookup) -> Result<Show> {
        self.single_show(&DISPLAY, lookup, None)
    }

    /// Adds the show to the member's account.
    ///
    /// With a positive `last_episode_id`, every episode up to that one is
    /// marked as watched.
    pub fn show_add(&self, lookup: &ShowLookup, last_episode_id: Option<i64>) -> Result<Show> {
        self.single_show(&SHOW_ADD, lookup, Some(("episode_id", last_episode_id)))
    }

    /// Removes the show from the member's account.
    pub fn show_remove(&self, lookup: &ShowLookup) -> Result<Show> {
        self.single_show(&SHOW_REMOVE, lookup, None)
    }

    /// Archives the show in the member's account.
    pub fn show_archive(&self, lookup: &ShowLookup) -> Result<Show> {
        self.single_show(&ARCHIVE, lookup, None)
    }

    /// Takes the show back out of the archive.
    pub fn show_not_archive(&self, lookup: &ShowLookup) -> Result<Show> {
        self.single_show(&UNARCHIVE, lookup, None)
    }

    /// Rates the show. `note` must lie within [`NOTE_RANGE`]; anything else
    /// fails without contacting the service.
    pub fn show_note(&self, lookup: &ShowLookup, note: i32) -> Result<Show> {
        if !NOTE_RANGE.contains(&note) {
            return Err(BetaSeriesError::InvalidNote { note });
        }
        self.single_show(&NOTE, lookup, Some(("note", Some(i64::from(note)))))
    }

    /// Deletes the member's rating of the show.
    pub fn show_note_remove(&self, lookup: &ShowLookup) -> Result<Show> {
        self.single_show(&NOTE_REMOVE, lookup, None)
    }

    /// Lists videos members attached to a show.
    ///
    /// Exactly one of `id` and `thetvdb_id` must be positive.
    pub fn shows_videos(&self, id: i64, thetvdb_id: i64) -> Result<Vec<Video>> {
        let query = VIDEOS.query_for(&ShowLookup::new(id, thetvdb_id, ""))?;
        self.call::<VideosEnvelope>(&VIDEOS, &query)
    }

    /// Lists the episodes of a show.
    pub fn shows_episodes(&self, lookup: &ShowLookup, options: &ShowEpisodesOptions) -> Result<Vec<Episode>> {
        let mut query = EPISODES.query_for(lookup)?;
        if options.season.is_some_and(|s| s > 0) {
            query
                .positive("season", options.season)
                .positive("episode", options.episode);
        }
        query.flag("subtitles", options.subtitles);

        self.call::<EpisodesEnvelope>(&EPISODES, &query)
    }

    /// Shared path of every single-show operation.
    fn single_show(
        &self,
        endpoint: &Endpoint,
        lookup: &ShowLookup,
        option: Option<(&str, Option<i64>)>,
    ) -> Result<Show> {
        let mut query = endpoint.query_for(lookup)?;
        if let Some((key, value)) = option {
            query.positive(key, value);
        }

        self.call::<ShowEnvelope>(endpoint, &query)
    }
}
