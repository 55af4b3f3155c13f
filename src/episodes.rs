//! Operations on the `/episodes/*` endpoints

use crate::endpoint::{Endpoint, IdPolicy, Query};
use crate::envelope::{EpisodeEnvelope, ShowsEnvelope};
use crate::error::{BetaSeriesError, Result};
use crate::models::{Episode, Show};
use crate::session::Session;
use crate::transport::HttpMethod::{Delete, Get, Post};

const LIST: Endpoint = Endpoint::new(Get, "/episodes/list", IdPolicy::None);
const DOWNLOADED: Endpoint = Endpoint::new(Post, "/episodes/downloaded", IdPolicy::None);
const NOT_DOWNLOADED: Endpoint = Endpoint::new(Delete, "/episodes/downloaded", IdPolicy::None);

/// Filters for [`Session::episodes_list`].
///
/// Show identifiers here are filters, not a lookup: any combination may be
/// sent, each only when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodesListOptions {
    /// Only this BetaSeries show; sent when positive
    pub show_id: i64,
    /// Only this TheTVDB show; sent when positive
    pub thetvdb_id: i64,
    /// Only this IMDb show; sent when not empty
    pub imdb_id: String,
    /// Whose unseen episodes to list; the authenticated member when not positive
    pub user_id: i64,
    /// Maximum number of episodes per show
    pub limit: Option<i64>,
    /// Release filter; `Some(0)` is a meaningful value and is sent
    pub released: Option<i64>,
    /// Include subtitle information
    pub subtitles: bool,
    /// Include special episodes
    pub specials: bool,
}

impl Session {
    /// Lists unseen episodes, grouped by show.
    ///
    /// Each returned [`Show`] carries its pending episodes in `unseen` and
    /// their count in `remaining`.
    pub fn episodes_list(&self, options: &EpisodesListOptions) -> Result<Vec<Show>> {
        let mut query = Query::new();
        query
            .flag("specials", options.specials)
            .flag("subtitles", options.subtitles)
            .non_negative("released", options.released)
            .positive("showId", Some(options.show_id))
            .positive("showTheTVDBId", Some(options.thetvdb_id))
            .non_empty("showIMDBId", &options.imdb_id)
            .positive("limit", options.limit)
            .positive("userId", Some(options.user_id));

        self.call::<ShowsEnvelope>(&LIST, &query)
    }

    /// Marks the episode as downloaded.
    pub fn episode_downloaded(&self, id: i64) -> Result<Episode> {
        self.mark_downloaded(&DOWNLOADED, id)
    }

    /// Clears the episode's downloaded mark.
    pub fn episode_not_downloaded(&self, id: i64) -> Result<Episode> {
        self.mark_downloaded(&NOT_DOWNLOADED, id)
    }

    fn mark_downloaded(&self, endpoint: &Endpoint, id: i64) -> Result<Episode> {
        if id <= 0 {
            return Err(BetaSeriesError::IdNotSet);
        }
        let mut query = Query::new();
        query.set("id", id);

        self.call::<EpisodeEnvelope>(endpoint, &query)
    }
}
