//! betaseries - blocking client for the BetaSeries television metadata API
//!
//! This library authenticates a member, builds query URLs for the shows and
//! episodes endpoints, performs the HTTP calls and decodes the JSON envelopes
//! into typed records. Service-reported errors, empty results and local
//! validation failures all surface as [`BetaSeriesError`] values.
//!
//! # Examples
//!
//! ```no_run
//! use betaseries::{ClientConfig, Session, ShowLookup};
//!
//! let config = ClientConfig::new("my-api-key").with_credentials("member", "secret");
//! let session = Session::authenticate(&config)?;
//!
//! let shows = session.shows_search("lost", "title", false)?;
//! let characters = session.shows_characters(&ShowLookup::by_id(shows[0].id))?;
//! println!("{} has {} characters", shows[0].title, characters.len());
//! # Ok::<(), betaseries::BetaSeriesError>(())
//! ```

mod config;
mod endpoint;
mod envelope;
mod episodes;
mod error;
mod models;
mod session;
mod shows;
mod transport;

#[cfg(test)]
mod testing;

pub use config::{ClientConfig, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
pub use endpoint::ShowLookup;
pub use envelope::ApiErrorEntry;
pub use episodes::EpisodesListOptions;
pub use error::{BetaSeriesError, Result};
pub use models::{
    Character, Episode, EpisodeShow, EpisodeUserState, Notes, SeasonDetails, Show, ShowImages,
    ShowUserState, Similar, Token, TokenUser, Video,
};
pub use session::Session;
pub use shows::{
    LIST_ORDERS, NOTE_RANGE, SEARCH_ORDERS, SEARCH_PAGE_SIZE, ShowEpisodesOptions,
    ShowsListOptions,
};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError,
};
