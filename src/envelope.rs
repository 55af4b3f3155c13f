//! Response envelopes and the decoding pipeline
//!
//! Every BetaSeries response is a JSON object holding one named field (a
//! record or a collection) next to an `errors` array. An envelope type exists
//! per field name; [`decode`] turns a consumed [`HttpResponse`] into the
//! envelope's payload and enforces the post-conditions:
//!
//! 1. reported errors win over any data that came with them,
//! 2. collections must not be empty,
//! 3. single-item payloads must be present.

use crate::error::{BetaSeriesError, Result};
use crate::models::{Character, Episode, Show, Similar, Token, Video, null_as_default};
use crate::transport::HttpResponse;
use serde::{Deserialize, Serialize};

/// One `{code, text}` entry of an envelope's `errors` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiErrorEntry {
    pub code: i64,
    pub text: String,
}

/// A decodable response shape.
pub(crate) trait Envelope: for<'de> Deserialize<'de> {
    type Payload;

    /// Removes and returns the reported errors.
    fn take_errors(&mut self) -> Vec<ApiErrorEntry>;

    /// Unwraps the payload, checking that there is something to return.
    fn into_payload(self, endpoint: &'static str) -> Result<Self::Payload>;
}

macro_rules! collection_envelope {
    ($name:ident, $field:ident, $item:ty, $empty:expr) => {
        #[derive(Debug, Deserialize)]
        pub(crate) struct $name {
            #[serde(default, deserialize_with = "null_as_default")]
            $field: Vec<$item>,
            #[serde(default, deserialize_with = "null_as_default")]
            errors: Vec<ApiErrorEntry>,
        }

        impl Envelope for $name {
            type Payload = Vec<$item>;

            fn take_errors(&mut self) -> Vec<ApiErrorEntry> {
                std::mem::take(&mut self.errors)
            }

            fn into_payload(self, _endpoint: &'static str) -> Result<Self::Payload> {
                if self.$field.is_empty() {
                    return Err($empty);
                }
                Ok(self.$field)
            }
        }
    };
}

macro_rules! item_envelope {
    ($name:ident, $field:ident, $item:ty) => {
        #[derive(Debug, Deserialize)]
        pub(crate) struct $name {
            #[serde(default)]
            $field: Option<$item>,
            #[serde(default, deserialize_with = "null_as_default")]
            errors: Vec<ApiErrorEntry>,
        }

        impl Envelope for $name {
            type Payload = $item;

            fn take_errors(&mut self) -> Vec<ApiErrorEntry> {
                std::mem::take(&mut self.errors)
            }

            fn into_payload(self, endpoint: &'static str) -> Result<Self::Payload> {
                self.$field
                    .ok_or(BetaSeriesError::MissingPayload { endpoint })
            }
        }
    };
}

collection_envelope!(ShowsEnvelope, shows, Show, BetaSeriesError::NoShowsFound);
collection_envelope!(SimilarsEnvelope, similars, Similar, BetaSeriesError::NoShowsFound);
collection_envelope!(
    CharactersEnvelope,
    characters,
    Character,
    BetaSeriesError::NoCharactersFound
);
collection_envelope!(VideosEnvelope, videos, Video, BetaSeriesError::NoVideosFound);
collection_envelope!(
    EpisodesEnvelope,
    episodes,
    Episode,
    BetaSeriesError::NoEpisodesFound
);

item_envelope!(ShowEnvelope, show, Show);
item_envelope!(EpisodeEnvelope, episode, Episode);

/// Body of `/members/auth`: the token fields sit at the top level.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenEnvelope {
    #[serde(flatten)]
    token: Token,
    #[serde(default, deserialize_with = "null_as_default")]
    errors: Vec<ApiErrorEntry>,
}

impl Envelope for TokenEnvelope {
    type Payload = Token;

    fn take_errors(&mut self) -> Vec<ApiErrorEntry> {
        std::mem::take(&mut self.errors)
    }

    fn into_payload(self, endpoint: &'static str) -> Result<Token> {
        if self.token.token.is_empty() {
            return Err(BetaSeriesError::MissingPayload { endpoint });
        }
        Ok(self.token)
    }
}

/// Shape of an error-only body, as sent with non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    errors: Vec<ApiErrorEntry>,
}

/// Parses the error list out of a body.
///
/// A body that is not JSON is reported as a malformed response, never as a
/// panic.
pub(crate) fn error_entries(endpoint: &'static str, body: &str) -> Result<Vec<ApiErrorEntry>> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.errors)
        .map_err(|source| BetaSeriesError::MalformedResponse { endpoint, source })
}

/// Decodes a response into the payload of envelope `E`.
///
/// The response is taken by value and dropped on every exit path.
pub(crate) fn decode<E: Envelope>(endpoint: &'static str, response: HttpResponse) -> Result<E::Payload> {
    if !response.is_success() {
        let errors = error_entries(endpoint, &response.body)?;
        if errors.is_empty() {
            return Err(BetaSeriesError::UnexpectedStatus {
                status: response.status,
                body: response.body,
            });
        }
        return Err(BetaSeriesError::Service { errors });
    }

    let mut envelope: E = serde_json::from_str(&response.body)
        .map_err(|source| BetaSeriesError::MalformedResponse { endpoint, source })?;

    let errors = envelope.take_errors();
    if !errors.is_empty() {
        return Err(BetaSeriesError::Service { errors });
    }

    envelope.into_payload(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Notes, ShowUserState};

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_reported_errors_win_over_data() {
        let body = r#"{
            "shows": [{"id": 1, "title": "Lost"}],
            "errors": [{"code": 4001, "text": "Show not found"}, {"code": 1001, "text": "Bad key"}]
        }"#;

        let err = decode::<ShowsEnvelope>("/shows/search", ok(body)).unwrap_err();
        match err {
            BetaSeriesError::Service { errors } => {
                assert_eq!(
                    errors,
                    vec![
                        ApiErrorEntry {
                            code: 4001,
                            text: "Show not found".to_string()
                        },
                        ApiErrorEntry {
                            code: 1001,
                            text: "Bad key".to_string()
                        },
                    ]
                );
            }
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_collections_map_to_their_own_error() {
        let err = decode::<ShowsEnvelope>("/shows/list", ok(r#"{"shows":[],"errors":[]}"#)).unwrap_err();
        assert!(matches!(err, BetaSeriesError::NoShowsFound));

        let err = decode::<CharactersEnvelope>("/shows/characters", ok(r#"{"characters":[],"errors":[]}"#))
            .unwrap_err();
        assert!(matches!(err, BetaSeriesError::NoCharactersFound));

        let err = decode::<VideosEnvelope>("/shows/videos", ok(r#"{"videos":[],"errors":[]}"#)).unwrap_err();
        assert!(matches!(err, BetaSeriesError::NoVideosFound));

        let err = decode::<EpisodesEnvelope>("/shows/episodes", ok(r#"{"episodes":null,"errors":[]}"#))
            .unwrap_err();
        assert!(matches!(err, BetaSeriesError::NoEpisodesFound));

        let err = decode::<SimilarsEnvelope>("/shows/similars", ok(r#"{"errors":[]}"#)).unwrap_err();
        assert!(matches!(err, BetaSeriesError::NoShowsFound));
    }

    #[test]
    fn test_items_keep_their_order() {
        let body = r#"{"shows":[{"id":3},{"id":1},{"id":2}],"errors":[]}"#;
        let shows = decode::<ShowsEnvelope>("/shows/random", ok(body)).unwrap();
        let ids: Vec<i64> = shows.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_null_fields_inside_records_decode_as_zero_values() {
        let body = r#"{"shows":[{"id":1,"title":"Lost","imdb_id":null,"description":null}],"errors":[]}"#;
        let shows = decode::<ShowsEnvelope>("/shows/search", ok(body)).unwrap();
        assert_eq!(shows[0].title, "Lost");
        assert!(shows[0].imdb_id.is_empty());
        assert!(shows[0].description.is_empty());

        let body = r#"{"show":{"id":1,"user":null,"notes":null},"errors":[]}"#;
        let show = decode::<ShowEnvelope>("/shows/display", ok(body)).unwrap();
        assert_eq!(show.id, 1);
        assert_eq!(show.user, ShowUserState::default());
        assert_eq!(show.notes, Notes::default());
    }

    #[test]
    fn test_malformed_body() {
        let err = decode::<ShowsEnvelope>("/shows/search", ok("<html>oops</html>")).unwrap_err();
        assert!(matches!(
            err,
            BetaSeriesError::MalformedResponse {
                endpoint: "/shows/search",
                ..
            }
        ));
    }

    #[test]
    fn test_absent_single_item_is_missing_payload() {
        let err = decode::<ShowEnvelope>("/shows/display", ok(r#"{"show":null,"errors":[]}"#)).unwrap_err();
        assert!(matches!(
            err,
            BetaSeriesError::MissingPayload {
                endpoint: "/shows/display"
            }
        ));

        let episode = decode::<EpisodeEnvelope>(
            "/episodes/downloaded",
            ok(r#"{"episode":{"id":9,"user":{"downloaded":true}},"errors":[]}"#),
        )
        .unwrap();
        assert_eq!(episode.id, 9);
        assert!(episode.user.downloaded);
    }

    #[test]
    fn test_error_status_with_error_list() {
        let response = HttpResponse {
            status: 400,
            body: r#"{"errors":[{"code":2001,"text":"Invalid token."}]}"#.to_string(),
        };
        let err = decode::<ShowEnvelope>("/shows/show", response).unwrap_err();
        assert_eq!(err.api_errors()[0].code, 2001);
    }

    #[test]
    fn test_error_status_without_error_list() {
        let response = HttpResponse {
            status: 503,
            body: r#"{"errors":[]}"#.to_string(),
        };
        let err = decode::<ShowEnvelope>("/shows/show", response).unwrap_err();
        assert!(matches!(err, BetaSeriesError::UnexpectedStatus { status: 503, .. }));
    }

    #[test]
    fn test_unparsable_error_body_is_a_decode_error() {
        let response = HttpResponse {
            status: 502,
            body: "Bad Gateway".to_string(),
        };
        let err = decode::<ShowsEnvelope>("/shows/list", response).unwrap_err();
        assert!(matches!(err, BetaSeriesError::MalformedResponse { .. }));
    }

    #[test]
    fn test_token_envelope() {
        let body = r#"{"user":{"id":7,"login":"member","in_account":true},"token":"abc","hash":"h","errors":[]}"#;
        let token = decode::<TokenEnvelope>("/members/auth", ok(body)).unwrap();
        assert_eq!(token.token, "abc");
        assert_eq!(token.user.login, "member");
    }
}
