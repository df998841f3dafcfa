//! Last.fm request building.
//!
//! Builds and validates request URLs for the album and track lookup methods
//! used to collect the dataset. Sending the request, retries and rate
//! limiting are left to the caller.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::errors::{Result, TagGraphError};

/// Default Last.fm API endpoint.
pub const LASTFM_API_BASE: &str = "http://ws.audioscrobbler.com/2.0/";

/// Supported Last.fm API methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastFmMethod {
    /// `album.search`: album matches sorted by relevance.
    AlbumSearch,
    /// `album.getinfo`: metadata and tracklist for one album.
    AlbumGetInfo,
    /// `track.getinfo`: metadata for one track.
    TrackGetInfo,
}

impl LastFmMethod {
    /// Wire name of the method.
    pub fn as_str(self) -> &'static str {
        match self {
            LastFmMethod::AlbumSearch => "album.search",
            LastFmMethod::AlbumGetInfo => "album.getinfo",
            LastFmMethod::TrackGetInfo => "track.getinfo",
        }
    }

    fn allowed_args(self) -> &'static [&'static str] {
        match self {
            LastFmMethod::AlbumSearch => &["limit", "page", "album"],
            LastFmMethod::AlbumGetInfo => {
                &["artist", "album", "mbid", "autocorrect", "username", "lang"]
            }
            LastFmMethod::TrackGetInfo => &["mbid", "track", "artist", "username", "autocorrect"],
        }
    }

    fn validate(self, args: &[(&str, &str)]) -> Result<()> {
        let has = |key: &str| args.iter().any(|(k, _)| *k == key);

        for (key, _) in args {
            if !self.allowed_args().contains(key) {
                return Err(invalid(format!(
                    "'{key}' is not a valid argument for {}",
                    self.as_str()
                )));
            }
        }

        match self {
            LastFmMethod::AlbumSearch => {
                if !has("album") {
                    return Err(invalid("an album must be specified".into()));
                }
            }
            LastFmMethod::AlbumGetInfo => require_mbid_or_pair(has, "album")?,
            LastFmMethod::TrackGetInfo => require_mbid_or_pair(has, "track")?,
        }

        if let Some((_, value)) = args.iter().find(|(k, _)| *k == "autocorrect") {
            if !matches!(value.trim(), "0" | "1") {
                return Err(invalid("autocorrect must be either 0 or 1".into()));
            }
        }

        Ok(())
    }
}

/// `mbid` alone, or both `artist` and `item`, never a mix.
fn require_mbid_or_pair(has: impl Fn(&str) -> bool, item: &str) -> Result<()> {
    if has("mbid") {
        if has("artist") || has(item) {
            return Err(invalid(format!(
                "mbid was given together with artist or {item}; specify either mbid only, or both artist and {item}"
            )));
        }
    } else if !(has("artist") && has(item)) {
        return Err(invalid(format!(
            "neither mbid nor artist+{item} was specified"
        )));
    }
    Ok(())
}

fn invalid(msg: String) -> TagGraphError {
    TagGraphError::InvalidArgument(msg)
}

impl fmt::Display for LastFmMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LastFmMethod {
    type Err = TagGraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "album.search" => Ok(LastFmMethod::AlbumSearch),
            "album.getinfo" => Ok(LastFmMethod::AlbumGetInfo),
            "track.getinfo" => Ok(LastFmMethod::TrackGetInfo),
            other => Err(invalid(format!("unsupported Last.fm method '{other}'"))),
        }
    }
}

/// Builds request URLs for the Last.fm API.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: String,
    api_key: String,
    json: bool,
}

impl RequestBuilder {
    /// Builder against the public endpoint, requesting JSON responses.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: LASTFM_API_BASE.to_string(),
            api_key: api_key.into(),
            json: true,
        }
    }

    /// Point at a different endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Toggle the `format=json` parameter.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Validate `args` for `method` and build the request URL.
    ///
    /// Values are trimmed and percent-encoded.
    pub fn build(&self, method: LastFmMethod, args: &[(&str, &str)]) -> Result<Url> {
        method.validate(args)?;

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| TagGraphError::Config(format!("invalid base url '{}': {e}", self.base_url)))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("method", method.as_str());
            query.append_pair("api_key", &self.api_key);
            for (key, value) in args {
                query.append_pair(key, value.trim());
            }
            if self.json {
                query.append_pair("format", "json");
            }
        }

        tracing::debug!("Generated API request: {}", url);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> RequestBuilder {
        RequestBuilder::new("KEY")
    }

    #[test]
    fn test_album_info_request() {
        let url = builder()
            .build(
                LastFmMethod::AlbumGetInfo,
                &[("artist", " Black Sabbath "), ("album", "Paranoid")],
            )
            .unwrap();
        assert_eq!(url.host_str(), Some("ws.audioscrobbler.com"));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("method".to_string(), "album.getinfo".to_string()),
                ("api_key".to_string(), "KEY".to_string()),
                ("artist".to_string(), "Black Sabbath".to_string()),
                ("album".to_string(), "Paranoid".to_string()),
                ("format".to_string(), "json".to_string()),
            ]
        );
    }

    #[test]
    fn test_ampersand_is_encoded() {
        let url = builder()
            .build(LastFmMethod::AlbumSearch, &[("album", "Blood & Thunder")])
            .unwrap();
        assert!(url.as_str().contains("album=Blood+%26+Thunder"));
        assert!(!url.as_str().contains("Blood & "));
    }

    #[test]
    fn test_json_format_can_be_disabled() {
        let url = builder()
            .with_json(false)
            .build(LastFmMethod::TrackGetInfo, &[("mbid", "abc")])
            .unwrap();
        assert!(!url.as_str().contains("format="));
    }

    #[test]
    fn test_rejects_invalid_arguments() {
        let b = builder();
        let cases: Vec<(LastFmMethod, Vec<(&str, &str)>)> = vec![
            (LastFmMethod::AlbumSearch, vec![("limit", "10")]),
            (LastFmMethod::AlbumSearch, vec![("album", "x"), ("artist", "y")]),
            (LastFmMethod::AlbumGetInfo, vec![("mbid", "m"), ("artist", "a")]),
            (LastFmMethod::AlbumGetInfo, vec![("artist", "a")]),
            (LastFmMethod::TrackGetInfo, vec![("album", "a")]),
            (LastFmMethod::TrackGetInfo, vec![("mbid", "m"), ("track", "t")]),
            (
                LastFmMethod::TrackGetInfo,
                vec![("artist", "a"), ("track", "t"), ("autocorrect", "2")],
            ),
        ];
        for (method, args) in &cases {
            assert!(
                matches!(b.build(*method, args), Err(TagGraphError::InvalidArgument(_))),
                "accepted {method} {args:?}"
            );
        }
    }

    #[test]
    fn test_accepts_autocorrect_flag() {
        assert!(builder()
            .build(
                LastFmMethod::TrackGetInfo,
                &[("artist", "Dio"), ("track", "Holy Diver"), ("autocorrect", "1")],
            )
            .is_ok());
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("album.getInfo".parse::<LastFmMethod>().unwrap(), LastFmMethod::AlbumGetInfo);
        assert!("artist.search".parse::<LastFmMethod>().is_err());
    }

    #[test]
    fn test_bad_base_url_is_config_error() {
        let err = builder()
            .with_base_url("not a url")
            .build(LastFmMethod::AlbumSearch, &[("album", "x")])
            .unwrap_err();
        assert!(matches!(err, TagGraphError::Config(_)));
    }
}
