//! Place lookup for the catalog editor.
//!
//! The `PlaceLookup` trait abstracts the third-party place directory so the
//! editor can be driven by a canned implementation in tests. The HTTP
//! implementation talks to the Google Places web service: a text search
//! resolving a place id, then a details request for the fields the catalog
//! stores. Maps share links are turned back into a searchable place name
//! first, following redirects when the link is shortened.

use async_trait::async_trait;
use geo::Coord;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use nearbite_core::{PriceTier, Restaurant};

use crate::record::PeriodRecord;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Errors from [`PlaceLookup::lookup`].
#[derive(Debug, Error)]
pub enum PlaceLookupError {
    /// The HTTP request itself failed.
    #[error("place lookup request failed")]
    Transport(#[source] reqwest::Error),
    /// The directory returned no candidate for the query.
    #[error("no place matched {query:?}")]
    NotFound {
        /// The search text that produced no results.
        query: String,
    },
    /// The directory answered with a non-OK status code of its own.
    #[error("place lookup returned status {status:?}")]
    Status {
        /// The service-level status string, e.g. `"OVER_QUERY_LIMIT"`.
        status: String,
    },
}

/// Everything the editor needs to append a catalog record.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetails {
    /// Resolved display name.
    pub name: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Aggregate rating, when the listing has one.
    pub rating: Option<f32>,
    /// Price level as reported by the directory, when present.
    pub price_level: Option<u8>,
    /// Canonical maps URL for the listing.
    pub url: String,
    /// Raw weekly opening periods.
    pub periods: Vec<PeriodRecord>,
}

impl PlaceDetails {
    /// Build the catalog record for this place.
    ///
    /// A missing price level defaults to the middle bracket and reported
    /// levels are clamped into `1..=3`; undecodable opening periods are
    /// skipped with a warning.
    pub fn to_restaurant(&self, id: u64, cuisine: &str) -> Restaurant {
        let price = PriceTier::try_from(self.price_level.unwrap_or(2).clamp(1, 3))
            .unwrap_or(PriceTier::Moderate);
        let mut hours = Vec::with_capacity(self.periods.len());
        for raw in &self.periods {
            match raw.classify() {
                Ok(period) => hours.push(period),
                Err(error) => {
                    log::warn!("place {:?}: skipping opening period: {error}", self.name);
                }
            }
        }
        Restaurant::new(
            id,
            self.name.clone(),
            cuisine,
            Coord {
                x: self.longitude,
                y: self.latitude,
            },
        )
        .with_price(price)
        .with_rating(self.rating.unwrap_or(0.0))
        .with_maps_url(self.url.clone())
        .with_hours(hours)
    }
}

/// Resolve a place from free text or a maps URL.
#[async_trait(?Send)]
pub trait PlaceLookup {
    /// Look up the place best matching `input`.
    ///
    /// # Errors
    /// Returns [`PlaceLookupError`] when no candidate matches or the
    /// directory cannot be reached.
    async fn lookup(&self, input: &str) -> Result<PlaceDetails, PlaceLookupError>;
}

/// HTTP implementation of [`PlaceLookup`] backed by the Google Places API.
#[derive(Debug)]
pub struct GooglePlaces {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GooglePlaces {
    /// Construct a client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    /// Override the service base URL; used by tests.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Turn the raw input into a text query: extract the place name from a
    /// maps URL (following redirects for shortened links), or fall back to
    /// the input itself.
    async fn resolve_query(&self, input: &str) -> String {
        if let Some(name) = place_name_from_url(input) {
            return name;
        }
        if input.starts_with("http") {
            if let Ok(response) = self.client.head(input).send().await {
                if let Some(name) = place_name_from_url(response.url().as_str()) {
                    return name;
                }
            }
        }
        input.to_owned()
    }

    async fn find_place_id(&self, query: &str) -> Result<String, PlaceLookupError> {
        let url = format!("{}/findplacefromtext/json", self.base_url);
        let response: FindPlaceResponse = self
            .client
            .get(&url)
            .query(&[
                ("input", query),
                ("inputtype", "textquery"),
                ("fields", "place_id"),
                ("key", &self.api_key),
            ])
            .send()
            .await
            .map_err(PlaceLookupError::Transport)?
            .error_for_status()
            .map_err(PlaceLookupError::Transport)?
            .json()
            .await
            .map_err(PlaceLookupError::Transport)?;

        if response.status != "OK" {
            return Err(status_error(response.status, query));
        }
        response
            .candidates
            .into_iter()
            .next()
            .map(|candidate| candidate.place_id)
            .ok_or_else(|| PlaceLookupError::NotFound {
                query: query.to_owned(),
            })
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceResult, PlaceLookupError> {
        let url = format!("{}/details/json", self.base_url);
        let response: DetailsResponse = self
            .client
            .get(&url)
            .query(&[
                ("place_id", place_id),
                (
                    "fields",
                    "name,rating,geometry,price_level,url,opening_hours",
                ),
                ("key", &self.api_key),
            ])
            .send()
            .await
            .map_err(PlaceLookupError::Transport)?
            .error_for_status()
            .map_err(PlaceLookupError::Transport)?
            .json()
            .await
            .map_err(PlaceLookupError::Transport)?;

        if response.status != "OK" {
            return Err(status_error(response.status, place_id));
        }
        response.result.ok_or_else(|| PlaceLookupError::NotFound {
            query: place_id.to_owned(),
        })
    }
}

#[async_trait(?Send)]
impl PlaceLookup for GooglePlaces {
    async fn lookup(&self, input: &str) -> Result<PlaceDetails, PlaceLookupError> {
        let query = self.resolve_query(input).await;
        let place_id = self.find_place_id(&query).await?;
        let result = self.place_details(&place_id).await?;
        Ok(PlaceDetails {
            name: result.name,
            latitude: result.geometry.location.lat,
            longitude: result.geometry.location.lng,
            rating: result.rating,
            price_level: result.price_level,
            url: result.url,
            periods: result
                .opening_hours
                .map(|hours| hours.periods)
                .unwrap_or_default(),
        })
    }
}

fn status_error(status: String, query: &str) -> PlaceLookupError {
    if status == "ZERO_RESULTS" {
        PlaceLookupError::NotFound {
            query: query.to_owned(),
        }
    } else {
        PlaceLookupError::Status { status }
    }
}

/// Extract the place name from a `…/maps/place/<name>/…` URL.
///
/// Returns `None` when the input is not such a URL, e.g. plain search text
/// or an unexpanded share link.
pub fn place_name_from_url(input: &str) -> Option<String> {
    let url = Url::parse(input).ok()?;
    let mut segments = url.path_segments()?;
    segments.find(|segment| *segment == "place")?;
    let raw = segments.next().filter(|segment| !segment.is_empty())?;
    let decoded = urlencoding::decode(raw).ok()?;
    Some(decoded.replace('+', " "))
}

#[derive(Debug, Deserialize)]
struct FindPlaceResponse {
    status: String,
    #[serde(default)]
    candidates: Vec<PlaceCandidate>,
}

#[derive(Debug, Deserialize)]
struct PlaceCandidate {
    place_id: String,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    result: Option<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    name: String,
    geometry: Geometry,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(default)]
    price_level: Option<u8>,
    url: String,
    #[serde(default)]
    opening_hours: Option<OpeningHoursResult>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct OpeningHoursResult {
    #[serde(default)]
    periods: Vec<PeriodRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        "https://www.google.com/maps/place/Lan+Jia+Gua+Bao/@25.01,121.53,17z",
        Some("Lan Jia Gua Bao")
    )]
    #[case(
        "https://www.google.com/maps/place/%E8%97%8D%E5%AE%B6%E5%89%B2%E5%8C%85/@25.01,121.53,17z",
        Some("藍家割包")
    )]
    #[case("https://maps.app.goo.gl/abc123", None)] // unexpanded share link
    #[case("Lan Jia Gua Bao", None)] // plain search text
    #[case("https://www.google.com/maps/@25.01,121.53,17z", None)] // no place segment
    fn extracts_place_names_from_maps_urls(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(place_name_from_url(input).as_deref(), expected);
    }

    #[rstest]
    fn details_response_decodes_the_catalog_fields() {
        let payload = r#"{
            "status": "OK",
            "result": {
                "name": "Lan Jia Gua Bao",
                "rating": 4.4,
                "price_level": 1,
                "url": "https://maps.google.com/?cid=42",
                "geometry": { "location": { "lat": 25.0174, "lng": 121.5398 } },
                "opening_hours": {
                    "periods": [
                        { "open": { "day": 1, "time": "1100" }, "close": { "day": 1, "time": "2100" } }
                    ]
                }
            }
        }"#;
        let response: DetailsResponse = serde_json::from_str(payload).expect("valid payload");
        assert_eq!(response.status, "OK");
        let result = response.result.expect("result present");
        assert_eq!(result.name, "Lan Jia Gua Bao");
        assert_eq!(result.price_level, Some(1));
        let hours = result.opening_hours.expect("hours present");
        assert_eq!(hours.periods.len(), 1);
    }

    #[rstest]
    fn details_without_hours_or_rating_still_decode() {
        let payload = r#"{
            "status": "OK",
            "result": {
                "name": "Pop-up Stand",
                "url": "https://maps.google.com/?cid=7",
                "geometry": { "location": { "lat": 25.0, "lng": 121.5 } }
            }
        }"#;
        let response: DetailsResponse = serde_json::from_str(payload).expect("valid payload");
        let result = response.result.expect("result present");
        assert_eq!(result.rating, None);
        assert!(result.opening_hours.is_none());
    }

    #[rstest]
    fn zero_results_maps_to_not_found() {
        assert!(matches!(
            status_error("ZERO_RESULTS".into(), "nowhere"),
            PlaceLookupError::NotFound { .. }
        ));
        assert!(matches!(
            status_error("OVER_QUERY_LIMIT".into(), "anywhere"),
            PlaceLookupError::Status { .. }
        ));
    }

    #[rstest]
    fn place_details_clamp_price_and_default_rating() {
        let details = PlaceDetails {
            name: "Fancy".into(),
            latitude: 25.0,
            longitude: 121.5,
            rating: None,
            price_level: Some(4),
            url: "https://maps.example/fancy".into(),
            periods: Vec::new(),
        };
        let restaurant = details.to_restaurant(9, "Other");
        assert_eq!(restaurant.price, PriceTier::Upscale);
        assert_eq!(restaurant.rating, 0.0);
        assert_eq!(restaurant.id, 9);
    }
}
