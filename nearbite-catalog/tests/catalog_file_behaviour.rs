//! Behaviour of the JSON catalog file store: loading, classification and
//! the editor's append path.

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use nearbite_catalog::record::PeriodRecord;
use nearbite_catalog::{AppendOutcome, JsonCatalog, PlaceDetails};
use nearbite_core::{CatalogSource, OpeningPeriod, PriceTier};

const SAMPLE: &str = r#"[
    {
        "id": 1,
        "name": "Lan Jia Gua Bao",
        "cuisine": "Taiwanese",
        "latitude": 25.0174,
        "longitude": 121.5398,
        "priceRange": 1,
        "rating": 4.4,
        "googleMapsUrl": "https://maps.google.com/?cid=1",
        "openingHours": [
            { "open": { "day": 1, "time": "1100" }, "close": { "day": 1, "time": "2100" } }
        ]
    },
    {
        "id": 2,
        "name": "Night Owl Diner",
        "cuisine": "American",
        "latitude": 25.0200,
        "longitude": 121.5430,
        "priceRange": 2,
        "rating": 4.0,
        "googleMapsUrl": "https://maps.google.com/?cid=2",
        "openingHours": [
            { "open": { "day": 0, "time": "0000" } }
        ]
    },
    {
        "id": 3,
        "name": "Hotpot Palace",
        "cuisine": "Taiwanese",
        "latitude": 25.0300,
        "longitude": 121.5500,
        "priceRange": 3,
        "googleMapsUrl": "https://maps.google.com/?cid=3",
        "openingHours": [
            { "open": { "day": 5, "time": "1700" } },
            { "open": { "day": 6, "time": "2200" }, "close": { "day": 0, "time": "0300" } }
        ]
    }
]"#;

struct Workspace {
    catalog: JsonCatalog,
    _dir: TempDir,
}

#[fixture]
fn workspace() -> Workspace {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("data.json")).expect("utf8 temp path");
    std::fs::write(&path, SAMPLE).expect("seed catalog file");
    Workspace {
        catalog: JsonCatalog::new(path),
        _dir: dir,
    }
}

fn sample_details(name: &str, url: &str) -> PlaceDetails {
    PlaceDetails {
        name: name.into(),
        latitude: 25.0250,
        longitude: 121.5460,
        rating: Some(4.6),
        price_level: Some(2),
        url: url.into(),
        periods: vec![PeriodRecord {
            open: nearbite_catalog::record::TimeBoundary {
                day: 2,
                time: "1130".into(),
            },
            close: Some(nearbite_catalog::record::TimeBoundary {
                day: 2,
                time: "1400".into(),
            }),
        }],
    }
}

#[rstest]
fn loads_and_classifies_every_period_shape(workspace: Workspace) {
    let restaurants = workspace.catalog.records().expect("load catalog");
    assert_eq!(restaurants.len(), 3);

    assert!(matches!(
        restaurants[0].hours.as_slice(),
        [OpeningPeriod::Window { .. }]
    ));
    assert_eq!(restaurants[1].hours, vec![OpeningPeriod::AlwaysOpen]);
    assert!(matches!(
        restaurants[2].hours.as_slice(),
        [OpeningPeriod::Incomplete { .. }, OpeningPeriod::Window { .. }]
    ));

    // A record without the rating key falls back to 0.0.
    assert_eq!(restaurants[2].rating, 0.0);
    assert_eq!(restaurants[2].price, PriceTier::Upscale);
}

#[rstest]
fn missing_file_surfaces_as_catalog_unavailable() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("missing.json")).expect("utf8 temp path");
    let catalog = JsonCatalog::new(path);
    assert!(catalog.load().is_err());
}

#[rstest]
fn append_assigns_the_next_id_and_persists(workspace: Workspace) {
    let outcome = workspace
        .catalog
        .append(&sample_details("Bento Corner", "https://maps.google.com/?cid=9"), "Japanese")
        .expect("append");
    let AppendOutcome::Added(added) = outcome else {
        panic!("expected Added, got {outcome:?}");
    };
    assert_eq!(added.id, 4);
    assert_eq!(added.cuisine, "Japanese");

    let reloaded = workspace.catalog.records().expect("reload");
    assert_eq!(reloaded.len(), 4);
    assert_eq!(reloaded[3].name, "Bento Corner");
    assert!(matches!(
        reloaded[3].hours.as_slice(),
        [OpeningPeriod::Window { .. }]
    ));
}

#[rstest]
fn append_starts_at_id_one_for_a_new_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("fresh.json")).expect("utf8 temp path");
    let catalog = JsonCatalog::new(path);
    let outcome = catalog
        .append(&sample_details("First Place", "https://maps.google.com/?cid=11"), "Other")
        .expect("append to fresh file");
    assert!(matches!(outcome, AppendOutcome::Added(added) if added.id == 1));
}

#[rstest]
#[case("Lan Jia Gua Bao", "https://maps.google.com/?cid=99")] // same name
#[case("Another Name", "https://maps.google.com/?cid=2")] // same url
fn append_rejects_duplicates(workspace: Workspace, #[case] name: &str, #[case] url: &str) {
    let outcome = workspace
        .catalog
        .append(&sample_details(name, url), "Other")
        .expect("append");
    assert!(matches!(outcome, AppendOutcome::Duplicate { .. }));
    assert_eq!(workspace.catalog.records().expect("reload").len(), 3);
}

#[rstest]
fn written_file_is_pretty_printed_with_four_spaces(workspace: Workspace) {
    workspace
        .catalog
        .append(&sample_details("Bento Corner", "https://maps.google.com/?cid=9"), "Japanese")
        .expect("append");
    let text = std::fs::read_to_string(workspace.catalog.path()).expect("read back");
    assert!(text.starts_with("[\n    {\n"));
    assert!(text.contains("\n        \"name\": \"Bento Corner\""));
}
