//! Defines data structures for the Photon geocoding API.
//!
//! Includes structs for:
//! - Deserializing Photon GeoJSON responses (`FeatureCollection`, `Feature`, `Properties`).
//! - Describing search filters (`Layer`, `Language`, `BoundingBox`).
//! - Carrying optional request parameters (`ForwardSearch`, `ReverseSearch`).

use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

// --- Response Structs ---

/// Body of a successful `/api` or `/reverse` response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// Body of a failed response. Photon reports the reason in `message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// A single geocoding result (a GeoJSON feature).
///
/// Parsing never rejects a feature because of its content: a missing or
/// malformed `geometry` becomes `None`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Feature {
    #[serde(rename = "type", default = "Feature::default_kind")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Properties,
}

impl Feature {
    fn default_kind() -> String {
        "Feature".to_string()
    }

    /// Latitude of the point, if the geometry carries one.
    pub fn latitude(&self) -> Option<f64> {
        self.geometry.as_ref()?.coordinates.get(1).copied()
    }

    /// Longitude of the point, if the geometry carries one.
    pub fn longitude(&self) -> Option<f64> {
        self.geometry.as_ref()?.coordinates.first().copied()
    }

    /// A one-line human readable description, e.g. `"Berlin, Germany"`.
    ///
    /// Joins name, street with house number, postcode with city, and country,
    /// skipping whatever the feature does not have.
    pub fn label(&self) -> String {
        let p = &self.properties;
        let street = match (&p.street, &p.housenumber) {
            (Some(street), Some(number)) => Some(format!("{} {}", street, number)),
            (Some(street), None) => Some(street.clone()),
            _ => None,
        };
        let city = match (&p.postcode, &p.city) {
            (Some(postcode), Some(city)) => Some(format!("{} {}", postcode, city)),
            (None, Some(city)) => Some(city.clone()),
            _ => None,
        };

        let mut parts: Vec<String> = Vec::new();
        for part in [p.name.clone(), street, city, p.country.clone()]
            .into_iter()
            .flatten()
        {
            // A city feature names itself in both `name` and `city`
            if !parts.contains(&part) {
                parts.push(part);
            }
        }
        parts.join(", ")
    }
}

/// GeoJSON geometry. Photon only returns points, `coordinates` is `[lon, lat]`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Geometry {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

/// Feature properties.
///
/// The commonly returned keys are typed; anything else the server sends is
/// kept untouched in `extra`. Text keys also accept numbers (`"postcode": 10117`);
/// a typed key with any other shape is left in `extra` instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Properties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osm_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osm_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osm_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osm_value: Option<String>,
    /// The layer the feature belongs to (`house`, `street`, `city`, ...).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub housenumber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countrycode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    /// Bounding extent `[minLon, maxLat, maxLon, minLat]` for areal features.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<Vec<f64>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // `null` or any other non-object carries no properties
        let mut map = match Value::deserialize(deserializer)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        Ok(Properties {
            osm_id: take_as(&mut map, "osm_id"),
            osm_type: take_text(&mut map, "osm_type"),
            osm_key: take_text(&mut map, "osm_key"),
            osm_value: take_text(&mut map, "osm_value"),
            kind: take_text(&mut map, "type"),
            name: take_text(&mut map, "name"),
            housenumber: take_text(&mut map, "housenumber"),
            street: take_text(&mut map, "street"),
            locality: take_text(&mut map, "locality"),
            district: take_text(&mut map, "district"),
            city: take_text(&mut map, "city"),
            county: take_text(&mut map, "county"),
            state: take_text(&mut map, "state"),
            country: take_text(&mut map, "country"),
            countrycode: take_text(&mut map, "countrycode"),
            postcode: take_text(&mut map, "postcode"),
            extent: take_as(&mut map, "extent"),
            extra: map,
        })
    }
}

/// Removes `key` if it holds a string or a number, returning it as text.
fn take_text(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    let text = match map.get(key)? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    map.remove(key);
    Some(text)
}

/// Removes `key` if it converts to `T`; otherwise leaves it in place.
fn take_as<T: DeserializeOwned>(map: &mut Map<String, Value>, key: &str) -> Option<T> {
    let value = serde_json::from_value(map.get(key)?.clone()).ok()?;
    map.remove(key);
    Some(value)
}

/// `None` instead of an error when the value does not fit `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

// --- Filters ---

/// Result category filter accepted by the `layer` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    House,
    Street,
    Locality,
    District,
    City,
    County,
    State,
    Country,
    Other,
}

impl Layer {
    pub const ALL: [Layer; 9] = [
        Layer::House,
        Layer::Street,
        Layer::Locality,
        Layer::District,
        Layer::City,
        Layer::County,
        Layer::State,
        Layer::Country,
        Layer::Other,
    ];

    /// The name sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::House => "house",
            Layer::Street => "street",
            Layer::Locality => "locality",
            Layer::District => "district",
            Layer::City => "city",
            Layer::County => "county",
            Layer::State => "state",
            Layer::Country => "country",
            Layer::Other => "other",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layer {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Layer::ALL
            .into_iter()
            .find(|layer| layer.as_str() == wanted)
            .ok_or_else(|| {
                AppError::InvalidArgument(format!(
                    "Unknown layer '{}'. Must be one of: {:?}",
                    s,
                    Layer::ALL.map(|l| l.as_str())
                ))
            })
    }
}

/// Languages the public Photon instance can answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Language {
    #[serde(rename = "EN")]
    En,
    #[serde(rename = "DE")]
    De,
    #[serde(rename = "FR")]
    Fr,
    #[serde(rename = "IT")]
    It,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::En, Language::De, Language::Fr, Language::It];

    /// ISO-639-1 code in its canonical (upper-case) spelling.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::De => "DE",
            Language::Fr => "FR",
            Language::It => "IT",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == wanted)
            .ok_or_else(|| {
                AppError::InvalidArgument(format!(
                    "Unsupported language '{}'. Must be one of: {:?}",
                    s,
                    Language::ALL.map(|l| l.code())
                ))
            })
    }
}

/// Rectangular search area. Serialized as `minLon,minLat,maxLon,maxLat`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

impl FromStr for BoundingBox {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let edges = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::InvalidArgument(format!("Invalid bounding box '{}': {}", s, e)))?;

        match edges.as_slice() {
            [min_lon, min_lat, max_lon, max_lat] => {
                Ok(BoundingBox::new(*min_lon, *min_lat, *max_lon, *max_lat))
            },
            _ => Err(AppError::InvalidArgument(format!(
                "Invalid bounding box '{}': expected minLon,minLat,maxLon,maxLat",
                s
            ))),
        }
    }
}

// --- Request Options ---

/// Optional parameters of a forward (text) search.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardSearch {
    pub limit: Option<u32>,
    /// Location bias. Only sent when `longitude` is set as well.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub language: Option<Language>,
    pub bounding_box: Option<BoundingBox>,
    pub layer: Option<Layer>,
    /// Use https (default) or plain http.
    pub secure: bool,
}

impl Default for ForwardSearch {
    fn default() -> Self {
        Self {
            limit: None,
            latitude: None,
            longitude: None,
            language: None,
            bounding_box: None,
            layer: None,
            secure: true,
        }
    }
}

/// Optional parameters of a reverse (coordinate) search.
#[derive(Debug, Clone, PartialEq)]
pub struct ReverseSearch {
    pub limit: Option<u32>,
    pub language: Option<Language>,
    /// Search radius in meters.
    pub radius: Option<u32>,
    pub layer: Option<Layer>,
    pub secure: bool,
}

impl Default for ReverseSearch {
    fn default() -> Self {
        Self {
            limit: None,
            language: None,
            radius: None,
            layer: None,
            secure: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn berlin() -> serde_json::Value {
        json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [13.3888599, 52.5170365] },
            "properties": {
                "osm_id": 240109189,
                "osm_type": "N",
                "osm_key": "place",
                "osm_value": "city",
                "type": "city",
                "name": "Berlin",
                "city": "Berlin",
                "country": "Germany",
                "countrycode": "DE",
                "postcode": "10117",
                "extent": [13.088345, 52.6755087, 13.7611609, 52.3382448],
                "importance": 0.85
            }
        })
    }

    #[test]
    fn test_feature_deserializes_typed_and_extra_properties() {
        let feature: Feature = serde_json::from_value(berlin()).unwrap();

        assert_eq!(feature.kind, "Feature");
        assert_eq!(feature.geometry.as_ref().map(|g| g.kind.as_str()), Some("Point"));
        assert_eq!(feature.latitude(), Some(52.5170365));
        assert_eq!(feature.longitude(), Some(13.3888599));
        assert_eq!(feature.properties.osm_id, Some(240109189));
        assert_eq!(feature.properties.kind.as_deref(), Some("city"));
        assert_eq!(feature.properties.countrycode.as_deref(), Some("DE"));
        assert_eq!(feature.properties.extent.as_ref().map(Vec::len), Some(4));
        // Unknown keys are passed through
        assert_eq!(feature.properties.extra.get("importance"), Some(&json!(0.85)));
        assert!(!feature.properties.extra.contains_key("name"));
    }

    #[test]
    fn test_feature_serializes_back_with_extra_keys() {
        let feature: Feature = serde_json::from_value(berlin()).unwrap();
        let value = serde_json::to_value(&feature).unwrap();
        assert_eq!(value, berlin());
    }

    #[test]
    fn test_feature_without_properties() {
        let feature: Feature = serde_json::from_value(json!({
            "geometry": { "type": "Point", "coordinates": [1.0, 2.0] }
        }))
        .unwrap();
        assert_eq!(feature.kind, "Feature");
        assert_eq!(feature.properties, Properties::default());
        assert_eq!(feature.label(), "");
    }

    #[test]
    fn test_numeric_text_properties_are_accepted() {
        let feature: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [13.4, 52.5] },
            "properties": { "name": "Hauptstraße", "postcode": 10117, "housenumber": 7 }
        }))
        .unwrap();
        assert_eq!(feature.properties.postcode.as_deref(), Some("10117"));
        assert_eq!(feature.properties.housenumber.as_deref(), Some("7"));
        assert!(feature.properties.extra.is_empty());
    }

    #[test]
    fn test_misshapen_typed_properties_stay_in_extra() {
        let feature: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [13.4, 52.5] },
            "properties": {
                "name": { "de": "Berlin" },
                "osm_id": "not-a-number",
                "extent": "wide",
                "city": null
            }
        }))
        .unwrap();
        let p = &feature.properties;
        assert_eq!(p.name, None);
        assert_eq!(p.osm_id, None);
        assert_eq!(p.extent, None);
        assert_eq!(p.extra.get("name"), Some(&json!({ "de": "Berlin" })));
        assert_eq!(p.extra.get("osm_id"), Some(&json!("not-a-number")));
        assert_eq!(p.extra.get("extent"), Some(&json!("wide")));
        assert_eq!(p.extra.get("city"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn test_missing_or_malformed_geometry() {
        let missing: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "properties": { "name": "Nowhere" }
        }))
        .unwrap();
        assert_eq!(missing.geometry, None);
        assert_eq!(missing.latitude(), None);
        assert_eq!(missing.longitude(), None);

        let malformed: Feature = serde_json::from_value(json!({
            "geometry": "POINT(1 2)",
            "properties": null
        }))
        .unwrap();
        assert_eq!(malformed.geometry, None);
        assert_eq!(malformed.properties, Properties::default());
    }

    #[test]
    fn test_label_skips_duplicates_and_missing_parts() {
        let feature: Feature = serde_json::from_value(berlin()).unwrap();
        assert_eq!(feature.label(), "Berlin, 10117 Berlin, Germany");

        let house: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [2.29, 48.85] },
            "properties": {
                "street": "Avenue Anatole France",
                "housenumber": "5",
                "city": "Paris",
                "country": "France"
            }
        }))
        .unwrap();
        assert_eq!(house.label(), "Avenue Anatole France 5, Paris, France");
    }

    #[rstest]
    #[case("house", Layer::House)]
    #[case("Street", Layer::Street)]
    #[case(" CITY ", Layer::City)]
    #[case("other", Layer::Other)]
    fn test_layer_from_str(#[case] input: &str, #[case] expected: Layer) {
        assert_eq!(input.parse::<Layer>().unwrap(), expected);
    }

    #[test]
    fn test_layer_round_trips_through_display() {
        for layer in Layer::ALL {
            assert_eq!(layer.to_string().parse::<Layer>().unwrap(), layer);
        }
        assert!("village".parse::<Layer>().is_err());
    }

    #[rstest]
    #[case("en", Language::En)]
    #[case("DE", Language::De)]
    #[case("Fr", Language::Fr)]
    #[case("it", Language::It)]
    fn test_language_from_str(#[case] input: &str, #[case] expected: Language) {
        assert_eq!(input.parse::<Language>().unwrap(), expected);
    }

    #[test]
    fn test_unsupported_language() {
        let err = "es".parse::<Language>().unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(msg) if msg.contains("Unsupported language")));
    }

    #[test]
    fn test_bounding_box_wire_form() {
        let bbox = BoundingBox::new(9.5, 51.5, 11.5, 53.5);
        assert_eq!(bbox.to_string(), "9.5,51.5,11.5,53.5");
    }

    #[rstest]
    #[case("-0.5,51.2,0.3,51.7", BoundingBox::new(-0.5, 51.2, 0.3, 51.7))]
    #[case(" 9.5 , 51.5 , 11.5 , 53.5 ", BoundingBox::new(9.5, 51.5, 11.5, 53.5))]
    fn test_bounding_box_from_str(#[case] input: &str, #[case] expected: BoundingBox) {
        assert_eq!(input.parse::<BoundingBox>().unwrap(), expected);
    }

    #[rstest]
    #[case("1,2,3")]
    #[case("1,2,3,4,5")]
    #[case("a,b,c,d")]
    #[case("")]
    fn test_bounding_box_rejects_malformed(#[case] input: &str) {
        assert!(input.parse::<BoundingBox>().is_err());
    }

    #[test]
    fn test_options_default_to_secure() {
        assert!(ForwardSearch::default().secure);
        assert!(ReverseSearch::default().secure);
    }
}
