//! Normalization of loosely-typed catalog records into [`Destination`]s
//!
//! Catalog exports are inconsistent: ids may be numbers or strings,
//! coordinates may be quoted, categories may be an array or a
//! comma-separated string. Every field is resolved by exactly one rule:
//!
//! | field           | sources (first usable wins)        | default                                         |
//! |-----------------|------------------------------------|-------------------------------------------------|
//! | `place_id`      | `restaurant_id`, `place_id`        | none                                            |
//! | `order`         | `restaurant_id`, `order`           | `0`                                             |
//! | `name`          | `nama_destinasi`, `nama`           | [`DEFAULT_NAME`]                                |
//! | `categories`    | `kategori` (array or "a, b")       | [`DEFAULT_CATEGORY`]                            |
//! | `coordinates`   | `latitude`, `longitude`            | [`Waypoint::surabaya_center`] per missing axis  |
//! | `description`   | `deskripsi`                        | template keyed by primary category              |
//! | `rating`        | `rating`                           | 4.0 - 4.8, derived from the name                |
//! | `address`       | `alamat`                           | [`DEFAULT_ADDRESS`]                             |
//! | `opening_hours` | `jam_buka`                         | [`DEFAULT_OPENING_HOURS`]                       |
//! | `image_url`     | `image_url`, `gambar`              | picsum seed derived from the name               |
//!
//! A value is "usable" when it is present, not null, and not empty, zero or
//! unparseable.

use serde::Deserialize;
use serde_json::Value;

use super::Destination;
use crate::value_objects::Waypoint;

/// Name used when a record has none
pub const DEFAULT_NAME: &str = "Nama tidak tersedia";
/// Category used when a record has none
pub const DEFAULT_CATEGORY: &str = "umum";
/// Address used when a record has none
pub const DEFAULT_ADDRESS: &str = "Alamat belum tersedia, Surabaya, Jawa Timur";
/// Opening hours used when a record has none
pub const DEFAULT_OPENING_HOURS: &str = "08:00 - 22:00 WIB";

/// A catalog record as found in the source data
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDestinationRecord {
    #[serde(default)]
    pub restaurant_id: Option<Value>,
    #[serde(default)]
    pub place_id: Option<Value>,
    #[serde(default)]
    pub order: Option<Value>,
    #[serde(default)]
    pub nama_destinasi: Option<String>,
    #[serde(default)]
    pub nama: Option<String>,
    #[serde(default)]
    pub kategori: Option<Value>,
    #[serde(default)]
    pub latitude: Option<Value>,
    #[serde(default)]
    pub longitude: Option<Value>,
    #[serde(default)]
    pub deskripsi: Option<String>,
    #[serde(default)]
    pub rating: Option<Value>,
    #[serde(default)]
    pub alamat: Option<String>,
    #[serde(default)]
    pub jam_buka: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub gambar: Option<String>,
}

impl RawDestinationRecord {
    /// Apply the default rules and produce a strictly typed destination
    #[must_use]
    pub fn normalize(self) -> Destination {
        let raw_name = non_empty(self.nama_destinasi.as_deref())
            .or_else(|| non_empty(self.nama.as_deref()))
            .map(str::to_string);

        let place_id = value_as_string(self.restaurant_id.as_ref())
            .or_else(|| value_as_string(self.place_id.as_ref()));

        let order = value_as_u32(self.restaurant_id.as_ref())
            .or_else(|| value_as_u32(self.order.as_ref()))
            .unwrap_or(0);

        let categories = parse_categories(self.kategori.as_ref());

        let fallback = Waypoint::surabaya_center();
        let latitude = value_as_f64(self.latitude.as_ref())
            .filter(|lat| (-90.0..=90.0).contains(lat))
            .unwrap_or_else(|| fallback.latitude());
        let longitude = value_as_f64(self.longitude.as_ref())
            .filter(|lon| (-180.0..=180.0).contains(lon))
            .unwrap_or_else(|| fallback.longitude());
        let coordinates = Waypoint::new_unchecked(latitude, longitude);

        let name = raw_name.unwrap_or_else(|| DEFAULT_NAME.to_string());

        let description = non_empty(self.deskripsi.as_deref()).map_or_else(
            || default_description(&name, categories.first().map(String::as_str)),
            str::to_string,
        );

        let rating = value_as_f64(self.rating.as_ref())
            .filter(|r| *r > 0.0)
            .unwrap_or_else(|| default_rating(&name));

        let address = non_empty(self.alamat.as_deref()).unwrap_or(DEFAULT_ADDRESS);
        let opening_hours = non_empty(self.jam_buka.as_deref()).unwrap_or(DEFAULT_OPENING_HOURS);

        let image_url = non_empty(self.image_url.as_deref())
            .or_else(|| non_empty(self.gambar.as_deref()))
            .map_or_else(|| default_image_url(&name), str::to_string);

        Destination {
            place_id,
            order,
            name,
            categories,
            coordinates,
            description: Some(description),
            address: Some(address.to_string()),
            opening_hours: Some(opening_hours.to_string()),
            rating: Some(rating),
            image_url: Some(image_url),
        }
    }
}

impl From<RawDestinationRecord> for Destination {
    fn from(raw: RawDestinationRecord) -> Self {
        raw.normalize()
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn value_as_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => non_empty(Some(s)).map(str::to_string),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn value_as_f64(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite() && *f != 0.0)
}

fn value_as_u32(value: Option<&Value>) -> Option<u32> {
    let parsed = match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed
        .filter(|n| *n > 0)
        .and_then(|n| u32::try_from(n).ok())
}

fn parse_categories(value: Option<&Value>) -> Vec<String> {
    let categories: Vec<String> = match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(|s| non_empty(Some(s)))
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .filter_map(|part| non_empty(Some(part)))
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    if categories.is_empty() {
        vec![DEFAULT_CATEGORY.to_string()]
    } else {
        categories
    }
}

fn default_description(name: &str, category: Option<&str>) -> String {
    match category.unwrap_or(DEFAULT_CATEGORY) {
        "makanan_berat" => format!(
            "{name} adalah tempat makan yang menyajikan berbagai hidangan lengkap dan mengenyangkan."
        ),
        "makanan_ringan" => {
            format!("{name} menawarkan berbagai jajanan dan camilan khas Surabaya.")
        },
        "oleh_oleh" => format!(
            "{name} adalah pusat oleh-oleh dengan berbagai produk khas Surabaya dan Jawa Timur."
        ),
        "mall" => format!(
            "{name} adalah pusat perbelanjaan modern dengan fashion hingga kuliner dalam satu tempat."
        ),
        "non_kuliner" => format!("{name} merupakan destinasi wisata menarik di Surabaya."),
        "play" => format!("{name} adalah tempat rekreasi dan hiburan untuk keluarga dan teman."),
        "kantor_pariwisata" => format!(
            "{name} menyediakan informasi destinasi wisata dan layanan pariwisata di Surabaya."
        ),
        "all" => format!("{name} adalah destinasi serbaguna dengan berbagai fasilitas."),
        _ => format!("{name} adalah destinasi menarik yang patut dikunjungi saat berada di Surabaya."),
    }
}

/// Stable pseudo-rating in [4.0, 4.8] so repeated loads agree
fn default_rating(name: &str) -> f64 {
    // FNV-1a
    let hash = name.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |acc, b| {
        (acc ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    });
    let step = u32::try_from(hash % 9).unwrap_or(0);
    f64::from(40 + step) / 10.0
}

fn default_image_url(name: &str) -> String {
    let seed: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    format!("https://picsum.photos/seed/{seed}/400/300")
}
