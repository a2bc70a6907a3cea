//! The car record as stored and served.

use serde::{Deserialize, Serialize};

/// One row of the catalog
///
/// JSON keys match the column names so the grid can use them directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "Brand")]
    pub brand: String,

    #[serde(rename = "Model")]
    pub model: String,

    #[serde(rename = "AccelSec")]
    pub accel_sec: Option<f64>,

    #[serde(rename = "TopSpeed_KmH")]
    pub top_speed_kmh: Option<i64>,

    #[serde(rename = "Range_Km")]
    pub range_km: Option<i64>,

    #[serde(rename = "Efficiency_WhKm")]
    pub efficiency_whkm: Option<i64>,

    #[serde(rename = "FastCharge_KmH")]
    pub fast_charge_kmh: Option<i64>,

    #[serde(rename = "RapidCharge")]
    pub rapid_charge: Option<String>,

    #[serde(rename = "PowerTrain")]
    pub power_train: Option<String>,

    #[serde(rename = "PlugType")]
    pub plug_type: Option<String>,

    #[serde(rename = "BodyStyle")]
    pub body_style: Option<String>,

    #[serde(rename = "Segment")]
    pub segment: Option<String>,

    #[serde(rename = "Seats")]
    pub seats: Option<i64>,

    #[serde(rename = "PriceEuro")]
    pub price_euro: Option<i64>,

    #[serde(rename = "Date")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Car {
    /// A record with only the natural key set
    pub fn new(brand: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: None,
            brand: brand.into(),
            model: model.into(),
            accel_sec: None,
            top_speed_kmh: None,
            range_km: None,
            efficiency_whkm: None,
            fast_charge_kmh: None,
            rapid_charge: None,
            power_train: None,
            plug_type: None,
            body_style: None,
            segment: None,
            seats: None,
            price_euro: None,
            date: None,
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_column_names() {
        let mut car = Car::new("Tesla", "Model 3");
        car.id = Some(7);
        car.price_euro = Some(55480);
        car.accel_sec = Some(4.6);

        let json = serde_json::to_value(&car).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["Brand"], "Tesla");
        assert_eq!(json["PriceEuro"], 55480);
        assert_eq!(json["AccelSec"], 4.6);
        assert!(json["Seats"].is_null());
        assert!(json.get("created_at").is_none());
    }
}
