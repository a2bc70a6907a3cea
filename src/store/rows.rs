//! Mapping between SQLite rows and [`Car`] records.

use rusqlite::types::Value as SqlValue;
use rusqlite::Row;

use crate::catalog::{Car, CarField};

/// Build a car from a `SELECT *` row
pub(crate) fn car_from_row(row: &Row<'_>) -> rusqlite::Result<Car> {
    Ok(Car {
        id: Some(row.get("id")?),
        brand: row.get("Brand")?,
        model: row.get("Model")?,
        accel_sec: row.get("AccelSec")?,
        top_speed_kmh: row.get("TopSpeed_KmH")?,
        range_km: row.get("Range_Km")?,
        efficiency_whkm: row.get("Efficiency_WhKm")?,
        fast_charge_kmh: row.get("FastCharge_KmH")?,
        rapid_charge: row.get("RapidCharge")?,
        power_train: row.get("PowerTrain")?,
        plug_type: row.get("PlugType")?,
        body_style: row.get("BodyStyle")?,
        segment: row.get("Segment")?,
        seats: row.get("Seats")?,
        price_euro: row.get("PriceEuro")?,
        date: row.get("Date")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Value of one attribute, ready to bind
pub(crate) fn field_value(car: &Car, field: CarField) -> SqlValue {
    fn text(value: &Option<String>) -> SqlValue {
        value.clone().map_or(SqlValue::Null, SqlValue::Text)
    }
    fn integer(value: Option<i64>) -> SqlValue {
        value.map_or(SqlValue::Null, SqlValue::Integer)
    }

    match field {
        CarField::Brand => SqlValue::Text(car.brand.clone()),
        CarField::Model => SqlValue::Text(car.model.clone()),
        CarField::AccelSec => car.accel_sec.map_or(SqlValue::Null, SqlValue::Real),
        CarField::TopSpeedKmH => integer(car.top_speed_kmh),
        CarField::RangeKm => integer(car.range_km),
        CarField::EfficiencyWhKm => integer(car.efficiency_whkm),
        CarField::FastChargeKmH => integer(car.fast_charge_kmh),
        CarField::RapidCharge => text(&car.rapid_charge),
        CarField::PowerTrain => text(&car.power_train),
        CarField::PlugType => text(&car.plug_type),
        CarField::BodyStyle => text(&car.body_style),
        CarField::Segment => text(&car.segment),
        CarField::Seats => integer(car.seats),
        CarField::PriceEuro => integer(car.price_euro),
        CarField::Date => text(&car.date),
    }
}

/// All attribute values in [`CarField::ALL`] order
pub(crate) fn car_params(car: &Car) -> Vec<SqlValue> {
    CarField::ALL
        .iter()
        .map(|field| field_value(car, *field))
        .collect()
}
