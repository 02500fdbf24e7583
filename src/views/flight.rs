use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::Flight;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightView {
    pub destination: String,
    pub time: NaiveTime,
    pub price: Decimal,
    pub id: i64,
}

impl From<&Flight> for FlightView {
    fn from(flight: &Flight) -> Self {
        Self {
            destination: flight.destination.clone(),
            time: flight.time,
            price: flight.price,
            id: flight.id,
        }
    }
}
