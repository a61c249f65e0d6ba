//! Record and totals models returned by the service.
//!
//! Field names follow the service's JSON (Spanish keys) through `serde`
//! renames. Identifier-like fields are accepted as either strings or numbers
//! since the service is not consistent about them.

use super::dates::display_wire_or_raw;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Status code marking a cancelled receipt.
const CANCELLED_STATUS: &str = "1";

/// A payment receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    #[serde(rename = "recibo", deserialize_with = "string_or_number")]
    pub receipt_id: String,
    #[serde(rename = "contribuyente", default, deserialize_with = "string_or_number")]
    pub payer_name: String,
    #[serde(rename = "concepto", default, deserialize_with = "string_or_number")]
    pub concept: String,
    /// Wire date (`YYMMDD`) as sent by the service.
    #[serde(rename = "fecha", default, deserialize_with = "string_or_number")]
    pub date: String,
    #[serde(rename = "neto", default)]
    pub net: Decimal,
    #[serde(rename = "descuento", default)]
    pub discount: Decimal,
    #[serde(rename = "status", default, deserialize_with = "string_or_number")]
    pub status_code: String,
}

impl Receipt {
    /// Cancelled receipts are flagged for display but still count in totals.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.status_code.trim() == CANCELLED_STATUS
    }

    /// `DD-MM-YYYY`, or the raw field when it is not a valid wire date.
    #[must_use]
    pub fn display_date(&self) -> String {
        display_wire_or_raw(&self.date)
    }
}

/// A cédula (municipal certificate) record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cedula {
    #[serde(deserialize_with = "string_or_number")]
    pub folio: String,
    #[serde(rename = "motivo", default, deserialize_with = "string_or_number")]
    pub motive: String,
    #[serde(rename = "fecha", default, deserialize_with = "string_or_number")]
    pub issue_date: String,
    #[serde(rename = "contribuyente", default, deserialize_with = "string_or_number")]
    pub payer_name: String,
    #[serde(rename = "domicilio", default, deserialize_with = "opt_string_or_number")]
    pub address: Option<String>,
    #[serde(rename = "precio_unitario", default)]
    pub unit_price: Decimal,
    #[serde(rename = "cantidad", default)]
    pub quantity: Decimal,
    #[serde(rename = "recibo_tesoreria", default, deserialize_with = "opt_string_or_number")]
    pub treasury_receipt_id: Option<String>,
    #[serde(rename = "fecha_recibo_tesoreria", default, deserialize_with = "opt_string_or_number")]
    pub treasury_receipt_date: Option<String>,
    #[serde(rename = "folio_electronico", default, deserialize_with = "opt_string_or_number")]
    pub electronic_folio: Option<String>,
}

impl Cedula {
    /// `unit_price * quantity`, computed on every read.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.unit_price * self.quantity
    }

    #[must_use]
    pub fn display_date(&self) -> String {
        display_wire_or_raw(&self.issue_date)
    }

    #[must_use]
    pub fn display_treasury_date(&self) -> Option<String> {
        self.treasury_receipt_date.as_deref().map(display_wire_or_raw)
    }
}

/// Aggregates for a receipts search.
///
/// `found_count` is not part of the totals response; the coordinator fills it
/// from the result set on display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptTotals {
    #[serde(rename = "total_neto", default, deserialize_with = "decimal_or_null")]
    pub total_net: Decimal,
    #[serde(rename = "total_descuento", default, deserialize_with = "decimal_or_null")]
    pub total_discount: Decimal,
    #[serde(rename = "cantidad_status_1", default, deserialize_with = "count_or_null")]
    pub cancelled_count: u64,
    #[serde(skip)]
    pub found_count: usize,
}

/// Aggregates for a cédulas search. Only the count until the service exposes
/// a totals endpoint for this collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CedulaTotals {
    pub found_count: usize,
}

/// One row of the per-account totals breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTotals {
    #[serde(rename = "cuenta", deserialize_with = "string_or_number")]
    pub account: String,
    #[serde(rename = "total_neto", default, deserialize_with = "decimal_or_null")]
    pub total_net: Decimal,
    #[serde(rename = "total_descuento", default, deserialize_with = "decimal_or_null")]
    pub total_discount: Decimal,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!("expected string or number, got {other}"))),
    }
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = string_or_number(deserializer)?;
    Ok(if s.trim().is_empty() { None } else { Some(s) })
}

fn decimal_or_null<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Decimal>::deserialize(deserializer)?.unwrap_or_default())
}

fn count_or_null<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn receipt_accepts_mixed_field_types() {
        let receipt: Receipt = serde_json::from_value(json!({
            "recibo": 10234,
            "contribuyente": "ACME SA",
            "concepto": "Predial",
            "fecha": "250423",
            "neto": 1500.5,
            "descuento": "25.00",
            "status": 1
        }))
        .unwrap();

        assert_eq!(receipt.receipt_id, "10234");
        assert_eq!(receipt.net, Decimal::from_str("1500.5").unwrap());
        assert_eq!(receipt.discount, Decimal::from_str("25.00").unwrap());
        assert!(receipt.is_cancelled());
        assert_eq!(receipt.display_date(), "23-04-2025");
    }

    #[test]
    fn receipt_with_bad_date_keeps_raw_value() {
        let receipt: Receipt = serde_json::from_value(json!({
            "recibo": "A-1",
            "contribuyente": "X",
            "concepto": "Y",
            "fecha": "23/04/25",
            "neto": 0,
            "descuento": 0,
            "status": "0"
        }))
        .unwrap();
        assert!(!receipt.is_cancelled());
        assert_eq!(receipt.display_date(), "23/04/25");
    }

    #[test]
    fn cedula_amount_is_derived() {
        let cedula: Cedula = serde_json::from_value(json!({
            "folio": "C-7",
            "motivo": "Licencia",
            "fecha": "250110",
            "contribuyente": "Juana",
            "domicilio": "",
            "precio_unitario": "120.50",
            "cantidad": 3,
            "recibo_tesoreria": null,
            "fecha_recibo_tesoreria": "250111"
        }))
        .unwrap();

        assert_eq!(cedula.amount(), Decimal::from_str("361.50").unwrap());
        assert_eq!(cedula.address, None);
        assert_eq!(cedula.treasury_receipt_id, None);
        assert_eq!(cedula.electronic_folio, None);
        assert_eq!(cedula.display_treasury_date().as_deref(), Some("11-01-2025"));
    }

    #[test]
    fn totals_default_missing_and_null_fields_to_zero() {
        let totals: ReceiptTotals =
            serde_json::from_value(json!({ "total_neto": 100, "total_descuento": null })).unwrap();
        assert_eq!(totals.total_net, Decimal::from(100));
        assert_eq!(totals.total_discount, Decimal::ZERO);
        assert_eq!(totals.cancelled_count, 0);
        assert_eq!(totals.found_count, 0);
    }
}
