//! The two resource domains served by the same orchestration logic.
//!
//! A [`ResourceDomain`] names a collection's endpoint prefix, its record type,
//! and how its totals are obtained. [`Receipts`] have a server totals endpoint;
//! [`Cedulas`] only count what was found.

use super::query::QueryParams;
use super::transport::ApiTransport;
use crate::domain::error::Result;
use crate::domain::{AccountTotals, Cedula, CedulaTotals, DateRange, Receipt, ReceiptTotals};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// A browsable collection exposed by the service.
#[async_trait]
pub trait ResourceDomain: Debug + Send + Sync + 'static {
    /// One record of the collection.
    type Item: DeserializeOwned + Clone + Debug + Send + Sync + 'static;

    /// Aggregate summary shown next to the list.
    type Totals: Clone + Debug + Send + Sync + 'static;

    /// Endpoint prefix, e.g. `recibos`.
    fn prefix(&self) -> &'static str;

    /// Plural label used in notices, e.g. `recibos`.
    fn label(&self) -> &'static str;

    /// Fetches totals for the same parameters as the list call.
    ///
    /// # Errors
    ///
    /// Any transport or decode error; callers log it and keep previous totals.
    async fn fetch_totals(&self, transport: &dyn ApiTransport, params: &QueryParams) -> Result<Self::Totals>;

    /// Records how many items the displayed result set holds.
    fn set_found_count(&self, totals: &mut Self::Totals, count: usize);
}

/// Payment receipts under `recibos`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Receipts;

impl Receipts {
    pub const PREFIX: &'static str = "recibos";
    const TOTALS_PATH: &'static str = "recibos/totales";
    const BREAKDOWN_PATH: &'static str = "recibos/totales/despliegue";

    /// Per-account totals for a date range. The payer filter does not apply.
    ///
    /// # Errors
    ///
    /// Any transport error, or [`crate::RecibosError::Decode`] if the body is
    /// not an array of account rows.
    pub async fn fetch_breakdown(
        &self,
        transport: &dyn ApiTransport,
        range: &DateRange,
    ) -> Result<Vec<AccountTotals>> {
        let body = transport
            .get_json(Self::BREAKDOWN_PATH, &QueryParams::for_range(range))
            .await?;
        Ok(serde_json::from_value(body)?)
    }
}

#[async_trait]
impl ResourceDomain for Receipts {
    type Item = Receipt;
    type Totals = ReceiptTotals;

    fn prefix(&self) -> &'static str {
        Self::PREFIX
    }

    fn label(&self) -> &'static str {
        "recibos"
    }

    async fn fetch_totals(&self, transport: &dyn ApiTransport, params: &QueryParams) -> Result<ReceiptTotals> {
        let body = transport.get_json(Self::TOTALS_PATH, params).await?;
        Ok(serde_json::from_value(body)?)
    }

    fn set_found_count(&self, totals: &mut ReceiptTotals, count: usize) {
        totals.found_count = count;
    }
}

/// Cédulas under `cedulas`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cedulas;

impl Cedulas {
    pub const PREFIX: &'static str = "cedulas";
}

#[async_trait]
impl ResourceDomain for Cedulas {
    type Item = Cedula;
    type Totals = CedulaTotals;

    fn prefix(&self) -> &'static str {
        Self::PREFIX
    }

    fn label(&self) -> &'static str {
        "cédulas"
    }

    // TODO: call `cedulas/totales` once the service exposes it, decoding the
    // same shape as `recibos/totales`.
    async fn fetch_totals(&self, _transport: &dyn ApiTransport, _params: &QueryParams) -> Result<CedulaTotals> {
        Ok(CedulaTotals::default())
    }

    fn set_found_count(&self, totals: &mut CedulaTotals, count: usize) {
        totals.found_count = count;
    }
}
