//! Remote service access.
//!
//! This layer replaces ad-hoc URL string building with three pieces:
//!
//! - [`query`]: [`QueryBuilder`] turning criteria into endpoint variant and wire params
//! - [`transport`]: the [`ApiTransport`] seam and its `reqwest` implementation
//! - [`resource`]: the [`ResourceDomain`] trait and the `recibos` / `cedulas` domains
//!
//! # Endpoints
//!
//! | Purpose | Path | Params |
//! |---|---|---|
//! | List | `recibos`, `cedulas` | `desde, hasta` |
//! | Filtered list | `recibos/filtrar`, `cedulas/filtrar` | `desde, hasta, contribuyente` |
//! | Receipt totals | `recibos/totales` | `desde, hasta[, contribuyente]` |
//! | Account breakdown | `recibos/totales/despliegue` | `desde, hasta` |
//! | PDF report (opened externally) | `recibos/reporte`, `cedulas/reporte` | `desde, hasta[, contribuyente]` |

pub mod query;
pub mod resource;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use query::{BuiltQuery, EndpointVariant, QueryBuilder, QueryParams};
pub use resource::{Cedulas, Receipts, ResourceDomain};
pub use transport::{report_url, ApiTransport, HttpTransport, ServiceUrl};
