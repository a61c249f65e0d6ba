//! Query parameter composition shared by every request of a search.
//!
//! The detail list, the totals call and the report URL of one logical search
//! are all built from the same [`QueryParams`], so they always agree on filter
//! semantics.

use crate::domain::{DateRange, SearchCriteria};

/// Which list endpoint a search targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointVariant {
    /// `<prefix>` with only the date range.
    All,
    /// `<prefix>/filtrar` with the payer name as well.
    FilteredByName,
}

impl EndpointVariant {
    /// Path of the list endpoint for a collection prefix.
    #[must_use]
    pub fn list_path(self, prefix: &str) -> String {
        match self {
            Self::All => prefix.to_string(),
            Self::FilteredByName => format!("{prefix}/filtrar"),
        }
    }
}

/// Query parameters in the service's wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub desde: String,
    pub hasta: String,
    pub contribuyente: Option<String>,
}

impl QueryParams {
    /// Only the date range, for endpoints that ignore the payer filter.
    #[must_use]
    pub fn for_range(range: &DateRange) -> Self {
        Self {
            desde: range.from.to_wire(),
            hasta: range.to.to_wire(),
            contribuyente: None,
        }
    }

    /// Ordered `(key, value)` pairs, `contribuyente` last and only when set.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("desde", self.desde.as_str()), ("hasta", self.hasta.as_str())];
        if let Some(name) = &self.contribuyente {
            pairs.push(("contribuyente", name.as_str()));
        }
        pairs
    }
}

/// Result of [`QueryBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    pub variant: EndpointVariant,
    pub params: QueryParams,
}

/// Turns [`SearchCriteria`] into endpoint variant plus parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryBuilder;

impl QueryBuilder {
    /// Selects the filtered variant exactly when the criteria carry a payer name.
    ///
    /// # Examples
    ///
    /// ```
    /// use recibos::api::{EndpointVariant, QueryBuilder};
    /// use recibos::domain::{CanonicalDate, DateRange, SearchCriteria};
    ///
    /// let day = CanonicalDate::from_ymd(2025, 4, 23).unwrap();
    /// let query = QueryBuilder::build(&SearchCriteria::new(DateRange::single_day(day), Some("Acme")));
    /// assert_eq!(query.variant, EndpointVariant::FilteredByName);
    /// assert_eq!(query.params.contribuyente.as_deref(), Some("Acme"));
    /// ```
    #[must_use]
    pub fn build(criteria: &SearchCriteria) -> BuiltQuery {
        let mut params = QueryParams::for_range(&criteria.range);
        let variant = match criteria.name() {
            Some(name) => {
                params.contribuyente = Some(name.to_string());
                EndpointVariant::FilteredByName
            }
            None => EndpointVariant::All,
        };
        BuiltQuery { variant, params }
    }
}
