// Copyright 2025 Cowboy AI, LLC.

//! Query facade for HTTP-layer callers
//!
//! Queries are requests to read state. The handler here is the seam a
//! transport layer calls into: it holds a request-scoped read model of
//! agreement records and delegates to the pure filter/statistics/ranking
//! pipeline, so the transport never touches the pipeline directly.

use std::fmt::Debug;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agreement::Agreement;
use crate::errors::{DomainError, DomainResult};
use crate::filter::{filter_agreements, FilterSpec};
use crate::pending::find_pending_agreements;
use crate::ranking::RankedEntry;
use crate::statistics::{build_statistics, StatisticsReport};

/// Marker trait for queries
pub trait Query: Debug + Send + Sync {}

/// Filter the agreement collection and aggregate statistics over the result
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterAgreements {
    /// Filter criteria groups
    pub filters: FilterSpec,
}

impl Query for FilterAgreements {}

/// Rank cities by overdue agreements
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FindPendingAgreements;

impl Query for FindPendingAgreements {}

/// Find the agreement with the earliest bidding date
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FindOldestAgreement;

impl Query for FindOldestAgreement {}

/// Response contract for a filter query: the statistics object, the
/// narrowed collection, and its size (the `X-Total-Count` a REST layer
/// surfaces as a header)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgreementsQueryResult {
    /// Statistics aggregated over the narrowed collection
    pub statistics: StatisticsReport,
    /// The narrowed collection, in encounter order
    pub agreements: Vec<Agreement>,
    /// Size of the narrowed collection
    pub total_count: usize,
}

/// Query handler trait that returns data directly
pub trait DirectQueryHandler<Q: Query, R> {
    /// Handle the query and return the result
    fn handle(&self, query: Q) -> DomainResult<R>;
}

/// In-memory, insertion-ordered read model of agreement records
///
/// Holds the collection snapshot fetched for a request. Iteration order is
/// load order, which the stable filter pipeline preserves downstream.
#[derive(Debug, Clone, Default)]
pub struct AgreementReadModel {
    storage: IndexMap<Uuid, Agreement>,
}

impl AgreementReadModel {
    /// Create an empty read model
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a read model from a fetched collection, preserving order
    pub fn from_agreements(agreements: impl IntoIterator<Item = Agreement>) -> Self {
        let mut model = Self::new();
        for agreement in agreements {
            model.insert(agreement);
        }
        model
    }

    /// Insert an agreement, returning its read-model key
    pub fn insert(&mut self, agreement: Agreement) -> Uuid {
        let id = Uuid::new_v4();
        self.storage.insert(id, agreement);
        id
    }

    /// Get an agreement by read-model key
    pub fn get(&self, id: &Uuid) -> Option<&Agreement> {
        self.storage.get(id)
    }

    /// All agreements in load order
    pub fn all(&self) -> Vec<Agreement> {
        self.storage.values().cloned().collect()
    }

    /// Number of loaded agreements
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether the read model is empty
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

/// Query handler over an agreement read model
#[derive(Debug, Clone, Default)]
pub struct AgreementQueryHandler {
    read_model: AgreementReadModel,
}

impl AgreementQueryHandler {
    /// Create a handler over a loaded read model
    pub fn new(read_model: AgreementReadModel) -> Self {
        Self { read_model }
    }

    /// The underlying read model
    pub fn read_model(&self) -> &AgreementReadModel {
        &self.read_model
    }
}

impl DirectQueryHandler<FilterAgreements, AgreementsQueryResult> for AgreementQueryHandler {
    #[tracing::instrument(skip(self, query), fields(loaded = self.read_model.len()))]
    fn handle(&self, query: FilterAgreements) -> DomainResult<AgreementsQueryResult> {
        let agreements = filter_agreements(self.read_model.all(), &query.filters);
        let statistics = build_statistics(&agreements);
        let total_count = agreements.len();

        Ok(AgreementsQueryResult {
            statistics,
            agreements,
            total_count,
        })
    }
}

impl DirectQueryHandler<FindPendingAgreements, Vec<RankedEntry>> for AgreementQueryHandler {
    #[tracing::instrument(skip(self, _query), fields(loaded = self.read_model.len()))]
    fn handle(&self, _query: FindPendingAgreements) -> DomainResult<Vec<RankedEntry>> {
        Ok(find_pending_agreements(&self.read_model.all()))
    }
}

impl DirectQueryHandler<FindOldestAgreement, Agreement> for AgreementQueryHandler {
    #[tracing::instrument(skip(self, _query), fields(loaded = self.read_model.len()))]
    fn handle(&self, _query: FindOldestAgreement) -> DomainResult<Agreement> {
        self.read_model
            .storage
            .values()
            .filter(|agreement| {
                agreement
                    .celebration()
                    .and_then(|data| data.bidding_date)
                    .is_some()
            })
            .min_by_key(|agreement| agreement.celebration().and_then(|data| data.bidding_date))
            .cloned()
            .ok_or_else(|| DomainError::NotFound("no agreement with a bidding date".to_string()))
    }
}
