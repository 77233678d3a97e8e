//! # Agreements Domain
//!
//! Core domain model and read-side pipeline for tracking government funding
//! agreements ("convênios"): the agreement data model, a composable
//! filtering pipeline, a statistics aggregator, and a pending-agreement
//! city ranking.
//!
//! This crate provides the building blocks a REST layer composes:
//! - **Agreement**: the root record with its optional nested phases
//!   (celebration, execution, accountability, company)
//! - **Predicates**: primitive comparison functions tolerant of absent data
//! - **Filter pipeline**: fixed-order AND-narrowing stages driven by a
//!   [`FilterSpec`]
//! - **Statistics**: category totals, top-ten organ ranking, counterpart
//!   classification, trimester bucketing
//! - **Pending ranker**: top-ten cities by overdue agreements
//! - **Queries**: the handler seam transport layers call into
//!
//! ## Design Principles
//!
//! 1. **Totality**: every pipeline function is total over the input shape —
//!    absent sections fail positive matches and contribute zero to sums,
//!    never panic
//! 2. **Purity**: filtering and aggregation are side-effect-free
//!    derivations; source records are never mutated
//! 3. **Stability**: filtering preserves encounter order, and ranking ties
//!    keep first-encounter order
//! 4. **Boundary parsing**: string-backed criteria (bounds, validity
//!    ranges) are parsed in one place so the pipeline operates on
//!    structured values

#![warn(missing_docs)]

mod agreement;
mod city;
mod errors;
mod pending;
mod queries;
mod ranking;
mod statistics;

pub mod filter;
pub mod predicates;

// Re-export core types
pub use agreement::{
    Accountability, AccountabilityData, Agreement, CelebrationData, Company, Contract,
    ContractDetails, ConvenientExecution, CounterpartValues, ExecutionProcess,
    ExecutionProcessDetails, Program, ProposalData, ProposalStatus,
};
pub use city::City;
pub use errors::{DomainError, DomainResult};
pub use filter::{
    filter_agreements, filter_agreements_at, AccountabilityFilter, CelebrationFilter,
    ExecutionFilter, FilterPreset, FilterSpec, RangeBounds, ScopeFilter,
};
pub use pending::{build_pending_agreements, find_pending_agreements};
pub use queries::{
    AgreementQueryHandler, AgreementReadModel, AgreementsQueryResult, DirectQueryHandler,
    FilterAgreements, FindOldestAgreement, FindPendingAgreements, Query,
};
pub use ranking::{percentage_of, rank_by_frequency, RankedEntry, TOP_RANK_LIMIT};
pub use statistics::{
    build_statistics, build_statistics_at, CategoryTotal, CounterpartBreakdown, StatisticsReport,
};
