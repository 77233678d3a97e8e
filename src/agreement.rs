// Copyright 2025 Cowboy AI, LLC.

//! Agreement aggregate and its nested sections
//!
//! An agreement ("convênio") is a government funding arrangement between a
//! granting body and a recipient entity. Records arrive from an external
//! fetch and are read-only here: the pipeline derives narrowed collections
//! and aggregates without mutating the source.
//!
//! Every nested section may be absent — never fetched, legitimately missing,
//! or still pending creation upstream. Accessors below tolerate absence so
//! filter and statistics code does not chain `Option` walks at every call
//! site. Serde names preserve the camelCase wire shape of the upstream API.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::city::City;
use crate::predicates::contains_ci;

/// Root agreement record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Agreement {
    /// Business identifier assigned by the granting platform
    pub agreement_id: Option<String>,
    /// Display name of the agreement
    pub name: Option<String>,
    /// Proposal/award phase data
    pub proposal_data: Option<ProposalData>,
    /// Execution phase data (processes and contracts)
    pub convenient_execution: Option<ConvenientExecution>,
    /// Financial reporting/closeout phase data
    pub accountability: Option<Accountability>,
    /// Recipient company and its city
    pub company: Option<Company>,
}

/// Proposal phase container: celebration data plus funded programs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposalData {
    /// Celebration data (dates, modality, legal foundation)
    pub data: Option<CelebrationData>,
    /// Programs funded under this agreement
    #[serde(default)]
    pub programs: Vec<Program>,
}

impl ProposalData {
    /// Sum of program values, absent values counting as zero
    pub fn total_program_value(&self) -> f64 {
        self.programs
            .iter()
            .map(|program| program.value.unwrap_or(0.0))
            .sum()
    }
}

/// Celebration (proposal/award) phase data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CelebrationData {
    /// Award modality (e.g., "Convênio", "Contrato de Repasse")
    pub modality: Option<String>,
    /// Administrative process identifier
    pub process_id: Option<String>,
    /// Proposal identifier
    pub proposal_id: Option<String>,
    /// Date the proposal was published
    pub proposal_date: Option<DateTime<Utc>>,
    /// Date of the bidding session
    pub bidding_date: Option<DateTime<Utc>>,
    /// Date the award was homologated
    pub homologation_date: Option<DateTime<Utc>>,
    /// Legal foundation cited by the award
    pub legal_foundation: Option<String>,
    /// Object of the agreement
    pub object: Option<String>,
    /// Justification text
    pub justification: Option<String>,
    /// Current proposal status
    pub status: Option<ProposalStatus>,
}

/// Proposal status with the date it was reached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposalStatus {
    /// Status label (e.g., "Em execução")
    pub value: Option<String>,
    /// When the status was recorded
    pub date: Option<DateTime<Utc>>,
}

/// A program funded under an agreement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    /// Program name
    pub name: Option<String>,
    /// Monetary value granted to the program
    pub value: Option<f64>,
    /// Counterpart funding breakdown
    pub counterpart_values: Option<CounterpartValues>,
}

/// Counterpart funding contributed by the recipient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CounterpartValues {
    /// Financial counterpart value
    pub financial: Option<f64>,
    /// In-kind (assets and services) counterpart value
    pub assets_and_services: Option<f64>,
}

/// Execution phase container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvenientExecution {
    /// Procurement/operational processes undertaken during execution
    #[serde(default)]
    pub execution_processes: Vec<ExecutionProcess>,
    /// Contracts signed during execution
    #[serde(default)]
    pub contracts: Vec<Contract>,
}

/// A procurement or operational step in the execution phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionProcess {
    /// Execution identifier
    pub execution_id: Option<String>,
    /// Process type label
    #[serde(rename = "type")]
    pub process_type: Option<String>,
    /// Date the process was registered
    pub date: Option<DateTime<Utc>>,
    /// Administrative process identifier
    pub process_id: Option<String>,
    /// Process status label
    pub status: Option<String>,
    /// Status in the origin system
    pub system_status: Option<String>,
    /// Name of the origin system
    pub system_name: Option<String>,
    /// Acceptance flag label
    pub accepted: Option<String>,
    /// Classifying detail for the process
    pub details: Option<ExecutionProcessDetails>,
}

/// Detail block classifying an execution process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionProcessDetails {
    /// Execution type classification (e.g., "Licitação")
    pub execution_process: Option<String>,
}

/// A contract attached to the execution phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    /// Contract detail block
    pub details: Option<ContractDetails>,
}

/// Contract details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContractDetails {
    /// Date the contract ends
    pub end_date: Option<DateTime<Utc>>,
}

/// Accountability phase container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Accountability {
    /// Accountability report data
    pub data: Option<AccountabilityData>,
}

/// Accountability (financial closeout) report data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountabilityData {
    /// Granting organ, usually "<code> - <name>"
    pub organ: Option<String>,
    /// Convenient (recipient) party
    pub convenient: Option<String>,
    /// Report document number
    pub document_number: Option<String>,
    /// Accountability modality
    pub modality: Option<String>,
    /// Report status label
    pub status: Option<String>,
    /// Report number
    pub number: Option<String>,
    /// Validity range as a single "<start> a <end>" string
    pub validity: Option<String>,
    /// Deadline for submitting the report
    pub limit_date: Option<DateTime<Utc>>,
    /// Total reported value
    pub total_value: Option<f64>,
    /// Transferred value
    pub transfer_value: Option<f64>,
    /// Counterpart value
    pub counterpart_value: Option<f64>,
    /// Yield (investment income) value
    pub yield_value: Option<f64>,
}

/// Recipient company section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Government sphere (e.g., "Municipal")
    pub sphere: Option<String>,
    /// Identifier of the company's city record
    pub city_id: Option<String>,
    /// City of the company
    pub city: Option<City>,
}

impl Agreement {
    /// Celebration data, if the proposal section carries it
    pub fn celebration(&self) -> Option<&CelebrationData> {
        self.proposal_data.as_ref()?.data.as_ref()
    }

    /// Accountability report data, if present
    pub fn accountability_data(&self) -> Option<&AccountabilityData> {
        self.accountability.as_ref()?.data.as_ref()
    }

    /// Execution processes; empty when the execution section is absent
    pub fn execution_processes(&self) -> &[ExecutionProcess] {
        self.convenient_execution
            .as_ref()
            .map(|execution| execution.execution_processes.as_slice())
            .unwrap_or_default()
    }

    /// Contracts; empty when the execution section is absent
    pub fn contracts(&self) -> &[Contract] {
        self.convenient_execution
            .as_ref()
            .map(|execution| execution.contracts.as_slice())
            .unwrap_or_default()
    }

    /// City of the recipient company, if known
    pub fn city(&self) -> Option<&City> {
        self.company.as_ref()?.city.as_ref()
    }

    /// Accountability limit date, if present
    pub fn limit_date(&self) -> Option<DateTime<Utc>> {
        self.accountability_data()?.limit_date
    }

    /// Celebration status label, if present
    pub fn status_value(&self) -> Option<&str> {
        self.celebration()?.status.as_ref()?.value.as_deref()
    }

    /// Sum of program values for aggregation; absent data counts as zero
    pub fn total_program_value(&self) -> f64 {
        self.proposal_data
            .as_ref()
            .map(ProposalData::total_program_value)
            .unwrap_or(0.0)
    }

    /// Sum of program values for filter comparison; `None` when the
    /// proposal section is absent (a missing value, not a zero one)
    pub fn summed_program_value(&self) -> Option<f64> {
        self.proposal_data
            .as_ref()
            .map(ProposalData::total_program_value)
    }

    /// Whether the celebration modality contains `needle` (case-insensitive)
    pub fn modality_contains(&self, needle: &str) -> bool {
        contains_ci(
            self.celebration().and_then(|data| data.modality.as_deref()),
            Some(needle),
        )
    }

    /// Whether the celebration status contains `needle` (case-insensitive)
    pub fn status_contains(&self, needle: &str) -> bool {
        contains_ci(self.status_value(), Some(needle))
    }

    /// Whether any execution process is classified with `needle`
    /// (case-insensitive, against the process detail block)
    pub fn has_process_classified(&self, needle: &str) -> bool {
        self.execution_processes().iter().any(|process| {
            contains_ci(
                process
                    .details
                    .as_ref()
                    .and_then(|details| details.execution_process.as_deref()),
                Some(needle),
            )
        })
    }

    /// Whether any contract has ended strictly before `now`
    pub fn has_contract_ended_by(&self, now: DateTime<Utc>) -> bool {
        self.contracts().iter().any(|contract| {
            contract
                .details
                .as_ref()
                .and_then(|details| details.end_date)
                .is_some_and(|end| end < now)
        })
    }

    /// Whether any program carries a positive financial counterpart
    pub fn has_financial_counterpart(&self) -> bool {
        self.programs().iter().any(|program| {
            program
                .counterpart_values
                .as_ref()
                .and_then(|values| values.financial)
                .is_some_and(|value| value > 0.0)
        })
    }

    /// Whether any program carries a positive assets-and-services counterpart
    pub fn has_assets_counterpart(&self) -> bool {
        self.programs().iter().any(|program| {
            program
                .counterpart_values
                .as_ref()
                .and_then(|values| values.assets_and_services)
                .is_some_and(|value| value > 0.0)
        })
    }

    /// Programs; empty when the proposal section is absent
    pub fn programs(&self) -> &[Program] {
        self.proposal_data
            .as_ref()
            .map(|proposal| proposal.programs.as_slice())
            .unwrap_or_default()
    }
}
