//! Client ledger: entity, payment status, form validation, and summaries.
//!
//! The pending balance is never stored. It is derived as budget minus
//! received on every read, so a stale stored figure can never disagree
//! with the two source fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::datekey::lenient_date;
use crate::error::CoreError;
use crate::numeric::{parse_non_negative, parse_positive, RawAmount};
use crate::types::Keyed;
use crate::view::{RecordFilter, SortValue, ViewRecord};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentType {
    #[default]
    Cash,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    #[serde(rename = "UPI")]
    Upi,
    Check,
    #[serde(rename = "Credit Card")]
    CreditCard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentStatus {
    Paid,
    Pending,
}

/// A client document under `projects/{id}/clients`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub name: String,
    pub contact: String,
    pub budget: RawAmount,
    pub received: RawAmount,
    #[serde(default)]
    pub payment_type: PaymentType,
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_date", skip_serializing_if = "Option::is_none")]
    pub join_date: Option<NaiveDate>,
}

impl Client {
    /// Outstanding balance, derived on read. Malformed fields count as
    /// zero, so a record with an unreadable budget shows its received
    /// amount as overpayment rather than disappearing.
    pub fn pending(&self) -> f64 {
        self.budget.or_zero() - self.received.or_zero()
    }

    /// Paid once nothing is outstanding.
    pub fn status(&self) -> PaymentStatus {
        if self.pending() <= 0.0 {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Pending
        }
    }
}

// ---------------------------------------------------------------------------
// Form input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientForm {
    pub name: String,
    pub contact: String,
    pub budget: String,
    pub received: String,
    pub payment_type: PaymentType,
    pub address: String,
    pub join_date: Option<NaiveDate>,
}

impl ClientForm {
    /// Field checks run in form order, then the cross-field check. An
    /// empty received amount is treated as zero.
    pub fn into_record(self) -> Result<Client, CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("Client name is required".into()));
        }
        if self.contact.trim().is_empty() {
            return Err(CoreError::Validation("Contact number is required".into()));
        }
        let budget = parse_positive(&self.budget, "Valid budget amount is required")?;
        let received = if self.received.trim().is_empty() {
            0.0
        } else {
            parse_non_negative(&self.received, "Valid received amount is required")?
        };
        if received > budget {
            return Err(CoreError::Validation(
                "Received amount cannot be greater than budget".into(),
            ));
        }

        Ok(Client {
            name: self.name.trim().to_string(),
            contact: self.contact.trim().to_string(),
            budget: RawAmount::Number(budget),
            received: RawAmount::Number(received),
            payment_type: self.payment_type,
            address: self.address.trim().to_string(),
            join_date: self.join_date,
        })
    }
}

// ---------------------------------------------------------------------------
// View integration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientSortKey {
    Name,
    Budget,
    Received,
    Pending,
}

impl ViewRecord for Client {
    type SortKey = ClientSortKey;

    fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.contact.to_lowercase().contains(needle)
    }

    fn sort_value(&self, key: ClientSortKey) -> SortValue {
        match key {
            ClientSortKey::Name => SortValue::Text(self.name.clone()),
            ClientSortKey::Budget => SortValue::Amount(self.budget.sort_rank()),
            ClientSortKey::Received => SortValue::Amount(self.received.sort_rank()),
            ClientSortKey::Pending => SortValue::Amount(self.pending()),
        }
    }
}

/// Ledger filter; `None` matches both payment states.
#[derive(Debug, Clone, Default)]
pub struct ClientFilter {
    pub status: Option<PaymentStatus>,
}

impl RecordFilter<Client> for ClientFilter {
    fn accept(&self, client: &Client) -> bool {
        self.status.map_or(true, |status| client.status() == status)
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientSummary {
    pub total_clients: usize,
    pub total_budget: f64,
    pub total_received: f64,
    pub total_pending: f64,
    /// Received as a share of budget, 0 when there is no budget.
    pub payment_progress_percent: f64,
}

/// Aggregate the full ledger, independent of any view filter.
pub fn summarize(clients: &[Keyed<Client>]) -> ClientSummary {
    let total_budget: f64 = clients.iter().map(|c| c.record.budget.or_zero()).sum();
    let total_received: f64 = clients.iter().map(|c| c.record.received.or_zero()).sum();
    let payment_progress_percent = if total_budget > 0.0 {
        total_received / total_budget * 100.0
    } else {
        0.0
    };

    ClientSummary {
        total_clients: clients.len(),
        total_budget,
        total_received,
        total_pending: total_budget - total_received,
        payment_progress_percent,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
