use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Deposit,
    Current,
    Savings,
}

impl AccountType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Current => "current",
            Self::Savings => "savings",
        }
    }
}

/// Payload of an account node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub owner_name: String,
    pub owner_family_name: String,
    /// Bank-side account number (not the diagram node id).
    pub account_id: String,
    pub branch_name: String,
    #[serde(default)]
    pub branch_address: String,
    #[serde(default)]
    pub branch_telephone: String,
    /// IBAN-formatted account number.
    #[serde(default)]
    pub sheba: String,
    #[serde(default)]
    pub card_id: String,
    pub account_type: AccountType,
    #[serde(default)]
    pub transaction_count: u32,
}

impl Account {
    pub fn owner_full_name(&self) -> String {
        match (self.owner_name.trim(), self.owner_family_name.trim()) {
            ("", family) => family.to_string(),
            (name, "") => name.to_string(),
            (name, family) => format!("{name} {family}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Batch interbank transfer.
    Paya,
    /// Real-time gross settlement transfer.
    Satna,
    CardToCard,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paya => "paya",
            Self::Satna => "satna",
            Self::CardToCard => "card_to_card",
        }
    }
}

/// Payload of a transaction edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub source_account: String,
    pub destination_account: String,
    /// Amount in minor currency units.
    pub amount: u64,
    pub date: NaiveDate,
    pub transaction_id: String,
    pub transaction_type: TransactionType,
}
