mod document;
mod graph;

use crate::*;
use chrono::NaiveDate;

pub(crate) fn account(owner: &str, account_id: &str) -> Account {
    Account {
        owner_name: owner.to_string(),
        owner_family_name: "Ahmadi".to_string(),
        account_id: account_id.to_string(),
        branch_name: "Central".to_string(),
        branch_address: String::new(),
        branch_telephone: String::new(),
        sheba: String::new(),
        card_id: String::new(),
        account_type: AccountType::Savings,
        transaction_count: 0,
    }
}

pub(crate) fn transfer(from: &str, to: &str, amount: u64) -> Transaction {
    Transaction {
        source_account: from.to_string(),
        destination_account: to.to_string(),
        amount,
        date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        transaction_id: format!("{from}-{to}"),
        transaction_type: TransactionType::Paya,
    }
}

/// Node of the default size (270x80).
pub(crate) fn at(x: f64, y: f64) -> Geometry {
    Geometry::new(x, y, 270.0, 80.0)
}

/// Jitter source that always yields a zero offset.
pub(crate) fn centered() -> impl FnMut() -> f64 {
    || 0.5
}
