//! Chart-of-accounts classification.
//!
//! Accounts referenced by name that do not exist yet are auto-provisioned at
//! preview time with a kind inferred from the name. Inference is heuristic
//! and deliberately conservative; a wrongly guessed kind can be corrected
//! later, a rejected posting cannot.

use serde::{Deserialize, Serialize};

/// Fundamental account type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Asset accounts (debit-normal).
    Asset,
    /// Liability accounts (credit-normal).
    Liability,
    /// Equity accounts (credit-normal).
    Equity,
    /// Income accounts (credit-normal).
    Income,
    /// Expense accounts (debit-normal).
    Expense,
}

impl AccountKind {
    /// True for debit-normal kinds (assets and expenses).
    #[must_use]
    pub const fn is_debit_normal(self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }
}

/// Functional class of an account, driving instrument hygiene and the
/// funds guard. Cash and Bank accounts are "monitored": outflows from them
/// are checked against available headroom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountClass {
    /// Physical cash ledger.
    Cash,
    /// Bank/current/OD account ledger.
    Bank,
    /// TDS payable/receivable ledger.
    Tds,
    /// GST input/output ledger.
    Gst,
    /// Everything else.
    Regular,
}

impl AccountClass {
    /// True for cash/bank instrument ledgers.
    #[must_use]
    pub const fn is_instrument(self) -> bool {
        matches!(self, Self::Cash | Self::Bank)
    }
}

/// Infers the functional class of an account from its name.
#[must_use]
pub fn infer_class(name: &str) -> AccountClass {
    let lower = name.to_lowercase();
    if lower.contains("bank") || lower.contains(" od ") || lower.ends_with(" od") {
        AccountClass::Bank
    } else if lower.contains("cash") {
        AccountClass::Cash
    } else if lower.contains("tds") {
        AccountClass::Tds
    } else if lower.contains("gst") {
        AccountClass::Gst
    } else {
        AccountClass::Regular
    }
}

/// Infers the fundamental kind of an account from its name.
///
/// Unknown names default to Expense: free-text accounts introduced by
/// day-to-day entry are overwhelmingly expense heads.
#[must_use]
pub fn infer_kind(name: &str) -> AccountKind {
    let lower = name.to_lowercase();

    match infer_class(name) {
        AccountClass::Cash | AccountClass::Bank => return AccountKind::Asset,
        AccountClass::Tds | AccountClass::Gst => {
            if lower.contains("receivable") || lower.contains("input") {
                return AccountKind::Asset;
            }
            return AccountKind::Liability;
        }
        AccountClass::Regular => {}
    }

    if lower.contains("capital") || lower.contains("drawings") {
        AccountKind::Equity
    } else if lower.contains("sales")
        || lower.contains("income")
        || lower.contains("revenue")
        || lower.contains("commission received")
    {
        AccountKind::Income
    } else if lower.contains("payable")
        || lower.contains("creditor")
        || lower.contains("loan")
        || lower.contains("duties")
    {
        AccountKind::Liability
    } else if lower.contains("receivable")
        || lower.contains("debtor")
        || lower.contains("deposit")
        || lower.contains("advance")
    {
        AccountKind::Asset
    } else {
        AccountKind::Expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_class() {
        assert_eq!(infer_class("HDFC Bank"), AccountClass::Bank);
        assert_eq!(infer_class("Petty Cash"), AccountClass::Cash);
        assert_eq!(infer_class("TDS Payable 194C"), AccountClass::Tds);
        assert_eq!(infer_class("Output CGST"), AccountClass::Gst);
        assert_eq!(infer_class("Office Expenses"), AccountClass::Regular);
    }

    #[test]
    fn test_instrument_classes() {
        assert!(AccountClass::Cash.is_instrument());
        assert!(AccountClass::Bank.is_instrument());
        assert!(!AccountClass::Tds.is_instrument());
        assert!(!AccountClass::Regular.is_instrument());
    }

    #[test]
    fn test_infer_kind() {
        assert_eq!(infer_kind("HDFC Bank"), AccountKind::Asset);
        assert_eq!(infer_kind("Petty Cash"), AccountKind::Asset);
        assert_eq!(infer_kind("TDS Payable 194C"), AccountKind::Liability);
        assert_eq!(infer_kind("Input CGST"), AccountKind::Asset);
        assert_eq!(infer_kind("Sales"), AccountKind::Income);
        assert_eq!(infer_kind("Sundry Creditors"), AccountKind::Liability);
        assert_eq!(infer_kind("Sundry Debtors"), AccountKind::Asset);
        assert_eq!(infer_kind("Partner Capital"), AccountKind::Equity);
        assert_eq!(infer_kind("Office Expenses"), AccountKind::Expense);
        assert_eq!(infer_kind("Something Unheard Of"), AccountKind::Expense);
    }

    #[test]
    fn test_normal_side() {
        assert!(AccountKind::Asset.is_debit_normal());
        assert!(AccountKind::Expense.is_debit_normal());
        assert!(!AccountKind::Liability.is_debit_normal());
        assert!(!AccountKind::Equity.is_debit_normal());
        assert!(!AccountKind::Income.is_debit_normal());
    }
}
