//! Simulated mortgage data for the KEYSTONE reference handlers.
//!
//! All data in this module is hardcoded and fictional. No external systems are
//! contacted. It stands in for the lender's servicing and origination systems.
//!
//! Results render through `Display` as mapping/list literals, e.g.
//! `{'account_number': '12345', 'interest_rate': 4.5, ...}`, which is the
//! text the orchestration runtime hands back to the calling agent.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(d) => d,
        None => panic!("invalid mock date"),
    }
}

const MATURITY_DATE: NaiveDate = date(2030, 6, 30);
const LAST_PAYMENT_DATE: NaiveDate = date(2024, 6, 1);
const NEXT_PAYMENT_DUE: NaiveDate = date(2024, 7, 1);

/// Write `s` as a quoted string literal in mapping-literal form.
///
/// Single quotes are used unless `s` contains a single quote and no double
/// quote. Backslashes, the chosen quote, `\n`, `\r` and `\t` are
/// backslash-escaped; other control characters become `\xNN`, `\uNNNN` or
/// `\UNNNNNNNN`.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    write!(f, "{}", quote)?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => write!(f, "\\{}", c)?,
            c if c.is_control() => match c as u32 {
                n @ 0..=0xff => write!(f, "\\x{:02x}", n)?,
                n @ 0x100..=0xffff => write!(f, "\\u{:04x}", n)?,
                n => write!(f, "\\U{:08x}", n)?,
            },
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "{}", quote)
}

// ── Existing mortgage (mock) ──────────────────────────────────────────────────

/// Servicing details for one mortgage account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageDetails {
    pub account_number: String,
    pub outstanding_principal: f64,
    /// Annual rate, in percent.
    pub interest_rate: f64,
    pub maturity_date: NaiveDate,
    pub payments_remaining: u32,
    pub last_payment_date: NaiveDate,
    pub next_payment_due: NaiveDate,
    pub next_payment_amount: f64,
}

impl fmt::Display for MortgageDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{'account_number': ")?;
        write_quoted(f, &self.account_number)?;
        write!(
            f,
            ", 'outstanding_principal': {:?}, 'interest_rate': {:?}, \
             'maturity_date': '{}', 'payments_remaining': {}, \
             'last_payment_date': '{}', 'next_payment_due': '{}', \
             'next_payment_amount': {:?}}}",
            self.outstanding_principal,
            self.interest_rate,
            self.maturity_date,
            self.payments_remaining,
            self.last_payment_date,
            self.next_payment_due,
            self.next_payment_amount,
        )
    }
}

/// Return the mock mortgage record for `customer_id`.
///
/// Every field except `account_number` is a fixed constant.
pub fn get_existing_mortgage_details(customer_id: &str) -> MortgageDetails {
    MortgageDetails {
        account_number: customer_id.to_string(),
        outstanding_principal: 150_000.0,
        interest_rate: 4.5,
        maturity_date: MATURITY_DATE,
        payments_remaining: 72,
        last_payment_date: LAST_PAYMENT_DATE,
        next_payment_due: NEXT_PAYMENT_DUE,
        next_payment_amount: 1_250.0,
    }
}

// ── Application documents (mock) ──────────────────────────────────────────────

/// Documents a mortgage application must collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    ProofOfIncome,
    EmploymentInformation,
    ProofOfAssets,
    CreditInformation,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::ProofOfIncome => "proof_of_income",
            DocumentType::EmploymentInformation => "employment_information",
            DocumentType::ProofOfAssets => "proof_of_assets",
            DocumentType::CreditInformation => "credit_information",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Completed,
    Missing,
    PendingReview,
    Rejected,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Completed => "COMPLETED",
            DocumentStatus::Missing => "MISSING",
            DocumentStatus::PendingReview => "PENDING_REVIEW",
            DocumentStatus::Rejected => "REJECTED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStatusRecord {
    #[serde(rename = "type")]
    pub document_type: DocumentType,
    pub status: DocumentStatus,
}

impl fmt::Display for DocumentStatusRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{'type': '{}', 'status': '{}'}}",
            self.document_type.as_str(),
            self.status.as_str()
        )
    }
}

/// Ordered document checklist for one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentChecklist(pub Vec<DocumentStatusRecord>);

impl DocumentChecklist {
    /// Documents still outstanding (anything not `Completed`).
    pub fn outstanding(&self) -> impl Iterator<Item = &DocumentStatusRecord> {
        self.0.iter().filter(|r| r.status != DocumentStatus::Completed)
    }
}

impl fmt::Display for DocumentChecklist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, record) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", record)?;
        }
        f.write_str("]")
    }
}

/// Return the mock document checklist. Identical for every customer.
pub fn get_mortgage_application_document_status(_customer_id: &str) -> DocumentChecklist {
    let record = |document_type, status| DocumentStatusRecord {
        document_type,
        status,
    };

    DocumentChecklist(vec![
        record(DocumentType::ProofOfIncome, DocumentStatus::Completed),
        record(DocumentType::EmploymentInformation, DocumentStatus::Missing),
        record(DocumentType::ProofOfAssets, DocumentStatus::Completed),
        record(DocumentType::CreditInformation, DocumentStatus::Completed),
    ])
}
