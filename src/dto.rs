// Request and response shapes
//
// Field names are a stable wire contract: address, bankName, countryISO2,
// countryName, isHeadquarter, swiftCode, branches, swiftCodes.

use crate::entities::{Bank, BankBranch, Country};
use serde::{Deserialize, Serialize};

fn trimmed(address: &Option<String>) -> String {
    address.as_deref().map(str::trim).unwrap_or_default().to_string()
}

// ============================================================================
// REQUEST
// ============================================================================

/// Bank record submitted for registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankRecord {
    #[serde(default)]
    pub address: Option<String>,
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub is_headquarter: bool,
    pub swift_code: String,
}

impl BankRecord {
    pub fn to_bank(&self, country: &Country) -> Bank {
        Bank::new(
            self.swift_code.clone(),
            self.bank_name.clone(),
            self.address.clone(),
            country.iso2.clone(),
        )
    }

    pub fn to_branch(&self, country: &Country, headquarter: &Bank) -> BankBranch {
        BankBranch::new(
            self.swift_code.clone(),
            self.bank_name.clone(),
            self.address.clone(),
            country.iso2.clone(),
            headquarter.swift_code.clone(),
        )
    }
}

// ============================================================================
// RESPONSES
// ============================================================================

/// One entry of a `branches` or `swiftCodes` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleBank {
    pub address: String,
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub is_headquarter: bool,
    pub swift_code: String,
}

impl From<&Bank> for SingleBank {
    fn from(bank: &Bank) -> Self {
        Self {
            address: trimmed(&bank.address),
            bank_name: bank.name.clone(),
            country_iso2: bank.country_iso2.clone(),
            is_headquarter: bank.is_headquarter(),
            swift_code: bank.swift_code.clone(),
        }
    }
}

impl From<&BankBranch> for SingleBank {
    fn from(branch: &BankBranch) -> Self {
        Self {
            address: trimmed(&branch.address),
            bank_name: branch.name.clone(),
            country_iso2: branch.country_iso2.clone(),
            is_headquarter: branch.is_headquarter(),
            swift_code: branch.swift_code.clone(),
        }
    }
}

/// Headquarter lookup result, with its branches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankSummary {
    pub address: String,
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub is_headquarter: bool,
    pub swift_code: String,
    pub branches: Vec<SingleBank>,
}

impl BankSummary {
    pub fn new(bank: &Bank, country_name: &str, branches: &[BankBranch]) -> Self {
        Self {
            address: trimmed(&bank.address),
            bank_name: bank.name.clone(),
            country_iso2: bank.country_iso2.clone(),
            country_name: country_name.to_string(),
            is_headquarter: bank.is_headquarter(),
            swift_code: bank.swift_code.clone(),
            branches: branches.iter().map(SingleBank::from).collect(),
        }
    }
}

/// Branch lookup result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchSummary {
    pub address: String,
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub is_headquarter: bool,
    pub swift_code: String,
}

impl BranchSummary {
    pub fn new(branch: &BankBranch, country_name: &str) -> Self {
        Self {
            address: trimmed(&branch.address),
            bank_name: branch.name.clone(),
            country_iso2: branch.country_iso2.clone(),
            country_name: country_name.to_string(),
            is_headquarter: branch.is_headquarter(),
            swift_code: branch.swift_code.clone(),
        }
    }
}

/// Result of a lookup by SWIFT code; the shape depends on the code's suffix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SwiftCodeSummary {
    Headquarter(BankSummary),
    Branch(BranchSummary),
}

/// Lookup by country: every headquarter first, then every branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySummary {
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub swift_codes: Vec<SingleBank>,
}

impl CountrySummary {
    pub fn new(country: &Country, banks: &[Bank], branches: &[BankBranch]) -> Self {
        let swift_codes = banks
            .iter()
            .map(SingleBank::from)
            .chain(branches.iter().map(SingleBank::from))
            .collect();

        Self {
            country_iso2: country.iso2.clone(),
            country_name: country.name.clone(),
            swift_codes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bank_record_field_names() {
        let record: BankRecord = serde_json::from_value(json!({
            "address": "Address bank name A",
            "bankName": "Test bank headquarter name A",
            "countryISO2": "AA",
            "countryName": "ACOUNTRY",
            "isHeadquarter": true,
            "swiftCode": "ABCD1234XXX"
        }))
        .unwrap();

        assert_eq!(record.country_iso2, "AA");
        assert!(record.is_headquarter);
        assert_eq!(record.address.as_deref(), Some("Address bank name A"));
    }

    #[test]
    fn test_bank_record_address_optional() {
        let record: BankRecord = serde_json::from_value(json!({
            "bankName": "Test",
            "countryISO2": "AA",
            "countryName": "ACOUNTRY",
            "isHeadquarter": false,
            "swiftCode": "ABCD1234X22"
        }))
        .unwrap();

        assert!(record.address.is_none());
    }

    #[test]
    fn test_summary_trims_address() {
        let bank = Bank::new("ABCD1234XXX", "Bank", Some("  Main St 1  ".to_string()), "AA");
        let branch = BankBranch::new("ABCD1234X22", "Branch", None, "AA", "ABCD1234XXX");

        let summary = BankSummary::new(&bank, "ACOUNTRY", &[branch]);

        assert_eq!(summary.address, "Main St 1");
        assert_eq!(summary.branches[0].address, "");
        assert!(!summary.branches[0].is_headquarter);
    }

    #[test]
    fn test_headquarter_summary_json_shape() {
        let bank = Bank::new("ABCD1234XXX", "Bank", None, "AA");
        let summary = SwiftCodeSummary::Headquarter(BankSummary::new(&bank, "ACOUNTRY", &[]));

        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(
            value,
            json!({
                "address": "",
                "bankName": "Bank",
                "countryISO2": "AA",
                "countryName": "ACOUNTRY",
                "isHeadquarter": true,
                "swiftCode": "ABCD1234XXX",
                "branches": []
            })
        );
    }

    #[test]
    fn test_country_summary_puts_banks_before_branches() {
        let country = Country::new("AA", "ACOUNTRY", "Europe/London");
        let banks = vec![Bank::new("ABCD1234XXX", "Bank", None, "AA")];
        let branches = vec![BankBranch::new("ABCD1234X22", "Branch", None, "AA", "ABCD1234XXX")];

        let summary = CountrySummary::new(&country, &banks, &branches);
        let codes: Vec<&str> = summary.swift_codes.iter().map(|s| s.swift_code.as_str()).collect();

        assert_eq!(codes, vec!["ABCD1234XXX", "ABCD1234X22"]);

        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("swiftCodes").is_some());
        assert!(value["swiftCodes"][0].get("countryName").is_none());
    }
}
