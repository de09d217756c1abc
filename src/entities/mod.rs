// Entity Models
//
// Each record is identified by a natural key:
// - Country by its ISO2 code
// - Bank and BankBranch by their SWIFT code

pub mod bank;
pub mod country;

pub use bank::{
    headquarter_code_for, is_headquarter, Bank, BankBranch, HEADQUARTER_SUFFIX,
    INSTITUTION_PREFIX_LEN,
};
pub use country::Country;
