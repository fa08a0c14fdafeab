//! Month data access port trait.

use crate::domain::error::CashprodError;
use crate::domain::product::RawProductRow;

pub trait DataPort {
    /// The product rows entered for a month. A month with no data yet is an
    /// empty list, not an error.
    fn fetch_rows(&self, month: &str) -> Result<Vec<RawProductRow>, CashprodError>;

    /// Months for which data exists.
    fn list_months(&self) -> Result<Vec<String>, CashprodError>;
}
