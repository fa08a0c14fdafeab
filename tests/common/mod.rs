#![allow(dead_code)]

use cashprod::domain::error::CashprodError;
use cashprod::domain::month::MonthInput;
pub use cashprod::domain::product::RawProductRow;
use cashprod::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<RawProductRow>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_rows(mut self, month: &str, rows: Vec<RawProductRow>) -> Self {
        self.data.insert(month.to_string(), rows);
        self
    }

    pub fn with_error(mut self, month: &str, reason: &str) -> Self {
        self.errors.insert(month.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_rows(&self, month: &str) -> Result<Vec<RawProductRow>, CashprodError> {
        if let Some(reason) = self.errors.get(month) {
            return Err(CashprodError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(month).cloned().unwrap_or_default())
    }

    fn list_months(&self) -> Result<Vec<String>, CashprodError> {
        let mut months: Vec<String> = self.data.keys().cloned().collect();
        months.sort();
        Ok(months)
    }
}

pub fn row(name: &str, tp: f64, lt: f64) -> RawProductRow {
    RawProductRow {
        name: Some(name.to_string()),
        tp: Some(tp),
        lt: Some(lt),
    }
}

pub fn partial_row(name: Option<&str>, tp: Option<f64>, lt: Option<f64>) -> RawProductRow {
    RawProductRow {
        name: name.map(str::to_string),
        tp,
        lt,
    }
}

pub fn month_input(month: &str, rows: Vec<RawProductRow>, start: f64, end: f64) -> MonthInput {
    MonthInput {
        month: month.to_string(),
        rows,
        cash_start: start,
        cash_end: end,
    }
}
