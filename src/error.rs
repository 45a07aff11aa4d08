use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("The uploaded file does not match the expected format. Missing column(s): {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Row {row}: could not parse date '{value}'")]
    DateParse { row: usize, value: String },

    #[error("Row {row}: unknown shift '{value}' (expected Morning or Night)")]
    InvalidShift { row: usize, value: String },

    #[error("Row {row}: invalid sales figure '{value}'")]
    InvalidSales { row: usize, value: String },

    #[error("Sales target must be a finite number, got {value}")]
    InvalidTarget { value: f64 },

    #[error("{slot} would need {needed} employees, more than the limit of {limit}")]
    HeadcountTooLarge { slot: String, needed: u32, limit: u32 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RosterResult<T> = Result<T, RosterError>;
