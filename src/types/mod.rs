mod errors;
mod money;

pub use errors::MoneyError;
pub use money::{Money, CURRENCY_SYMBOL};

pub type RowNumber = u32;
pub type BillId = String;
