mod currency;

pub use currency::CurrencyTable;

pub type DealId = String;
