mod deal_validator;
mod rules;
#[cfg(test)]
mod tests;

pub use deal_validator::DealValidator;
