pub mod constants;
pub mod side_effects;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
