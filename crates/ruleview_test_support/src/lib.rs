pub mod fake_validator;
pub mod fixtures;

pub use fake_validator::{FakeValidationOutcome, FakeValidator};
