use ruleview_core::{
    PatternValidationRequest, PatternValidationResult, PatternValidator, RuleViewError,
};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone)]
pub enum FakeValidationOutcome {
    Success(PatternValidationResult),
    Error(String),
}

impl FakeValidationOutcome {
    fn to_result(&self) -> Result<PatternValidationResult, RuleViewError> {
        match self {
            Self::Success(result) => Ok(result.clone()),
            Self::Error(message) => Err(RuleViewError::ValidationFailed(message.clone())),
        }
    }
}

#[derive(Default)]
struct FakeValidatorState {
    outcome: Mutex<Option<FakeValidationOutcome>>,
    requests: Mutex<Vec<PatternValidationRequest>>,
}

/// Validator returning a scripted outcome and recording every request.
#[derive(Clone, Default)]
pub struct FakeValidator {
    state: Arc<FakeValidatorState>,
}

impl FakeValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(self, result: PatternValidationResult) -> Self {
        *lock(&self.state.outcome) = Some(FakeValidationOutcome::Success(result));
        self
    }

    pub fn with_error(self, message: impl Into<String>) -> Self {
        *lock(&self.state.outcome) = Some(FakeValidationOutcome::Error(message.into()));
        self
    }

    pub fn requests(&self) -> Vec<PatternValidationRequest> {
        lock(&self.state.requests).clone()
    }
}

impl PatternValidator for FakeValidator {
    fn validate(
        &self,
        request: &PatternValidationRequest,
    ) -> Result<PatternValidationResult, RuleViewError> {
        lock(&self.state.requests).push(request.clone());

        match lock(&self.state.outcome).as_ref() {
            Some(outcome) => outcome.to_result(),
            None => Ok(PatternValidationResult::empty()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
