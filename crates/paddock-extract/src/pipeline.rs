//! The ordered validation pipeline.

use crate::context::Request;
use crate::error::ParameterError;
use crate::parameters::ParameterSet;
use crate::validator::Validator;

/// An ordered list of validators applied to a request's query string.
///
/// An empty query value is treated the same as an absent one.
#[derive(Debug, Clone, Default)]
pub struct ParameterPipeline {
    validators: Vec<Validator>,
}

impl ParameterPipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a validator.
    #[must_use]
    pub fn with(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Appends a validator in place.
    pub fn push(&mut self, validator: Validator) {
        self.validators.push(validator);
    }

    /// Returns the validators in application order.
    #[must_use]
    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Returns true if the pipeline has no validators.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Builds the parameter set for a request.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::RequiredMissing`] when a required validator
    /// finds no value. Values failing validation are collected in
    /// [`ParameterSet::errors`] instead.
    pub fn build(&self, request: &Request) -> Result<ParameterSet, ParameterError> {
        let mut set = ParameterSet::new(request.path_params().clone());

        for validator in &self.validators {
            let raw = request.query(validator.name()).filter(|raw| !raw.is_empty());
            match raw {
                None if validator.is_required() => {
                    return Err(ParameterError::required_missing(validator.name()));
                }
                None => {
                    if let Some(default) = validator.default() {
                        set.record_valid(validator.name(), validator.alias_name(), default.clone());
                    }
                }
                Some(raw) => match validator.check(raw) {
                    Ok(value) => set.record_valid(validator.name(), validator.alias_name(), value),
                    Err(message) => set.record_error(validator.name(), message),
                },
            }
        }

        if !set.is_valid() {
            tracing::debug!(errors = set.errors().len(), "query parameters failed validation");
        }
        Ok(set)
    }
}
