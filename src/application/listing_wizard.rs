//! Multi-step listing wizard
//!
//! The current step is an explicit index; each step has its own validation,
//! dispatched on [`ListingStep`]. Only the current step is validated when
//! advancing, so untouched later steps never show errors.

use tracing::debug;
use validator::Validate;

use crate::domain::listing::{
    step_errors, BasicsForm, DetailsForm, ListingStep, LocationForm, NewListing, StepErrors,
};

#[derive(Debug, Clone, Default)]
pub struct ListingWizard {
    step: ListingStep,
    pub basics: BasicsForm,
    pub location: LocationForm,
    pub details: DetailsForm,
    errors: StepErrors,
}

impl ListingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> ListingStep {
        self.step
    }

    pub fn errors(&self) -> &StepErrors {
        &self.errors
    }

    fn validate_step(&self, step: ListingStep) -> StepErrors {
        let result = match step {
            ListingStep::Basics => self.basics.validate(),
            ListingStep::Location => self.location.validate(),
            ListingStep::Details => self.details.validate(),
            ListingStep::Review => Ok(()),
        };
        match result {
            Ok(()) => StepErrors::new(),
            Err(errors) => step_errors(&errors),
        }
    }

    /// Validate the current step and advance if it passes.
    /// Returns the step the wizard ends up on.
    pub fn next(&mut self) -> ListingStep {
        self.errors = self.validate_step(self.step);
        if !self.errors.is_empty() {
            debug!(step = ?self.step, errors = self.errors.len(), "Listing step invalid");
            return self.step;
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        self.step
    }

    /// Go back one step without validating.
    pub fn back(&mut self) -> ListingStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
            self.errors.clear();
        }
        self.step
    }

    /// From `Review`, re-check every step and produce the payload. On failure
    /// the wizard jumps to the first failing step with its errors shown.
    pub fn finish(&mut self) -> Result<NewListing, StepErrors> {
        for step in ListingStep::ALL {
            let errors = self.validate_step(step);
            if !errors.is_empty() {
                self.step = step;
                self.errors = errors.clone();
                return Err(errors);
            }
        }
        self.errors.clear();
        Ok(NewListing {
            basics: self.basics.clone(),
            location: self.location.clone(),
            details: self.details.clone(),
        })
    }
}
