//! Listing aggregate (host side)

pub mod model;

pub use model::{
    step_errors, BasicsForm, DetailsForm, ListingStep, LocationForm, NewListing, PropertyType,
    StepErrors,
};
