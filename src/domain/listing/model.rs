//! Host listing forms, one per wizard step

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::shared::validations::{validate_not_blank, validate_pin_code};

/// Wizard steps, in order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ListingStep {
    #[default]
    Basics,
    Location,
    Details,
    Review,
}

impl ListingStep {
    pub const ALL: [ListingStep; 4] = [Self::Basics, Self::Location, Self::Details, Self::Review];

    pub fn index(&self) -> usize {
        match self {
            Self::Basics => 0,
            Self::Location => 1,
            Self::Details => 2,
            Self::Review => 3,
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(&self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Villa,
    Cabin,
    Room,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BasicsForm {
    #[validate(length(min = 5, max = 100, message = "Title must be between 5 and 100 characters"))]
    pub title: String,
    #[validate(length(min = 20, message = "Description must be at least 20 characters"))]
    pub description: String,
    #[validate(required(message = "Property type is required"))]
    pub property_type: Option<PropertyType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LocationForm {
    #[validate(custom(function = "validate_not_blank", message = "Address is required"))]
    pub address: String,
    #[validate(custom(function = "validate_not_blank", message = "City is required"))]
    pub city: String,
    #[validate(custom(function = "validate_not_blank", message = "State is required"))]
    pub state: String,
    #[validate(custom(function = "validate_pin_code", message = "PIN code must be 6 digits"))]
    pub pin_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DetailsForm {
    #[validate(range(min = 1, message = "Price per night must be greater than 0"))]
    pub price: i64,
    #[validate(range(min = 1, max = 50, message = "Bedrooms must be between 1 and 50"))]
    pub bedrooms: u8,
    #[validate(range(min = 1, max = 50, message = "Bathrooms must be between 1 and 50"))]
    pub bathrooms: u8,
    #[validate(range(min = 1, max = 16, message = "Max guests must be between 1 and 16"))]
    pub max_guests: u8,
}

impl Default for DetailsForm {
    fn default() -> Self {
        Self {
            price: 0,
            bedrooms: 1,
            bathrooms: 1,
            max_guests: 2,
        }
    }
}

/// Field → message for one step.
pub type StepErrors = BTreeMap<String, String>;

/// Flatten `validator` output into the inline-error map the form shows.
pub fn step_errors(errors: &validator::ValidationErrors) -> StepErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"));
                (field.to_string(), message)
            })
        })
        .collect()
}

/// Payload handed to the listing backend once every step passes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    #[serde(flatten)]
    pub basics: BasicsForm,
    #[serde(flatten)]
    pub location: LocationForm,
    #[serde(flatten)]
    pub details: DetailsForm,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_order() {
        assert_eq!(ListingStep::Basics.next(), Some(ListingStep::Location));
        assert_eq!(ListingStep::Review.next(), None);
        assert_eq!(ListingStep::Basics.previous(), None);
        assert_eq!(ListingStep::Details.previous(), Some(ListingStep::Location));
    }

    #[test]
    fn basics_errors_carry_messages() {
        let form = BasicsForm {
            title: "Hut".into(),
            description: "short".into(),
            property_type: None,
        };
        let errors = step_errors(&form.validate().unwrap_err());
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.get("title").map(String::as_str),
            Some("Title must be between 5 and 100 characters")
        );
        assert!(errors.values().any(|m| m == "Property type is required"));
    }

    #[test]
    fn blank_location_fields_are_required() {
        let form = LocationForm {
            address: "  ".into(),
            city: "Pune".into(),
            state: "MH".into(),
            pin_code: "411001".into(),
        };
        let errors = step_errors(&form.validate().unwrap_err());
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("address"));
    }

    #[test]
    fn pin_code_rejects_letters() {
        let form = LocationForm {
            address: "12 Lake Rd".into(),
            city: "Udaipur".into(),
            state: "Rajasthan".into(),
            pin_code: "abcdef".into(),
        };
        let errors = step_errors(&form.validate().unwrap_err());
        assert_eq!(errors.len(), 1);
        assert!(errors.values().any(|m| m == "PIN code must be 6 digits"));
    }

    #[test]
    fn default_details_need_a_price() {
        let errors = step_errors(&DetailsForm::default().validate().unwrap_err());
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["price"]);
    }
}
