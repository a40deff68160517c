use serde::{Deserialize, Serialize};

use super::OrderError;

/// Where and to whom an order is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub recipient: String,
    pub phone: String,
    pub address: String,

    /// Free-form notes for the driver.
    #[serde(default)]
    pub instructions: Option<String>,
}

impl DeliveryDetails {
    pub fn new(
        recipient: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            phone: phone.into(),
            address: address.into(),
            instructions: None,
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Checks that recipient, phone and address are not blank.
    pub fn validate(&self) -> Result<(), OrderError> {
        let required = [
            ("recipient", &self.recipient),
            ("phone", &self.phone),
            ("address", &self.address),
        ];
        match required.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(OrderError::MissingDeliveryField { field }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_details_validate() {
        let details = DeliveryDetails::new("Ana", "555-0101", "12 Orchard Way")
            .with_instructions("Leave at the door");
        assert!(details.validate().is_ok());
    }

    #[test]
    fn test_blank_field_is_reported() {
        let details = DeliveryDetails::new("Ana", "  ", "12 Orchard Way");
        assert_eq!(
            details.validate(),
            Err(OrderError::MissingDeliveryField { field: "phone" })
        );
    }
}
