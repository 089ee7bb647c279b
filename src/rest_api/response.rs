//! # Response Formatting
//!
//! Success bodies for the city endpoints. Errors use
//! [`ErrorResponse`](super::errors::ErrorResponse).

use serde::Serialize;

use crate::model::City;

/// Create response carrying the stored record
#[derive(Debug, Clone, Serialize)]
pub struct CreateCityResponse {
    pub message: String,
    pub city: City,
}

impl CreateCityResponse {
    pub fn new(city: City) -> Self {
        Self {
            message: "City added successfully".to_string(),
            city,
        }
    }
}

/// Message-only response for update and delete
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn updated() -> Self {
        Self {
            message: "City updated successfully".to_string(),
        }
    }

    pub fn deleted() -> Self {
        Self {
            message: "City deleted successfully".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_response_serialization() {
        let response = CreateCityResponse::new(City::new("Quito", 2_800_000, "Ecuador", -0.18, -78.47));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["message"], "City added successfully");
        assert_eq!(
            json["city"],
            json!({
                "name": "Quito",
                "population": 2_800_000,
                "country": "Ecuador",
                "latitude": -0.18,
                "longitude": -78.47
            })
        );
    }

    #[test]
    fn test_message_response_serialization() {
        let json = serde_json::to_value(MessageResponse::deleted()).unwrap();
        assert_eq!(json, json!({"message": "City deleted successfully"}));
    }
}
