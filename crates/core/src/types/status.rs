//! Status enums for orders.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a status string from storage or a client is unknown.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown {kind} value: {value}")]
pub struct StatusParseError {
    kind: &'static str,
    value: String,
}

/// Order lifecycle status.
///
/// Orders move forward through `processing → assembly → delivery →
/// delivered`. Delivered orders drop out of the manager dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Processing,
    Assembly,
    Delivery,
    Delivered,
}

impl OrderStatus {
    /// Canonical string form, used for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Assembly => "assembly",
            Self::Delivery => "delivery",
            Self::Delivered => "delivered",
        }
    }

    /// Whether the order has reached its terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(Self::Processing),
            "assembly" => Ok(Self::Assembly),
            "delivery" => Ok(Self::Delivery),
            "delivered" => Ok(Self::Delivered),
            other => Err(StatusParseError {
                kind: "order status",
                value: other.to_owned(),
            }),
        }
    }
}

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery.
    Cash,
    /// Paid online at order creation.
    Online,
}

impl PaymentMethod {
    /// Canonical string form, used for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Online => "online",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "online" => Ok(Self::Online),
            other => Err(StatusParseError {
                kind: "payment method",
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_roundtrip() {
        for status in [
            OrderStatus::Processing,
            OrderStatus::Assembly,
            OrderStatus::Delivery,
            OrderStatus::Delivered,
        ] {
            let parsed: OrderStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_order_status_default_is_processing() {
        assert_eq!(OrderStatus::default(), OrderStatus::Processing);
    }

    #[test]
    fn test_order_status_terminal() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(!OrderStatus::Processing.is_terminal());
        assert!(!OrderStatus::Delivery.is_terminal());
    }

    #[test]
    fn test_order_status_unknown() {
        assert!("cancelled".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_payment_method_roundtrip() {
        for method in [PaymentMethod::Cash, PaymentMethod::Online] {
            let parsed: PaymentMethod = method.as_str().parse().unwrap();
            assert_eq!(parsed, method);
        }
        assert!("card".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&OrderStatus::Assembly).unwrap();
        assert_eq!(json, "\"assembly\"");
        let json = serde_json::to_string(&PaymentMethod::Online).unwrap();
        assert_eq!(json, "\"online\"");
    }
}
