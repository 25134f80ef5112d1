//! Service order model
//!
//! Maps to the `service_orders` table and the `service_order_status` enum.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{FromRow, Type};

/// Service order status - maps to the `service_order_status` ENUM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Type)]
#[sqlx(type_name = "service_order_status", rename_all = "snake_case")]
pub enum ServiceOrderStatus {
    Waiting,
    InProgress,
    Completed,
    Closed,
}

impl ServiceOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceOrderStatus::Waiting => "Waiting",
            ServiceOrderStatus::InProgress => "InProgress",
            ServiceOrderStatus::Completed => "Completed",
            ServiceOrderStatus::Closed => "Closed",
        }
    }
}

impl Default for ServiceOrderStatus {
    fn default() -> Self {
        ServiceOrderStatus::Waiting
    }
}

impl fmt::Display for ServiceOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service order status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ServiceOrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != ' ')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "waiting" => Ok(ServiceOrderStatus::Waiting),
            "inprogress" => Ok(ServiceOrderStatus::InProgress),
            "completed" => Ok(ServiceOrderStatus::Completed),
            "closed" => Ok(ServiceOrderStatus::Closed),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for ServiceOrderStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ServiceOrder {
    pub id: i64,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub description: String,
    pub status: ServiceOrderStatus,
    pub total_value: Decimal,
    pub notes: Option<String>,
    pub vehicle_id: i64,
}

impl ServiceOrder {
    /// Marks the order as closed. Closing twice keeps the first close time.
    pub fn close(&mut self, now: DateTime<Utc>) {
        if self.status == ServiceOrderStatus::Closed && self.closed_at.is_some() {
            return;
        }
        self.status = ServiceOrderStatus::Closed;
        self.closed_at = Some(now);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewServiceOrder {
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub description: String,
    pub status: ServiceOrderStatus,
    pub total_value: Decimal,
    pub notes: Option<String>,
    pub vehicle_id: i64,
}

impl NewServiceOrder {
    pub fn into_service_order(self, id: i64) -> ServiceOrder {
        ServiceOrder {
            id,
            opened_at: self.opened_at,
            closed_at: self.closed_at,
            description: self.description,
            status: self.status,
            total_value: self.total_value,
            notes: self.notes,
            vehicle_id: self.vehicle_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn status_parses_loosely() {
        assert_eq!("waiting".parse(), Ok(ServiceOrderStatus::Waiting));
        assert_eq!("InProgress".parse(), Ok(ServiceOrderStatus::InProgress));
        assert_eq!("in_progress".parse(), Ok(ServiceOrderStatus::InProgress));
        assert_eq!("in-progress".parse(), Ok(ServiceOrderStatus::InProgress));
        assert_eq!(" CLOSED ".parse(), Ok(ServiceOrderStatus::Closed));
        assert!("open".parse::<ServiceOrderStatus>().is_err());
    }

    #[test]
    fn status_serializes_by_variant_name() {
        let json = serde_json::to_string(&ServiceOrderStatus::InProgress).unwrap();
        assert_eq!(json, "\"InProgress\"");
        let back: ServiceOrderStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(back, ServiceOrderStatus::Completed);
    }

    #[test]
    fn close_is_idempotent() {
        let opened = Utc::now();
        let mut order = NewServiceOrder {
            opened_at: opened,
            closed_at: None,
            description: "Brake pads".to_string(),
            status: ServiceOrderStatus::InProgress,
            total_value: Decimal::new(15000, 2),
            notes: None,
            vehicle_id: 1,
        }
        .into_service_order(7);

        let first = opened + Duration::hours(2);
        order.close(first);
        assert_eq!(order.status, ServiceOrderStatus::Closed);
        assert_eq!(order.closed_at, Some(first));

        order.close(first + Duration::hours(5));
        assert_eq!(order.closed_at, Some(first));
    }
}
