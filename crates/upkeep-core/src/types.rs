use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Enums
// =============================================================================

/// Domain entity kinds an action can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// A maintenance work order.
    WorkOrder,
    /// A serviceable asset (machine, vehicle, facility unit).
    Asset,
    /// A spare part held in inventory.
    Part,
    /// A purchase order raised against a vendor.
    PurchaseOrder,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityType::WorkOrder => write!(f, "work_order"),
            EntityType::Asset => write!(f, "asset"),
            EntityType::Part => write!(f, "part"),
            EntityType::PurchaseOrder => write!(f, "purchase_order"),
        }
    }
}

impl std::str::FromStr for EntityType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work_order" => Ok(EntityType::WorkOrder),
            "asset" => Ok(EntityType::Asset),
            "part" => Ok(EntityType::Part),
            "purchase_order" => Ok(EntityType::PurchaseOrder),
            _ => Err(format!("Unknown entity type: {}", s)),
        }
    }
}

// =============================================================================
// Newtype Wrappers
// =============================================================================

/// A Unix timestamp in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp())
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.0, 0).unwrap_or_default()
    }
}
