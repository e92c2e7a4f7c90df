//! Entities built by the dataset definitions.

use std::time::Duration;

/// Lifecycle stage of a contract. Has no `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractStatus {
    /// Awaiting signatures.
    Draft,
    /// Signed by both parties.
    Signed,
}

/// A purchase agreement.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseContract {
    /// External contract identifier.
    pub contract_reference: String,
    /// Ordered quantity.
    pub quantity: f64,
    /// Lifecycle stage.
    pub status: ContractStatus,
}

/// A consignment of parcels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shipment {
    /// Carrier tracking number, once assigned.
    pub tracking: Option<String>,
    /// Parcel weights in grams.
    pub parcels: Vec<u32>,
    /// Whether the shipment travels by express service.
    pub express: bool,
    /// Name of the carrier handling the shipment.
    pub carrier: String,
    /// Expected time in transit.
    pub transit: Duration,
}
