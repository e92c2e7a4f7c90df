//! Shipment dataset with its data model in a nested module.

use crate::domain::Shipment;

fixturegen::include_fixture!(shipment_fixture, "datasets/shipments/shipment_fixture.rs");
pub use shipment_fixture::ShipmentFixture;

/// Builds [`Shipment`] values; has no valid factory.
#[fixturegen::dataset(entity = Shipment, data_model = carriers::ShipmentModel)]
pub struct ShipmentDataSet;

impl ShipmentDataSet {
    /// Converts the model into a shipment.
    #[must_use]
    pub fn build(model: carriers::ShipmentModel) -> Shipment {
        Shipment {
            tracking: model.tracking,
            parcels: model.parcels,
            express: model.express,
            carrier: model.carrier.name,
            transit: model.transit,
        }
    }

    /// A model with an empty tracking number and no parcels.
    #[must_use]
    pub fn build_invalid() -> carriers::ShipmentModel {
        carriers::ShipmentModel {
            tracking: Some(String::new()),
            parcels: Vec::new(),
            express: true,
            carrier: carriers::Carrier::default(),
            transit: std::time::Duration::ZERO,
        }
    }
}

/// Data carriers for shipments.
pub mod carriers {
    use std::time::Duration;

    /// Carrier assigned to a shipment.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct Carrier {
        /// Trading name.
        pub name: String,
    }

    /// Raw shipment data.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct ShipmentModel {
        /// Carrier tracking number.
        pub tracking: Option<String>,
        /// Parcel weights in grams.
        pub parcels: Vec<u32>,
        /// Express service flag.
        pub express: bool,
        /// Carrier handling the parcels.
        pub carrier: Carrier,
        /// Expected time in transit.
        pub transit: Duration,
    }
}
