//! Dataset definitions and their generated fixtures.

pub mod shipments;

use crate::domain::{ContractStatus, PurchaseContract};

fixturegen::include_fixture!(purchase_contract_fixture, "datasets/purchase_contract_fixture.rs");
pub use purchase_contract_fixture::PurchaseContractFixture;

/// Builds [`PurchaseContract`] values from [`DataModel`].
#[fixturegen::dataset(entity = PurchaseContract, data_model = DataModel)]
pub struct PurchaseContractDataSet;

impl PurchaseContractDataSet {
    /// Converts the model into a contract.
    #[must_use]
    pub fn build(model: DataModel) -> PurchaseContract {
        PurchaseContract {
            contract_reference: model.contract_reference,
            quantity: model.quantity,
            status: model.status,
        }
    }

    /// A model that passes validation.
    #[must_use]
    pub fn build_valid() -> DataModel {
        DataModel {
            contract_reference: "PC-2024-001".to_owned(),
            quantity: 12.5,
            status: ContractStatus::Signed,
        }
    }
}

/// Raw contract data.
#[derive(Debug, Clone, PartialEq)]
pub struct DataModel {
    /// External contract identifier.
    pub contract_reference: String,
    /// Ordered quantity.
    pub quantity: f64,
    /// Lifecycle stage.
    pub status: ContractStatus,
}
