//! Behaviour of fixtures generated by the build script.

use fixturegen_demo::datasets::shipments::ShipmentFixture;
use std::time::Duration;

use fixturegen_demo::datasets::shipments::carriers::{Carrier, ShipmentModel};
use fixturegen_demo::datasets::{DataModel, PurchaseContractFixture};
use fixturegen_demo::domain::{ContractStatus, PurchaseContract, Shipment};
use rstest::rstest;

#[rstest]
fn default_fixture_starts_from_valid_factory() {
    let fixture = PurchaseContractFixture::default_fixture();
    assert_eq!(fixture.get_contract_reference(), "PC-2024-001");
    assert!((fixture.get_quantity() - 12.5).abs() < f64::EPSILON);
}

#[rstest]
fn field_setters_flow_into_build() {
    let contract = PurchaseContractFixture::default_fixture()
        .with_contract_reference("PC-77".to_owned())
        .with_quantity(3.0)
        .with_status(ContractStatus::Draft)
        .build();
    assert_eq!(
        contract,
        PurchaseContract {
            contract_reference: "PC-77".to_owned(),
            quantity: 3.0,
            status: ContractStatus::Draft,
        }
    );
}

#[rstest]
fn without_resets_reference_fields() {
    let fixture = PurchaseContractFixture::default_fixture().without_contract_reference();
    assert!(fixture.get_contract_reference().is_empty());
}

#[rstest]
fn fields_without_default_still_get_setters_and_getters() {
    let fixture = PurchaseContractFixture::default_fixture();
    assert_eq!(fixture.get_status(), &ContractStatus::Signed);
    let drafted = fixture.with_status(ContractStatus::Draft);
    assert_eq!(drafted.build().status, ContractStatus::Draft);
}

#[rstest]
fn model_can_be_supplied_and_replaced() {
    let first = DataModel {
        contract_reference: "A".to_owned(),
        quantity: 1.0,
        status: ContractStatus::Draft,
    };
    let second = DataModel {
        contract_reference: "B".to_owned(),
        quantity: 2.0,
        status: ContractStatus::Signed,
    };
    let fixture = PurchaseContractFixture::with_model(first.clone());
    assert_eq!(fixture.get_model(), &first);
    let replaced = fixture.use_model(second.clone());
    assert_eq!(replaced.get_model(), &second);
}

#[rstest]
fn build_default_matches_default_fixture() {
    assert_eq!(
        PurchaseContractFixture::build_default(),
        PurchaseContractFixture::default_fixture().build()
    );
}

#[rstest]
fn model_default_is_used_without_valid_factory() {
    let fixture = ShipmentFixture::default_fixture();
    assert_eq!(fixture.get_model(), &ShipmentModel::default());
    assert!(!fixture.get_express());
}

#[rstest]
fn invalid_fixture_wraps_invalid_factory() {
    let shipment = ShipmentFixture::invalid_fixture().build();
    assert_eq!(shipment.tracking.as_deref(), Some(""));
    assert!(shipment.parcels.is_empty());
    assert!(shipment.express);
}

#[rstest]
fn optional_and_collection_fields_round_through_setters() {
    let shipment = ShipmentFixture::invalid_fixture()
        .with_tracking(Some("TRK-1".to_owned()))
        .with_parcels(vec![120, 450])
        .with_express(false)
        .with_carrier(Carrier {
            name: "Northwind".to_owned(),
        })
        .with_transit(Duration::from_secs(86_400))
        .build();
    assert_eq!(
        shipment,
        Shipment {
            tracking: Some("TRK-1".to_owned()),
            parcels: vec![120, 450],
            express: false,
            carrier: "Northwind".to_owned(),
            transit: Duration::from_secs(86_400),
        }
    );
    let cleared = ShipmentFixture::invalid_fixture()
        .without_tracking()
        .without_parcels();
    assert_eq!(cleared.get_tracking(), &None);
    assert!(cleared.get_parcels().is_empty());
}

#[rstest]
fn nested_model_types_declared_beside_the_model_are_reachable() {
    let fixture = ShipmentFixture::default_fixture()
        .with_carrier(Carrier {
            name: "Contoso".to_owned(),
        })
        .with_transit(Duration::from_secs(60));
    assert_eq!(fixture.get_carrier().name, "Contoso");
    assert_eq!(fixture.get_transit(), &Duration::from_secs(60));
    let reset = fixture.without_carrier().without_transit();
    assert_eq!(reset.get_carrier(), &Carrier::default());
    assert_eq!(reset.get_transit(), &Duration::ZERO);
}
