mod domain {
    pub struct Invoice {
        pub total: u64,
    }
}

mod datasets {
    pub mod carriers {
        #[derive(Default)]
        pub struct InvoiceModel {
            pub total: u64,
        }
    }

    /// Uses the qualified attribute path and module-relative type paths.
    #[fixturegen::dataset(entity = crate::domain::Invoice, data_model = self::carriers::InvoiceModel)]
    pub struct InvoiceDataSet;

    impl InvoiceDataSet {
        pub fn build(model: carriers::InvoiceModel) -> crate::domain::Invoice {
            crate::domain::Invoice { total: model.total }
        }

        pub fn build_valid() -> carriers::InvoiceModel {
            carriers::InvoiceModel { total: 10 }
        }
    }
}

fn main() {
    let invoice = datasets::InvoiceDataSet::build(datasets::InvoiceDataSet::build_valid());
    assert_eq!(invoice.total, 10);
}
