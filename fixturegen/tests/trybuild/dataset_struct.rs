use fixturegen::dataset;

pub struct Order {
    pub reference: String,
}

#[derive(Default)]
pub struct OrderModel {
    pub reference: String,
}

/// Accepts the bare attribute path on a unit struct.
#[dataset(entity = Order, data_model = OrderModel)]
pub struct OrderDataSet;

impl OrderDataSet {
    pub fn build(model: OrderModel) -> Order {
        Order {
            reference: model.reference,
        }
    }
}

/// Enum definitions are accepted too.
#[dataset(data_model = OrderModel, entity = Order)]
pub enum OrderVariants {
    Only,
}

impl OrderVariants {
    pub fn build(model: OrderModel) -> Order {
        OrderDataSet::build(model)
    }
}

fn main() {
    let order = OrderVariants::build(OrderModel::default());
    assert!(order.reference.is_empty());
    let _ = OrderVariants::Only;
}
