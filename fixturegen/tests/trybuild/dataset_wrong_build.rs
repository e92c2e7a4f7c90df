use fixturegen::dataset;

pub struct Order;

pub struct OrderModel;

#[dataset(entity = Order, data_model = OrderModel)]
pub struct OrderDataSet;

impl OrderDataSet {
    /// Returns the model rather than the entity.
    pub fn build(model: OrderModel) -> OrderModel {
        model
    }
}

fn main() {}
