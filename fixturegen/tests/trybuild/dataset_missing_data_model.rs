use fixturegen::dataset;

pub struct Order;

/// The data model key is required.
#[dataset(entity = Order)]
pub struct OrderDataSet;

fn main() {}
