/// A page of orders, as produced by one fetch call.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPage<O> {
    pub orders: Vec<O>,
    /// The opaque cursor for the next page. `None` when this is the last page.
    pub next_token: Option<String>,
}

impl<O> OrderPage<O> {
    pub fn new(orders: Vec<O>, next_token: Option<String>) -> Self {
        Self { orders, next_token }
    }

    pub fn last(orders: Vec<O>) -> Self {
        Self { orders, next_token: None }
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl<O> Default for OrderPage<O> {
    fn default() -> Self {
        Self { orders: Vec::new(), next_token: None }
    }
}
