use serde::{Deserialize, Serialize};

use crate::{
    error::ErrorEnvelope,
    models::{billing::BillingAddress, cart::Cart, item::Item, order::Order},
};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CartRequest {
    pub customer_id: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct PaymentRequest {
    pub order_id: String,
    pub amount: f64,
    pub billing_address: BillingAddress,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct OrderRequest {
    pub order_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    CreateCart(CartRequest),
    ProcessPayment(PaymentRequest),
    WaitGracePeriod(OrderRequest),
    RouteOrder(OrderRequest),
    FulfillOrder(OrderRequest),
    CapturePayment(OrderRequest),
    RefundPayment(OrderRequest),
    CancelOrder(OrderRequest),
    ListOrders,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub message: &'static str,
    pub cart: Cart,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub message: &'static str,
    pub order: Order,
}

#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub message: &'static str,
    pub orders: Vec<Order>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Response {
    Cart(CartResponse),
    Order(OrderResponse),
    Orders(OrdersResponse),
    Error(ErrorEnvelope),
}

#[derive(Debug, Serialize)]
pub struct Reply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(flatten)]
    pub response: Response,
}
