pub mod request;

use serde_json::Value;
use tracing::warn;

use crate::{checkout::Checkout, error::CheckoutError, models::order::Order};

use request::{CartResponse, OrderResponse, OrdersResponse, Reply, Request, Response};

pub async fn handle_request(checkout: &Checkout, request: Request) -> Response {
    match request {
        Request::CreateCart(req) => match checkout.create_cart(&req.customer_id, req.items).await {
            Ok(cart) => Response::Cart(CartResponse {
                message: "Cart created successfully",
                cart,
            }),
            Err(err) => Response::Error(err.into()),
        },
        Request::ProcessPayment(req) => order_response(
            checkout
                .process_payment(&req.order_id, req.amount, req.billing_address)
                .await,
            "Payment processed successfully and order created",
        ),
        Request::WaitGracePeriod(req) => order_response(
            checkout.wait_grace_period(&req.order_id).await,
            "Grace period completed, order ready for routing",
        ),
        Request::RouteOrder(req) => {
            order_response(checkout.route_order(&req.order_id).await, "Order routed")
        }
        Request::FulfillOrder(req) => {
            order_response(checkout.fulfill_order(&req.order_id).await, "Order fulfilled")
        }
        Request::CapturePayment(req) => order_response(
            checkout.capture_payment(&req.order_id).await,
            "Payment captured",
        ),
        Request::RefundPayment(req) => order_response(
            checkout.refund_payment(&req.order_id).await,
            "Payment refunded",
        ),
        Request::CancelOrder(req) => {
            order_response(checkout.cancel_order(&req.order_id).await, "Order cancelled")
        }
        Request::ListOrders => {
            let orders = checkout.list_orders().await;
            let message = if orders.is_empty() {
                "No orders found"
            } else {
                "All orders retrieved successfully"
            };
            Response::Orders(OrdersResponse { message, orders })
        }
    }
}

pub async fn handle_line(checkout: &Checkout, line: &str) -> Reply {
    let raw: Value = match serde_json::from_str(line) {
        Ok(raw) => raw,
        Err(err) => {
            warn!("Invalid JSON input: {err}");
            return Reply {
                id: None,
                response: invalid_payload(),
            };
        }
    };

    let id = raw.get("id").cloned();
    let response = match serde_json::from_value::<Request>(raw) {
        Ok(request) => handle_request(checkout, request).await,
        Err(err) => {
            warn!("Unrecognised request: {err}");
            invalid_payload()
        }
    };

    Reply { id, response }
}

fn order_response(result: Result<Order, CheckoutError>, message: &'static str) -> Response {
    match result {
        Ok(order) => Response::Order(OrderResponse { message, order }),
        Err(err) => Response::Error(err.into()),
    }
}

fn invalid_payload() -> Response {
    Response::Error(CheckoutError::invalid_request("Invalid JSON payload").into())
}
