use crate::models::order::Order;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingDecision {
    Routed,
    Failed,
}

pub trait RoutingPolicy: Send + Sync {
    fn route(&self, order: &Order) -> RoutingDecision;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysRoute;

impl RoutingPolicy for AlwaysRoute {
    fn route(&self, _order: &Order) -> RoutingDecision {
        RoutingDecision::Routed
    }
}
