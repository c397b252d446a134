use crate::domain::{
    common::services::Service,
    detection::ports::IngredientDetector,
    health::{entities::HealthStatus, ports::HealthCheckService},
    recipe::ports::RecipeLookup,
};

impl<RL, D> HealthCheckService for Service<RL, D>
where
    RL: RecipeLookup,
    D: IngredientDetector,
{
    fn health(&self) -> HealthStatus {
        HealthStatus::ok()
    }
}
