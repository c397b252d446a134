use crate::domain::health::entities::HealthStatus;

pub trait HealthCheckService: Send + Sync {
    /// Liveness probe, always positive while the process serves requests.
    fn health(&self) -> HealthStatus;
}
