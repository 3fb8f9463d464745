use async_trait::async_trait;

use crate::domain::DomainEvent;

/// Receives the events drained from an aggregate after a successful save.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, events: Vec<DomainEvent>);
}

/// Writes each event as a structured log record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, events: Vec<DomainEvent>) {
        for event in events {
            let payload = match serde_json::to_string(&event) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::error!(
                        event = event.name(),
                        user_id = %event.user_id(),
                        error = %e,
                        "Failed to serialize domain event"
                    );
                    continue;
                }
            };
            tracing::info!(
                event = event.name(),
                user_id = %event.user_id(),
                occurred_on = %event.occurred_on(),
                payload = %payload,
                "Domain event"
            );
        }
    }
}
