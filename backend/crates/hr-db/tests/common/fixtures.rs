use hr_core::{HeaderSet, NewWebhookEvent, TenantId};

pub fn tenant(name: &str) -> TenantId {
    TenantId::new(name).unwrap()
}

/// Creates a captured POST with a JSON body
pub fn create_test_event(tenant_name: &str, body: &str) -> NewWebhookEvent {
    let headers: HeaderSet = [("Content-Type", "application/json")].into_iter().collect();

    NewWebhookEvent::new(
        tenant(tenant_name),
        "POST",
        "/hooks/github?delivery=1",
        headers.to_json().unwrap(),
        body.as_bytes().to_vec(),
    )
}
