use async_trait::async_trait;
use catchpoint_api::{ClientError, PatchOperation, Test, TestId, TestsApi};
use http::StatusCode;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

/// In-memory tests API. Stores created documents, applies patches to them
/// on a best-effort basis and records every call.
pub struct FakeApi {
    tests: Mutex<HashMap<TestId, Test>>,
    next_id: AtomicI64,
    pub created: Mutex<Vec<Test>>,
    pub patches: Mutex<Vec<(TestId, Vec<PatchOperation>)>>,
    pub deleted: Mutex<Vec<TestId>>,
    /// Created tests are accepted but never stored.
    pub drop_creates: AtomicBool,
}

impl FakeApi {
    pub fn new() -> Self {
        FakeApi {
            tests: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1000),
            created: Mutex::new(Vec::new()),
            patches: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            drop_creates: AtomicBool::new(false),
        }
    }

    pub fn insert(&self, test: Test) {
        self.tests.lock().unwrap().insert(test.id, test);
    }

    pub fn stored(&self, id: TestId) -> Option<Test> {
        self.tests.lock().unwrap().get(&id).cloned()
    }

    pub fn patch_calls(&self) -> Vec<(TestId, Vec<PatchOperation>)> {
        self.patches.lock().unwrap().clone()
    }
}

fn rejected(operation: &'static str, id: TestId) -> ClientError {
    ClientError::Rejected {
        operation,
        status: StatusCode::OK,
        body: format!("{{\"completed\":false,\"messages\":[\"test {id} not found\"]}}"),
    }
}

/// Field patches carry strings; write them back in the shape the document
/// already has.
fn apply_patch(document: &mut Value, op: &PatchOperation) {
    let Some(target) = document.pointer_mut(&op.path) else {
        return;
    };
    match (target, &op.value) {
        (target @ Value::Object(_), Value::String(text)) => {
            if let Ok(id) = text.parse::<i64>() {
                target["id"] = json!(id);
            }
        }
        (Value::Bool(flag), Value::String(text)) => *flag = text == "true",
        (Value::Number(number), Value::String(text)) => {
            if let Ok(parsed) = text.parse::<i64>() {
                *number = parsed.into();
            }
        }
        (target, value) => *target = value.clone(),
    }
}

#[async_trait]
impl TestsApi for FakeApi {
    async fn create_test(&self, test: &Test) -> Result<TestId, ClientError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.created.lock().unwrap().push(test.clone());
        if !self.drop_creates.load(Ordering::SeqCst) {
            let mut stored = test.clone();
            stored.id = id;
            self.insert(stored);
        }
        Ok(id)
    }

    async fn get_test(&self, id: TestId) -> Result<Option<Test>, ClientError> {
        Ok(self.stored(id))
    }

    async fn update_test(&self, id: TestId, patch: &[PatchOperation]) -> Result<(), ClientError> {
        self.patches.lock().unwrap().push((id, patch.to_vec()));

        let mut tests = self.tests.lock().unwrap();
        let test = tests.get_mut(&id).ok_or_else(|| rejected("update", id))?;
        let mut document = serde_json::to_value(&*test)?;
        for op in patch {
            apply_patch(&mut document, op);
        }
        *test = serde_json::from_value(document)?;
        Ok(())
    }

    async fn delete_test(&self, id: TestId) -> Result<(), ClientError> {
        self.deleted.lock().unwrap().push(id);
        match self.tests.lock().unwrap().remove(&id) {
            Some(_) => Ok(()),
            None => Err(rejected("delete", id)),
        }
    }
}

/// A web test as the API returns it.
pub fn fixture_test() -> Test {
    serde_json::from_value(json!({
        "id": 1234,
        "divisionId": 1000,
        "productId": 5000,
        "name": "homepage",
        "description": "",
        "url": "https://example.com",
        "labels": [{"color": "#a1b2c3", "name": "team", "values": ["web"]}],
        "thresholdRestModel": null,
        "enableTestDataWebhook": true,
        "alertsPaused": false,
        "changeDate": "2024-05-01T12:30:00Z",
        "startTime": "2024-05-01T12:30:00Z",
        "endTime": "",
        "status": {"id": 0, "name": "Active"},
        "monitor": {"id": 18, "name": "Chrome"},
        "chromeMonitorVersion": {"applicationVersionType": {"id": 1, "name": "Stable"}},
        "testType": {"id": 0, "name": "Web"},
        "requestHttpMethod": {"id": 0, "name": "Get"},
        "requestSettings": {"requestSettingType": {"id": 0, "name": "Inherit"}},
        "insightData": {"insightSettingType": {"id": 0, "name": "Inherit"}},
        "advancedSettings": {"advancedSettingType": {"id": 0, "name": "Inherit"}, "appliedTestFlags": []},
        "scheduleSettings": {
            "scheduleSettingType": {"id": 1, "name": "Override"},
            "frequency": {"id": 2, "name": "5 Minutes"},
            "testNodeDistribution": {"id": 0, "name": "Random"},
            "networkType": {"id": 0, "name": "Backbone"},
            "nodes": [
                {"id": 101, "name": "New York - Level3", "networkType": {"id": 0, "name": "Backbone"}},
                {"id": 102, "name": "London - Cogent", "networkType": {"id": 0, "name": "Backbone"}}
            ],
            "nodeGroups": null
        },
        "alertGroup": {
            "alertSettingType": {"id": 1, "name": "Override"},
            "notificationGroup": {
                "subject": "${NotificationLevel}:  test=#${TestId} - ${TestName}, alert=${AlertType}",
                "notifyOnWarning": true,
                "notifyOnCritical": true,
                "notifyOnImproved": true,
                "alertWebhooks": [],
                "recipients": []
            },
            "alertGroupItems": [{
                "nodeThreshold": {
                    "nodeThresholdType": {"id": 0, "name": "Runs"},
                    "numberOfUnits": 2
                },
                "trigger": {
                    "warningReminderFrequency": {"id": 0, "name": "None"},
                    "criticalReminderFrequency": {"id": 0, "name": "None"},
                    "triggerType": {"id": 1, "name": "SpecificValue"},
                    "operationType": {"id": 4, "name": "LessThan"},
                    "thresholdInterval": {"id": 0, "name": "Default"},
                    "warningTrigger": 90.0,
                    "criticalTrigger": 80.0
                },
                "notificationType": {"id": 0, "name": "DefaultContacts"},
                "alertType": {"id": 15, "name": "Availability"},
                "alertSubType": {"id": 140, "name": "Test"},
                "notificationGroups": [{
                    "subject": "",
                    "notifyOnCritical": true,
                    "recipients": [
                        {"email": "ops@example.com", "recipientType": {"id": 2, "name": "Email"}},
                        {"id": 1, "email": "", "recipientType": {"id": 1, "name": "ContactGroup"}, "name": "oncall"}
                    ]
                }]
            }]
        }
    }))
    .expect("fixture is a valid test document")
}
