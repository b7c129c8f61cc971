use async_trait::async_trait;
use bridge_adapters::FixtureSource;
use bridge_core::{GatewayError, ProcessGateway, ProcessResult, ProvisionSettings, ProvisioningRequest};
use bridge_domain::coercion::raw_row_from_json;
use schema_bridge::{AppError, BridgeService, ErrorPayload};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Simula el CLI destino: lista una organización y acepta todo lo demás,
/// guardando el contenido de cada `--file`.
#[derive(Default)]
struct BlindStub {
    logged_in: bool,
    files: Mutex<Vec<Value>>,
}

#[async_trait]
impl ProcessGateway for BlindStub {
    async fn run(&self, _program: &Path, args: &[String]) -> Result<ProcessResult, GatewayError> {
        if !self.logged_in {
            return Err(GatewayError::ExternalTool { exit_code: 1,
                                                    output: "not authenticated".into() });
        }
        if let Some(i) = args.iter().position(|a| a == "--file") {
            let text = std::fs::read_to_string(&args[i + 1]).unwrap();
            self.files.lock().unwrap().push(serde_json::from_str(&text).unwrap());
        }
        match args[0].as_str() {
            "organization" => Ok(ProcessResult::from_stdout(r#"[{"slug": "acme"}]"#)),
            _ => Ok(ProcessResult::default()),
        }
    }
}

fn service(gateway: Arc<BlindStub>, fixture: FixtureSource, dir: &Path) -> BridgeService {
    let fixture = Arc::new(fixture);
    BridgeService::new(fixture.clone(),
                       fixture,
                       gateway,
                       ProvisionSettings { executable: PathBuf::from("blind"),
                                           scratch_dir: dir.to_path_buf(),
                                           ..Default::default() },
                       Some("demo-project".into()))
}

fn logged_in() -> Arc<BlindStub> {
    Arc::new(BlindStub { logged_in: true,
                         ..Default::default() })
}

#[tokio::test]
async fn describe_table_reports_source_and_translation() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service(logged_in(), FixtureSource::new(), dir.path());
    let report = svc.describe_table(None, "demo-project.analytics", " users ").await.unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["tableName"], "users");
    assert_eq!(value["dataset"], "analytics");
    assert_eq!(value["project"], "demo-project");
    assert_eq!(value["sourceSchema"]["fields"][0]["name"], "id");
    assert_eq!(value["jsonSchema"]["title"], "users");
    assert_eq!(value["jsonSchema"]["required"], json!(["id", "email", "created_at"]));
}

#[tokio::test]
async fn list_tables_returns_fixture_tables() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service(logged_in(), FixtureSource::new(), dir.path());
    let listing = svc.list_tables("analytics").await.unwrap();
    assert_eq!(serde_json::to_value(listing).unwrap(),
               json!({"dataset": "analytics", "tables": ["users", "orders", "products", "analytics"]}));
}

#[tokio::test]
async fn provision_coerces_bigquery_style_rows() {
    let dir = tempfile::tempdir().unwrap();
    let rows = vec![raw_row_from_json(json!({
                        "id": "12",
                        "score": {"value": "3.25"},
                        "active": "true",
                        "created_at": {"value": "2024-05-01T10:00:00Z"},
                        "note": null
                    })),
                    raw_row_from_json(json!({"id": null, "active": false}))];
    let gateway = logged_in();
    let svc = service(gateway.clone(), FixtureSource::with_rows(rows), dir.path());
    let request: ProvisioningRequest = serde_json::from_value(json!({
        "organization": "acme",
        "datasetSlug": "analytics",
        "schemaName": "Users",
        "schemaSlug": "users",
        "fields": ["id:integer", "score:number", "active:boolean", "created_at:string"],
        "projectId": "demo-project",
        "datasetId": "analytics",
        "tableId": "users"
    }))
    .unwrap();

    let report = svc.provision(&request).await.unwrap();
    assert!(report.success);
    assert_eq!(report.message, "Blind schema created successfully and 2 records imported");

    let files = gateway.files.lock().unwrap().clone();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["properties"]["score"]["precision"], 2);
    assert_eq!(files[1][0],
               json!({"data": {"id": 12, "score": 3.25, "active": true, "created_at": "2024-05-01T10:00:00Z", "note": ""}}));
    assert_eq!(files[1][1],
               json!({"data": {"id": 0, "active": false, "score": 0.0, "created_at": ""}}));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn auth_failure_becomes_error_payload() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service(Arc::new(BlindStub::default()), FixtureSource::new(), dir.path());
    let request: ProvisioningRequest = serde_json::from_value(json!({
        "organization": "acme",
        "datasetSlug": "analytics",
        "schemaName": "Users",
        "schemaSlug": "users",
        "fields": ["id:integer"]
    }))
    .unwrap();

    let err = svc.provision(&request).await.unwrap_err();
    assert!(matches!(err, AppError::Provision(_)));
    let payload = serde_json::to_value(ErrorPayload::from(&err)).unwrap();
    assert_eq!(payload,
               json!({
                   "success": false,
                   "step": "failedAuth",
                   "error": "Blind authentication failed. Please ensure you are logged in.",
                   "details": "command failed with code 1: not authenticated",
                   "suggestion": "Run: ./blind login"
               }));

    let status = svc.check_status().await;
    assert!(!status.authenticated);
}
