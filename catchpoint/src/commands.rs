use catchpoint_api::{ClientError, TestId, TestsApi};
use catchpoint_provider::resources::delete;
use catchpoint_provider::{AnyTest, ProviderError, ResourceKind, ValidationError};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("could not open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("{kind} {id} does not exist")]
    NotFound { kind: ResourceKind, id: TestId },
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("could not render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// A resource document as found in a YAML file: a single-key map from the
/// resource type name to the resource.
pub fn load_document(path: &Path) -> Result<AnyTest, CommandError> {
    let file = File::open(path).map_err(|source| CommandError::Open {
        path: path.to_owned(),
        source,
    })?;
    let deserializer = serde_yaml::Deserializer::from_reader(file);
    serde_yaml::with::singleton_map::deserialize(deserializer).map_err(|source| CommandError::Parse {
        path: path.to_owned(),
        source,
    })
}

#[derive(Serialize)]
struct Applied<'a> {
    id: TestId,
    #[serde(flatten)]
    test: &'a AnyTest,
}

fn render<T: Serialize>(value: &T) -> Result<String, CommandError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn validate(path: &Path) -> Result<String, CommandError> {
    let document = load_document(path)?;
    document.validate()?;
    tracing::info!(
        resource = %document.kind(),
        test_name = document.test_name(),
        "document is valid"
    );
    Ok(format!("{} '{}' is valid", document.kind(), document.test_name()))
}

pub async fn create(api: &dyn TestsApi, path: &Path) -> Result<String, CommandError> {
    let document = load_document(path)?;
    let (id, test) = document.create(api).await?;
    render(&Applied { id, test: &test })
}

pub async fn read(api: &dyn TestsApi, kind: ResourceKind, id: TestId) -> Result<String, CommandError> {
    match kind.read(api, id).await? {
        Some(test) => render(&Applied { id, test: &test }),
        None => Err(CommandError::NotFound { kind, id }),
    }
}

pub async fn update(api: &dyn TestsApi, path: &Path, id: TestId) -> Result<String, CommandError> {
    let document = load_document(path)?;
    let test = document.update(api, id).await?;
    render(&Applied { id, test: &test })
}

pub async fn remove(api: &dyn TestsApi, id: TestId) -> Result<String, CommandError> {
    delete(api, id).await?;
    Ok(format!("deleted test {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp_file(s: &str) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        write!(tmp, "{}", s).expect("write yaml");

        tmp
    }

    #[test]
    fn validates_document() {
        let tmp = write_tmp_file(
            r#"
            dns_test:
                division_id: 1000
                product_id: 5000
                test_name: apex
                test_domain: example.com
                query_type: a
            "#,
        );
        let message = validate(tmp.path()).expect("valid document");
        assert_eq!(message, "dns_test 'apex' is valid");
    }

    #[test]
    fn reports_invalid_document() {
        let tmp = write_tmp_file(
            r#"
            dns_test:
                division_id: 1000
                product_id: 5000
                test_name: apex
                test_domain: example.com
                query_type: bogus
            "#,
        );
        assert!(matches!(
            validate(tmp.path()),
            Err(CommandError::Validation(ValidationError::UnknownName(_)))
        ));
    }

    #[test]
    fn documents_are_keyed_by_resource_type() {
        let tmp = write_tmp_file(
            r#"
            ping_test:
                division_id: 1
                product_id: 2
                test_name: gateway
                test_location: 10.0.0.1
            "#,
        );
        let document = load_document(tmp.path()).expect("document");
        assert_eq!(document.kind(), ResourceKind::PingTest);
        assert_eq!(document.test_name(), "gateway");
    }

    #[test]
    fn unknown_kind_fails_to_parse() {
        let tmp = write_tmp_file("smoke_test:\n  test_name: x\n");
        assert!(matches!(
            load_document(tmp.path()),
            Err(CommandError::Parse { .. })
        ));
    }

    #[test]
    fn applied_output_carries_id() {
        let tmp = write_tmp_file(
            "ssl_test:\n  division_id: 1\n  product_id: 2\n  test_name: cert\n  test_url: https://example.com\n",
        );
        let document = load_document(tmp.path()).expect("document");
        let rendered = render(&Applied {
            id: 42,
            test: &document,
        })
        .expect("render");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("json");

        assert_eq!(value["id"], 42);
        assert_eq!(value["ssl_test"]["test_url"], "https://example.com");
    }
}
