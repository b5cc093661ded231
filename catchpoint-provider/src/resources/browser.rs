//! Device, chrome channel and script handling shared by the browser kinds.

use crate::builder::section_patch;
use crate::errors::{Result, ValidationError};
use crate::resources::check_allowed;
use crate::setters::set_request_data;
use crate::test_config::TestConfig;
use catchpoint_api::enums::{
    CHROME_APPLICATION_VERSIONS, CHROME_SPECIFIC_VERSION, CHROME_VERSIONS, SCRIPT_TYPES,
    USER_AGENTS,
};
use catchpoint_api::{FieldPath, PatchOperation, Section};

const STABLE_CHANNEL: i32 = 1;
const DEFAULT_MOBILE_DEVICE: i32 = 3;

/// Resolves the simulated device and chrome version. A chrome monitor
/// without a version runs on the stable channel and a mobile monitor
/// without a device simulates an android phone.
pub(crate) fn apply_device(
    simulate: &str,
    chrome_version: &str,
    config: &mut TestConfig,
) -> Result<(), ValidationError> {
    if !chrome_version.is_empty() {
        config.chrome_version = CHROME_VERSIONS.resolve(chrome_version)?;
        if config.chrome_version.id == CHROME_SPECIFIC_VERSION {
            config.chrome_application_version = CHROME_APPLICATION_VERSIONS.resolve(chrome_version)?;
        }
    } else if config.monitor.name == "chrome" {
        config.chrome_version = CHROME_VERSIONS.pair_or("", STABLE_CHANNEL);
    }

    if !simulate.is_empty() {
        config.simulate_device = USER_AGENTS.resolve(simulate)?;
    } else if config.monitor.name == "mobile" {
        config.simulate_device = USER_AGENTS.pair_or("", DEFAULT_MOBILE_DEVICE);
    }

    Ok(())
}

/// Patches for a changed device or chrome version. `config` must come from
/// [`apply_device`] with the desired values.
pub(crate) fn device_patches(
    (simulate, chrome_version): (&str, &str),
    (prior_simulate, prior_chrome_version): (&str, &str),
    config: &TestConfig,
    patches: &mut Vec<PatchOperation>,
) {
    if simulate != prior_simulate {
        patches.push(PatchOperation::field(
            FieldPath::UserAgentType,
            config.simulate_device.id,
        ));
    }
    if chrome_version != prior_chrome_version {
        if config.chrome_version.id == CHROME_SPECIFIC_VERSION {
            patches.push(PatchOperation::field(
                FieldPath::ChromeApplicationVersionId,
                config.chrome_application_version.id,
            ));
        } else {
            patches.push(PatchOperation::field(
                FieldPath::ChromeApplicationVersionType,
                config.chrome_version.id,
            ));
        }
    }
}

/// Sets the script, checking the script type against what the kind accepts.
pub(crate) fn apply_script(
    resource: &'static str,
    script: &str,
    script_type: &str,
    allowed_types: &[&str],
    config: &mut TestConfig,
) -> Result<(), ValidationError> {
    if script.is_empty() {
        return Err(ValidationError::Required("test_script"));
    }
    check_allowed(resource, "test_script_type", script_type, allowed_types)?;
    let script_type = SCRIPT_TYPES.resolve(script_type)?;
    let monitor = config.monitor.clone();
    set_request_data(script, monitor, script_type, config);
    Ok(())
}

/// A changed script or script type replaces the whole request data section.
pub(crate) fn script_patches(
    changed: bool,
    config: &TestConfig,
    patches: &mut Vec<PatchOperation>,
) -> Result<()> {
    if changed {
        patches.push(section_patch(config, Section::RequestData)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catchpoint_api::IdName;
    use catchpoint_api::enums::TestType;

    fn config_with_monitor(id: i32, name: &str) -> TestConfig {
        let mut config = TestConfig::new(TestType::Web);
        config.monitor = IdName::new(id, name);
        config
    }

    #[test]
    fn chrome_defaults_to_stable() {
        let mut config = config_with_monitor(18, "chrome");
        apply_device("", "", &mut config).unwrap();
        assert_eq!(config.chrome_version, IdName::new(1, "stable"));
        assert_eq!(config.simulate_device, IdName::default());
    }

    #[test]
    fn mobile_defaults_to_android() {
        let mut config = config_with_monitor(26, "mobile");
        apply_device("", "", &mut config).unwrap();
        assert_eq!(config.simulate_device, IdName::new(3, "android"));
        assert_eq!(config.chrome_version, IdName::default());
    }

    #[test]
    fn pinned_version() {
        let mut config = config_with_monitor(18, "chrome");
        apply_device("iphone 7", "108", &mut config).unwrap();
        assert_eq!(config.chrome_version, IdName::new(3, "108"));
        assert_eq!(config.chrome_application_version, IdName::new(28558, "108"));
        assert_eq!(config.simulate_device, IdName::new(23, "iphone 7"));

        assert!(apply_device("", "42", &mut config).is_err());
    }

    #[test]
    fn device_patch_paths() {
        let mut config = config_with_monitor(18, "chrome");
        apply_device("android", "89", &mut config).unwrap();
        let mut patches = Vec::new();
        device_patches(("android", "89"), ("", "stable"), &config, &mut patches);

        assert_eq!(patches[0].path, "/userAgentTypeId");
        assert_eq!(patches[0].value, "3");
        assert_eq!(patches[1].path, "/chromeMonitorVersion/applicationVersionId");
        assert_eq!(patches[1].value, "14");

        let mut config = config_with_monitor(18, "chrome");
        apply_device("", "preview", &mut config).unwrap();
        let mut patches = Vec::new();
        device_patches(("", "preview"), ("", "stable"), &config, &mut patches);
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].path, "/chromeMonitorVersion/applicationVersionType");
        assert_eq!(patches[0].value, "2");
    }

    #[test]
    fn script_type_is_checked() {
        let mut config = config_with_monitor(25, "api");
        config.test_type = TestType::Api;
        let allowed = ["selenium", "javascript"];

        assert_eq!(
            apply_script("api_test", "", "selenium", &allowed, &mut config),
            Err(ValidationError::Required("test_script"))
        );
        assert!(matches!(
            apply_script("api_test", "open /", "playwright", &allowed, &mut config),
            Err(ValidationError::NotAllowed { field: "test_script_type", .. })
        ));

        apply_script("api_test", "open /", "javascript", &allowed, &mut config).unwrap();
        assert_eq!(config.script.transaction_script_type, IdName::new(2, "javascript"));
        assert_eq!(config.script.monitor, IdName::new(25, "api"));
    }
}
