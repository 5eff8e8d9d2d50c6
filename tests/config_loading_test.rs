use anyhow::Result;
use course_config::utils::validation::Validate;
use course_config::{ConfigError, ConfigFormat, ConfigLoader, CourseReference};
use tempfile::TempDir;

const LEGACY_TOML: &str = r#"
[setting.basicSetting]
logLevel = "INFO"

[[users]]
accountType = "YINGHUA"
url = "https://example.edu"
account = "alice"
password = "secret"

[users.coursesCustom]
includeCourses = ["Physics", "Chemistry"]
excludeCourses = ["Biology"]
"#;

const CURRENT_JSON: &str = r#"{
  "setting": {"basicSetting": {"logLevel": "INFO"}},
  "users": [{
    "accountType": "YINGHUA",
    "url": "https://example.edu",
    "account": "alice",
    "password": "secret",
    "coursesCustom": {
      "includeCourses": [{"name": "Physics"}, {"name": "Chemistry", "id": ""}],
      "excludeCourses": [{"name": "Biology"}]
    }
  }]
}"#;

/// 舊版（純字串）與新版（物件）設定檔載入後完全相同
#[test]
fn test_legacy_and_current_documents_load_identically() -> Result<()> {
    let legacy = ConfigLoader::from_str(LEGACY_TOML, ConfigFormat::Toml)?;
    let current = ConfigLoader::from_str(CURRENT_JSON, ConfigFormat::Json)?;

    assert_eq!(legacy, current);
    Ok(())
}

#[test]
fn test_multiple_users_each_normalized() -> Result<()> {
    let content = r#"
[[users]]
account = "alice"
[users.coursesCustom]
includeCourses = ["Intro", { name = "Advanced", id = "A2" }]

[[users]]
account = "bob"
[users.coursesCustom]
excludeCourses = [{ id = "A3" }, 404]
"#;

    let doc = ConfigLoader::from_str(content, ConfigFormat::Toml)?;

    assert_eq!(doc.users.len(), 2);
    let alice = doc.find_user("alice").expect("alice configured");
    assert_eq!(
        alice.courses_custom.include_courses,
        vec![
            CourseReference::by_name("Intro"),
            CourseReference::new("Advanced", "A2")
        ]
    );
    assert!(alice.courses_custom.exclude_courses.is_empty());

    let bob = doc.find_user("bob").expect("bob configured");
    assert_eq!(
        bob.courses_custom.exclude_courses,
        vec![CourseReference::new("", "A3"), CourseReference::by_name("404")]
    );
    assert!(bob.courses_custom.excludes_course("Whatever", "A3"));
    assert!(!bob.courses_custom.includes_course("Intro", ""));
    Ok(())
}

#[test]
fn test_load_from_disk_and_validate() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, LEGACY_TOML)?;

    let doc = ConfigLoader::from_file(&path)?;
    doc.validate()?;
    assert_eq!(doc.setting.basic_setting.log_model, Some(5));

    let discovered = ConfigLoader::discover(temp_dir.path())?;
    assert_eq!(discovered, doc);
    Ok(())
}

const LEGACY_YAML: &str = r#"
setting:
  basicSetting:
    logLevel: INFO
users:
  - accountType: YINGHUA
    url: https://example.edu
    account: alice
    password: secret
    coursesCustom:
      includeCourses:
        - Physics
        - {name: Chemistry}
      excludeCourses:
        - name: Biology
          id: ""
"#;

/// YAML 設定檔（新舊格式混用）與 TOML、JSON 載入結果相同
#[test]
fn test_yaml_document_loads_like_the_others() -> Result<()> {
    let yaml = ConfigLoader::from_str(LEGACY_YAML, ConfigFormat::Yaml)?;
    let toml = ConfigLoader::from_str(LEGACY_TOML, ConfigFormat::Toml)?;

    assert_eq!(yaml, toml);
    Ok(())
}

#[test]
fn test_discovery_order() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("config.json"), r#"{"users": [{"account": "json"}]}"#)?;
    std::fs::write(temp_dir.path().join("config.yml"), "users:\n  - account: yml\n")?;

    let doc = ConfigLoader::discover(temp_dir.path())?;
    assert_eq!(doc.users[0].account, "yml");
    Ok(())
}

/// 密碼含引號與反斜線時，環境變數替換不會破壞設定檔
#[test]
fn test_secret_with_special_characters() -> Result<()> {
    std::env::set_var("COURSE_CONFIG_IT_SECRET", r#"p"w\d'"#);

    let content = "[[users]]\naccount = \"alice\"\npassword = \"${COURSE_CONFIG_IT_SECRET}\"\n";
    let toml = ConfigLoader::from_str(content, ConfigFormat::Toml)?;
    let yaml = ConfigLoader::from_str(
        "users:\n  - account: alice\n    password: ${COURSE_CONFIG_IT_SECRET}\n",
        ConfigFormat::Yaml,
    )?;

    std::env::remove_var("COURSE_CONFIG_IT_SECRET");
    assert_eq!(toml.users[0].password, r#"p"w\d'"#);
    assert_eq!(yaml.users[0].password, r#"p"w\d'"#);
    Ok(())
}

#[test]
fn test_toml_preferred_over_json_when_both_present() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("config.toml"), "[[users]]\naccount = \"toml\"\n")?;
    std::fs::write(temp_dir.path().join("config.json"), r#"{"users": [{"account": "json"}]}"#)?;

    let doc = ConfigLoader::discover(temp_dir.path())?;
    assert_eq!(doc.users[0].account, "toml");
    Ok(())
}

#[test]
fn test_loader_errors() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let missing = ConfigLoader::from_file(temp_dir.path().join("absent.toml"));
    assert!(matches!(missing, Err(ConfigError::IoError(_))));

    let ini = temp_dir.path().join("config.ini");
    std::fs::write(&ini, "[users]")?;
    assert!(matches!(
        ConfigLoader::from_file(&ini),
        Err(ConfigError::UnsupportedFormatError { .. })
    ));

    let invalid = ConfigLoader::from_str(r#"{"users": {"account": 1}}"#, ConfigFormat::Json);
    assert!(matches!(invalid, Err(ConfigError::StructureError(_))));
    Ok(())
}

#[test]
fn test_validation_rejects_bad_switch() -> Result<()> {
    let doc = ConfigLoader::from_str(
        "[[users]]\naccount = \"alice\"\nisProxy = 3\n",
        ConfigFormat::Toml,
    )?;

    let err = doc.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidConfigValueError { ref field, .. } if field == "users[0].isProxy"));
    Ok(())
}
