use crate::config::document::{ConfigDocument, RawConfigDocument};
use crate::domain::loose::{map_strings, LooseValue};
use crate::utils::error::{ConfigError, Result};
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::OnceLock;

/// 預設搜尋的設定檔名稱，依序嘗試
pub const DEFAULT_CONFIG_FILES: [&str; 4] =
    ["config.yaml", "config.yml", "config.toml", "config.json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnsupportedFormatError {
                path: path.display().to_string(),
            }),
        }
    }
}

/// 設定檔載入：讀取 -> 解碼 -> 字串值的環境變數替換 -> 課程清單正規化 -> 補預設值
pub struct ConfigLoader;

impl ConfigLoader {
    /// 從檔案載入，格式由副檔名決定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ConfigDocument> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        tracing::info!("📁 Loading configuration from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content, format)
    }

    /// 在目錄中依 [`DEFAULT_CONFIG_FILES`] 的順序尋找設定檔
    pub fn discover<P: AsRef<Path>>(dir: P) -> Result<ConfigDocument> {
        let dir = dir.as_ref();
        for name in DEFAULT_CONFIG_FILES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Self::from_file(candidate);
            }
        }
        Err(ConfigError::NotFoundError {
            dir: dir.display().to_string(),
        })
    }

    pub fn from_str(content: &str, format: ConfigFormat) -> Result<ConfigDocument> {
        let raw = Self::decode(content, format)?;
        tracing::debug!(users = raw.users.len(), "configuration decoded");

        let mut document = raw.normalize();
        document.apply_defaults();
        Ok(document)
    }

    /// 只解碼，不正規化；課程清單保持原始格式
    ///
    /// 先解成格式無關的值樹，再替換其中字串值的 `${VAR}`，最後對應到文件結構。
    /// 替換發生在解析之後，變數內容中的引號或反斜線不會破壞文件語法。
    pub fn decode(content: &str, format: ConfigFormat) -> Result<RawConfigDocument> {
        let LooseValue(mut tree) = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        map_strings(&mut tree, &mut |s: &str| {
            env_var_pattern()
                .is_match(s)
                .then(|| substitute_env_vars(s))
        });
        serde_json::from_value(tree).map_err(ConfigError::StructureError)
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

/// 替換字串中的 ${VAR_NAME}；未設定的變數原樣保留
pub fn substitute_env_vars(content: &str) -> String {
    env_var_pattern()
        .replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}
