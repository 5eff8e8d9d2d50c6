use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    YamlParseError(#[from] serde_yaml::Error),

    #[error("Configuration structure error: {0}")]
    StructureError(serde_json::Error),

    #[error("Unsupported configuration format: {path}")]
    UnsupportedFormatError { path: String },

    #[error("No configuration file found in {dir}")]
    NotFoundError { dir: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Format,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ConfigError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConfigError::IoError(_) | ConfigError::NotFoundError { .. } => ErrorCategory::Io,
            ConfigError::TomlParseError(_)
            | ConfigError::JsonParseError(_)
            | ConfigError::YamlParseError(_)
            | ConfigError::StructureError(_)
            | ConfigError::UnsupportedFormatError { .. } => ErrorCategory::Format,
            ConfigError::InvalidConfigValueError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Medium,
            ErrorCategory::Format => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConfigError::IoError(_) => "確認設定檔路徑存在且可讀取",
            ConfigError::NotFoundError { .. } => "在工作目錄放置 config.yaml、config.toml 或 config.json，或使用 --config 指定路徑",
            ConfigError::TomlParseError(_) => "檢查 TOML 語法，例如引號與表格標頭",
            ConfigError::JsonParseError(_) => "檢查 JSON 語法，例如逗號與括號是否成對",
            ConfigError::YamlParseError(_) => "檢查 YAML 語法，例如縮排與冒號後的空白",
            ConfigError::StructureError(_) => "檢查欄位型別，例如 users 必須是清單",
            ConfigError::UnsupportedFormatError { .. } => "設定檔副檔名必須是 .yaml、.yml、.toml 或 .json",
            ConfigError::InvalidConfigValueError { .. } => "依錯誤訊息修正對應欄位的值",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::IoError(e) => format!("無法讀取設定檔: {}", e),
            ConfigError::NotFoundError { dir } => format!("找不到設定檔 (搜尋目錄: {})", dir),
            ConfigError::TomlParseError(_)
            | ConfigError::JsonParseError(_)
            | ConfigError::YamlParseError(_)
            | ConfigError::StructureError(_) => {
                format!("設定檔內容書寫錯誤: {}", self)
            }
            ConfigError::UnsupportedFormatError { path } => {
                format!("不支援的設定檔格式: {}", path)
            }
            ConfigError::InvalidConfigValueError { field, reason, .. } => {
                format!("設定欄位 {} 不正確: {}", field, reason)
            }
        }
    }

    /// CLI 的結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = ConfigError::InvalidConfigValueError {
            field: "users[0].isProxy".to_string(),
            value: "3".to_string(),
            reason: "must be 0 or 1".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.exit_code(), 2);
        assert!(err.user_friendly_message().contains("users[0].isProxy"));

        let err = ConfigError::NotFoundError {
            dir: "./".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.exit_code(), 3);

        let err = ConfigError::UnsupportedFormatError {
            path: "config.ini".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
    }
}
