use crate::core::{matcher, normalizer};
use crate::domain::model::{CourseReference, RawReferenceEntry};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_optional_url, validate_port, validate_switch, Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COMPLETION_TONE: i64 = 1;
pub const DEFAULT_COLOR_LOG: i64 = 1;
pub const DEFAULT_LOG_OUT_FILE_SW: i64 = 1;
pub const DEFAULT_LOG_LEVEL: &str = "INFO";
pub const DEFAULT_LOG_MODEL: i64 = 5;

/// 整份設定檔
///
/// `R` 是課程參照的型別：解碼後是 [`RawReferenceEntry`]，正規化後是 [`CourseReference`]。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument<R = CourseReference> {
    #[serde(default)]
    pub setting: Setting,
    #[serde(default = "Vec::new")]
    pub users: Vec<UserProfile<R>>,
}

/// 剛解碼、課程清單尚未正規化的設定檔
pub type RawConfigDocument = ConfigDocument<RawReferenceEntry>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Setting {
    pub basic_setting: BasicSetting,
    pub email_inform: EmailInform,
    pub ai_setting: AiSetting,
    pub api_que_setting: ApiQueSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BasicSetting {
    /// 刷完提示音 (0 關閉, 1 開啟)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_tone: Option<i64>,
    /// 彩色日誌 (0 關閉, 1 開啟)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_log: Option<i64>,
    /// 輸出日誌檔 (0 不輸出, 1 輸出)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_out_file_sw: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// 日誌模式：0 以影片為基準，1 以課程為基準
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_model: Option<i64>,
}

impl BasicSetting {
    pub fn completion_tone(&self) -> i64 {
        self.completion_tone.unwrap_or(DEFAULT_COMPLETION_TONE)
    }

    pub fn color_log(&self) -> i64 {
        self.color_log.unwrap_or(DEFAULT_COLOR_LOG)
    }

    pub fn log_out_file_sw(&self) -> i64 {
        self.log_out_file_sw.unwrap_or(DEFAULT_LOG_OUT_FILE_SW)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_model(&self) -> i64 {
        self.log_model.unwrap_or(DEFAULT_LOG_MODEL)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailInform {
    pub sw: i64,
    #[serde(rename = "SMTPHost", alias = "smtpHost")]
    pub smtp_host: String,
    #[serde(rename = "SMTPPort", alias = "smtpPort")]
    pub smtp_port: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AiSetting {
    pub ai_type: String,
    pub ai_url: String,
    pub model: String,
    #[serde(rename = "API_KEY")]
    pub api_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiQueSetting {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile<R = CourseReference> {
    #[serde(default)]
    pub account_type: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub password: String,
    /// 是否使用代理 IP
    #[serde(default)]
    pub is_proxy: i64,
    #[serde(default = "Default::default")]
    pub courses_custom: CoursesCustom<R>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursesCustom<R = CourseReference> {
    #[serde(default)]
    pub video_model: i64,
    #[serde(default)]
    pub auto_exam: i64,
    #[serde(default)]
    pub exam_auto_submit: i64,
    #[serde(default = "Vec::new")]
    pub exclude_courses: Vec<R>,
    #[serde(default = "Vec::new")]
    pub include_courses: Vec<R>,
    #[serde(default)]
    pub courses_settings: Vec<CoursesSettings>,
}

// 手寫而非 derive，避免要求 R: Default
impl<R> Default for CoursesCustom<R> {
    fn default() -> Self {
        Self {
            video_model: 0,
            auto_exam: 0,
            exam_auto_submit: 0,
            exclude_courses: Vec::new(),
            include_courses: Vec::new(),
            courses_settings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoursesSettings {
    pub name: String,
    pub include_exams: Vec<String>,
    pub exclude_exams: Vec<String>,
}

impl<R> CoursesCustom<R> {
    /// 以同一個轉換處理 include / exclude 兩份清單，其餘欄位原樣搬移
    pub fn map_references<S>(self, mut f: impl FnMut(Vec<R>) -> Vec<S>) -> CoursesCustom<S> {
        CoursesCustom {
            video_model: self.video_model,
            auto_exam: self.auto_exam,
            exam_auto_submit: self.exam_auto_submit,
            include_courses: f(self.include_courses),
            exclude_courses: f(self.exclude_courses),
            courses_settings: self.courses_settings,
        }
    }
}

impl<R: crate::domain::ports::ReferencePattern> CoursesCustom<R> {
    pub fn includes_course(&self, name: &str, id: &str) -> bool {
        matcher::matches(name, id, &self.include_courses)
    }

    pub fn excludes_course(&self, name: &str, id: &str) -> bool {
        matcher::matches(name, id, &self.exclude_courses)
    }
}

impl<R> UserProfile<R> {
    pub fn map_references<S>(self, f: impl FnMut(Vec<R>) -> Vec<S>) -> UserProfile<S> {
        UserProfile {
            account_type: self.account_type,
            url: self.url,
            account: self.account,
            password: self.password,
            is_proxy: self.is_proxy,
            courses_custom: self.courses_custom.map_references(f),
        }
    }
}

impl RawConfigDocument {
    /// 每位使用者的 include / exclude 清單各正規化一次，回傳新的文件
    pub fn normalize(self) -> ConfigDocument {
        let users = self
            .users
            .into_iter()
            .enumerate()
            .map(|(index, user)| {
                tracing::debug!(
                    index,
                    account = %user.account,
                    include = user.courses_custom.include_courses.len(),
                    exclude = user.courses_custom.exclude_courses.len(),
                    "normalizing course lists"
                );
                user.map_references(normalizer::normalize)
            })
            .collect();

        ConfigDocument {
            setting: self.setting,
            users,
        }
    }
}

impl<R> ConfigDocument<R> {
    /// 解碼後的預設值補齊，與解碼本身分開執行
    pub fn apply_defaults(&mut self) {
        let basic = &mut self.setting.basic_setting;
        basic.completion_tone.get_or_insert(DEFAULT_COMPLETION_TONE);
        basic.color_log.get_or_insert(DEFAULT_COLOR_LOG);
        basic.log_out_file_sw.get_or_insert(DEFAULT_LOG_OUT_FILE_SW);
        basic
            .log_level
            .get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
        if basic.log_model.is_none() {
            tracing::debug!(default = DEFAULT_LOG_MODEL, "logModel not set, applying default");
            basic.log_model = Some(DEFAULT_LOG_MODEL);
        }
    }

    pub fn find_user(&self, account: &str) -> Option<&UserProfile<R>> {
        self.users.iter().find(|u| u.account == account)
    }
}

impl<R> Validate for ConfigDocument<R> {
    fn validate(&self) -> Result<()> {
        let basic = &self.setting.basic_setting;
        validate_switch("setting.basicSetting.completionTone", basic.completion_tone())?;
        validate_switch("setting.basicSetting.colorLog", basic.color_log())?;
        validate_switch("setting.basicSetting.logOutFileSw", basic.log_out_file_sw())?;

        let email = &self.setting.email_inform;
        validate_switch("setting.emailInform.sw", email.sw)?;
        if email.sw == 1 {
            validate_non_empty_string("setting.emailInform.SMTPHost", &email.smtp_host)?;
            validate_port("setting.emailInform.SMTPPort", &email.smtp_port)?;
        }

        validate_optional_url("setting.aiSetting.aiUrl", &self.setting.ai_setting.ai_url)?;
        validate_optional_url("setting.apiQueSetting.url", &self.setting.api_que_setting.url)?;

        for (i, user) in self.users.iter().enumerate() {
            validate_optional_url(&format!("users[{}].url", i), &user.url)?;
            validate_switch(&format!("users[{}].isProxy", i), user.is_proxy)?;
        }

        Ok(())
    }
}
