#[cfg(feature = "cli")]
pub mod cli;
pub mod document;
pub mod loader;

pub use document::{
    AiSetting, ApiQueSetting, BasicSetting, ConfigDocument, CoursesCustom, CoursesSettings,
    EmailInform, RawConfigDocument, Setting, UserProfile,
};
pub use loader::{ConfigFormat, ConfigLoader};
