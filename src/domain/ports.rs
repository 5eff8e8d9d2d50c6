use crate::domain::model::CourseReference;

/// 能判斷「某門課程是否被此設定項目指到」的東西
///
/// 標準記錄採 ID 優先規則；舊格式的純文字只比對名稱。
pub trait ReferencePattern {
    fn matches_course(&self, name: &str, id: &str) -> bool;
}

impl ReferencePattern for CourseReference {
    fn matches_course(&self, name: &str, id: &str) -> bool {
        // 設定了 ID 就只看 ID，名稱不再參與比對
        if self.has_id() {
            self.id == id
        } else {
            self.name == name
        }
    }
}

impl ReferencePattern for str {
    fn matches_course(&self, name: &str, _id: &str) -> bool {
        self == name
    }
}

impl ReferencePattern for String {
    fn matches_course(&self, name: &str, id: &str) -> bool {
        self.as_str().matches_course(name, id)
    }
}

impl<T: ReferencePattern + ?Sized> ReferencePattern for &T {
    fn matches_course(&self, name: &str, id: &str) -> bool {
        (**self).matches_course(name, id)
    }
}
