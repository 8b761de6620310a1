use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One row of `datas.kcxxcx.rows` as the portal returns it.
#[derive(Debug, Clone, Deserialize)]
#[allow(non_snake_case)] // API字段名与服务器保持一致
pub struct CourseRow {
    #[serde(default, deserialize_with = "lenient_string")]
    pub KCM: String, // 课程名
    #[serde(default, deserialize_with = "lenient_string")]
    pub YWKCM: String, // 英文课程名
    #[serde(default, deserialize_with = "lenient_string")]
    pub XF: String, // 学分
    #[serde(default, deserialize_with = "lenient_string")]
    pub XS: String, // 学时
    #[serde(default, deserialize_with = "lenient_string")]
    pub SJXS: String, // 实验学时
    #[serde(default, deserialize_with = "lenient_string")]
    pub KCH: String, // 课程号
    #[serde(default, deserialize_with = "lenient_string")]
    pub KKDWDM_DISPLAY: String, // 开课学院
    #[serde(default, deserialize_with = "lenient_string")]
    pub KCCCDM_DISPLAY: String, // 开课对象
    #[serde(default, deserialize_with = "lenient_string")]
    pub SKYZDM_DISPLAY: String, // 授课语种
    #[serde(default, deserialize_with = "lenient_string")]
    pub SKYZDM: String, // 授课语种代码
    #[serde(default, deserialize_with = "lenient_string")]
    pub KCBBDM: String, // 课程版本
    #[serde(default, deserialize_with = "lenient_string")]
    pub KCSPDM_DISPLAY: String, // 课程类型
}

/// Flattened catalog entry, one CSV line in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    #[serde(rename = "课程名")]
    pub name: String,
    #[serde(rename = "英文课程名")]
    pub english_name: String,
    #[serde(rename = "学分")]
    pub credit: String,
    #[serde(rename = "学时")]
    pub hours: String,
    #[serde(rename = "实验学时")]
    pub lab_hours: String,
    #[serde(rename = "课程号")]
    pub code: String,
    #[serde(rename = "开课学院")]
    pub college: String,
    #[serde(rename = "开课对象")]
    pub audience: String,
    #[serde(rename = "授课语种")]
    pub language: String,
    #[serde(rename = "授课语种代码")]
    pub language_code: String,
    #[serde(rename = "课程版本")]
    pub version: String,
    #[serde(rename = "课程类型")]
    pub category: String,
}

impl From<CourseRow> for CourseRecord {
    fn from(row: CourseRow) -> Self {
        Self {
            name: row.KCM,
            english_name: row.YWKCM,
            credit: row.XF,
            hours: row.XS,
            lab_hours: row.SJXS,
            code: row.KCH,
            college: row.KKDWDM_DISPLAY,
            audience: row.KCCCDM_DISPLAY,
            language: row.SKYZDM_DISPLAY,
            language_code: row.SKYZDM,
            version: row.KCBBDM,
            category: row.KCSPDM_DISPLAY,
        }
    }
}

/// The portal mixes strings, numbers and nulls for the same column.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}
