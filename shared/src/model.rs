use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ApiError, ApiResult};

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 后端可能用 `null` 表示空集合
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 学生
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// 数据库 ID，持久化前为空
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub class_grade: String,
    /// 学校分配的学号，与数据库 ID 无关
    pub student_id: String,
    /// 仅在后端附带时有值
    #[serde(default, deserialize_with = "null_as_default")]
    pub vaccination_records: Vec<VaccinationRecord>,
}

impl Student {
    pub fn has_vaccination_records(&self) -> bool {
        !self.vaccination_records.is_empty()
    }
}

/// 创建/更新学生时提交的最小载荷
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    pub name: String,
    pub class_grade: String,
    pub student_id: String,
}

impl StudentPayload {
    pub fn validate(&self) -> ApiResult<()> {
        if self.name.trim().is_empty()
            || self.student_id.trim().is_empty()
            || self.class_grade.trim().is_empty()
        {
            return Err(ApiError::validation(
                "Please fill in Name, Student ID, and Class/Grade.",
            ));
        }
        Ok(())
    }
}

impl From<&Student> for StudentPayload {
    fn from(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            class_grade: student.class_grade.clone(),
            student_id: student.student_id.clone(),
        }
    }
}

/// 接种活动
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationDrive {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub vaccine_name: String,
    /// 缺失时界面显示 `N/A`，且不可被选中
    #[serde(default, alias = "driveDate", with = "crate::date::optional")]
    pub date: Option<NaiveDate>,
    pub available_doses: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub applicable_classes: Vec<String>,
    #[serde(default)]
    pub completed: bool,
}

impl VaccinationDrive {
    /// 是否可出现在"标记已接种"的活动选择列表中
    pub fn is_selectable_on(&self, today: NaiveDate) -> bool {
        !self.completed && self.available_doses > 0 && self.date.is_some_and(|d| d >= today)
    }
}

/// 过滤出可用于接种登记的活动
pub fn selectable_drives(drives: &[VaccinationDrive], today: NaiveDate) -> Vec<VaccinationDrive> {
    drives
        .iter()
        .filter(|d| d.is_selectable_on(today))
        .cloned()
        .collect()
}

/// 创建/更新接种活动时提交的载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrivePayload {
    pub vaccine_name: String,
    #[serde(with = "crate::date::flexible")]
    pub date: NaiveDate,
    pub available_doses: u32,
    pub applicable_classes: Vec<String>,
    pub completed: bool,
}

impl DrivePayload {
    pub fn validate(&self) -> ApiResult<()> {
        if self.vaccine_name.trim().is_empty() || self.available_doses == 0 {
            return Err(ApiError::validation(
                "Please fill all required fields: Vaccine Name, Drive Date, and Available Doses.",
            ));
        }
        if self.applicable_classes.is_empty() {
            return Err(ApiError::validation(
                "Please provide at least one applicable class.",
            ));
        }
        Ok(())
    }
}

/// 解析逗号分隔的班级输入，如 `"5A, 6B"`
pub fn parse_class_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// 接种活动表单缓冲区，所有字段都是输入框中的原始文本
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DriveDraft {
    pub vaccine_name: String,
    /// `<input type="date">` 的值，如 `2024-01-10`
    pub date: String,
    pub available_doses: String,
    /// 逗号分隔的班级列表
    pub applicable_classes: String,
    pub completed: bool,
}

impl DriveDraft {
    pub fn from_drive(drive: &VaccinationDrive) -> Self {
        Self {
            vaccine_name: drive.vaccine_name.clone(),
            date: drive.date.map(crate::date::to_form_value).unwrap_or_default(),
            available_doses: drive.available_doses.to_string(),
            applicable_classes: drive.applicable_classes.join(", "),
            completed: drive.completed,
        }
    }

    /// 转换为载荷并校验
    pub fn to_payload(&self) -> ApiResult<DrivePayload> {
        let Some(date) = crate::date::parse_form_date(&self.date) else {
            return Err(ApiError::validation(
                "Please fill all required fields: Vaccine Name, Drive Date, and Available Doses.",
            ));
        };
        let payload = DrivePayload {
            vaccine_name: self.vaccine_name.trim().to_string(),
            date,
            available_doses: self.available_doses.trim().parse().unwrap_or(0),
            applicable_classes: parse_class_list(&self.applicable_classes),
            completed: self.completed,
        };
        payload.validate()?;
        Ok(payload)
    }
}

/// 接种记录，由"标记已接种"操作在后端生成
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub vaccine_name: String,
    #[serde(default, with = "crate::date::optional")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub drive_id: Option<i64>,
}

/// 仪表盘聚合快照，完全由后端计算
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub total_students: u64,
    pub vaccinated_students: u64,
    /// 0-100 区间的百分比
    pub vaccinated_percentage: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upcoming_drives: Vec<VaccinationDrive>,
}

impl DashboardData {
    pub fn vaccinated_rate_label(&self) -> String {
        format!("{:.2}%", self.vaccinated_percentage)
    }
}

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

impl AuthRequest {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn validate_login(&self) -> ApiResult<()> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(ApiError::validation("Username and password are required."));
        }
        Ok(())
    }

    /// 注册额外要求两次输入的密码一致
    pub fn validate_signup(&self, confirm_password: &str) -> ApiResult<()> {
        if self.username.is_empty() || self.password.is_empty() || confirm_password.is_empty() {
            return Err(ApiError::validation(
                "Username, password, and confirm password are required.",
            ));
        }
        if self.password != confirm_password {
            return Err(ApiError::validation("Passwords do not match."));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
}

// =========================================================
// 查询条件 (Filters)
// =========================================================

/// 学生搜索条件，空白字段不会出现在查询串中
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StudentSearch {
    pub name: String,
    pub class_grade: String,
    pub student_id: String,
    pub vaccine_name: String,
}

pub const DEFAULT_REPORT_PAGE_SIZE: u32 = 10;

/// 报表查询条件
///
/// `page` 从 1 开始（界面语义），发往后端时转换为从 0 开始。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub vaccine_name: String,
    pub page: u32,
    pub size: u32,
}

impl Default for ReportQuery {
    fn default() -> Self {
        Self {
            vaccine_name: String::new(),
            page: 1,
            size: DEFAULT_REPORT_PAGE_SIZE,
        }
    }
}

impl ReportQuery {
    pub fn wire_page(&self) -> u32 {
        self.page.saturating_sub(1)
    }

    pub fn previous(&self) -> Self {
        Self {
            page: self.page.saturating_sub(1).max(1),
            ..self.clone()
        }
    }

    pub fn next(&self) -> Self {
        Self {
            page: self.page + 1,
            ..self.clone()
        }
    }
}

// =========================================================
// 报表 (Reports)
// =========================================================

/// 分页报表响应，`content` 中是附带接种记录的学生
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<Student>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_elements: Option<u64>,
    /// 后端页码（从 0 开始）
    #[serde(default)]
    pub number: Option<u32>,
}

impl ReportPage {
    /// 给定界面页码（从 1 开始）是否还有下一页；总页数未知时不做限制
    pub fn has_next_page(&self, ui_page: u32) -> bool {
        match self.total_pages {
            Some(total) => ui_page < total,
            None => true,
        }
    }
}

/// 报表表格中的一行，对应一条接种记录
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportRow {
    /// 记录 ID；记录没有 ID 时由页码与位置合成，不同页之间不会重复
    pub key: String,
    pub vaccine_name: String,
    pub student_name: String,
    pub date: Option<NaiveDate>,
}

/// 把一页学生及其接种记录展开为表格行
pub fn report_rows(page: &ReportPage) -> Vec<ReportRow> {
    let number = page.number.unwrap_or_default();
    page.content
        .iter()
        .enumerate()
        .flat_map(|(i, student)| {
            student
                .vaccination_records
                .iter()
                .enumerate()
                .map(move |(j, record)| ReportRow {
                    key: match record.id {
                        Some(id) => format!("r{}", id),
                        None => format!("p{}-s{}-{}", number, i, j),
                    },
                    vaccine_name: record.vaccine_name.clone(),
                    student_name: student.name.clone(),
                    date: record.date,
                })
        })
        .collect()
}

/// 报表下载格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Excel,
    Pdf,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 3] = [ReportFormat::Csv, ReportFormat::Excel, ReportFormat::Pdf];

    /// 查询参数中的取值
    pub fn as_query(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Excel => "excel",
            ReportFormat::Pdf => "pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Excel => "xlsx",
            ReportFormat::Pdf => "pdf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "CSV",
            ReportFormat::Excel => "Excel",
            ReportFormat::Pdf => "PDF",
        }
    }

    pub fn file_name(&self) -> String {
        format!("vaccination_report.{}", self.extension())
    }
}

// =========================================================
// 文件 (Files)
// =========================================================

/// 待上传的文件
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// 下载得到的报表文件
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn drive(doses: u32, completed: bool, date: &str) -> VaccinationDrive {
        VaccinationDrive {
            id: Some(1),
            vaccine_name: "BCG".into(),
            date: Some(date.parse().unwrap()),
            available_doses: doses,
            applicable_classes: vec!["5A".into()],
            completed,
        }
    }

    #[test]
    fn student_decodes_null_records() {
        let student: Student = serde_json::from_value(json!({
            "id": 7,
            "name": "Asha",
            "classGrade": "5A",
            "studentId": "S-007",
            "vaccinationRecords": null
        }))
        .unwrap();
        assert_eq!(student.id, Some(7));
        assert!(!student.has_vaccination_records());
    }

    #[test]
    fn drive_accepts_drive_date_alias_and_datetime() {
        let drive: VaccinationDrive = serde_json::from_value(json!({
            "id": 3,
            "vaccineName": "BCG",
            "driveDate": "2024-01-10T09:30:00",
            "availableDoses": 50,
            "applicableClasses": ["5A"],
            "completed": false
        }))
        .unwrap();
        assert_eq!(drive.date, NaiveDate::from_ymd_opt(2024, 1, 10));
    }

    #[test]
    fn drive_without_date_decodes_but_is_not_selectable() {
        let drives: Vec<VaccinationDrive> = serde_json::from_value(json!([
            {
                "id": 3,
                "vaccineName": "BCG",
                "date": "2024-01-10",
                "availableDoses": 50,
                "applicableClasses": ["5A"]
            },
            {
                "id": 4,
                "vaccineName": "Polio",
                "date": null,
                "availableDoses": 20,
                "applicableClasses": ["6B"]
            }
        ]))
        .unwrap();
        assert_eq!(drives.len(), 2);
        assert_eq!(drives[1].date, None);
        assert_eq!(crate::date::format_optional_date(drives[1].date), "N/A");

        let today = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let picked = selectable_drives(&drives, today);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].id, Some(3));

        // 编辑时日期框留空，提交前必须补填
        let draft = DriveDraft::from_drive(&drives[1]);
        assert_eq!(draft.date, "");
        assert_eq!(
            draft.to_payload().unwrap_err().kind,
            crate::error::ApiErrorKind::Validation
        );
    }

    #[test]
    fn drive_payload_wire_shape() {
        let payload = DrivePayload {
            vaccine_name: "BCG".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            available_doses: 50,
            applicable_classes: vec!["5A".into()],
            completed: false,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "vaccineName": "BCG",
                "date": "2024-01-10",
                "availableDoses": 50,
                "applicableClasses": ["5A"],
                "completed": false
            })
        );
    }

    #[test]
    fn selectable_excludes_empty_completed_and_past() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let drives = vec![
            drive(10, false, "2024-01-10"),
            drive(0, false, "2024-01-10"),
            drive(10, true, "2024-01-10"),
            drive(10, false, "2024-01-01"),
        ];
        let picked = selectable_drives(&drives, today);
        assert_eq!(picked, vec![drive(10, false, "2024-01-10")]);
        assert!(drive(1, false, "2024-01-05").is_selectable_on(today));
    }

    #[test]
    fn payload_validation() {
        let mut student = StudentPayload {
            name: "Asha".into(),
            class_grade: "5A".into(),
            student_id: " ".into(),
        };
        assert!(student.validate().is_err());
        student.student_id = "S-1".into();
        assert!(student.validate().is_ok());

        let mut payload = DrivePayload {
            vaccine_name: "BCG".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            available_doses: 0,
            applicable_classes: parse_class_list("5A, 6B"),
            completed: false,
        };
        assert!(payload.validate().is_err());
        payload.available_doses = 5;
        assert!(payload.validate().is_ok());
        payload.applicable_classes = parse_class_list(" , ");
        let err = payload.validate().unwrap_err();
        assert_eq!(err.message, "Please provide at least one applicable class.");
    }

    #[test]
    fn drive_draft_round_trip() {
        let stored = drive(50, false, "2024-01-10");
        let draft = DriveDraft::from_drive(&stored);
        assert_eq!(draft.date, "2024-01-10");
        assert_eq!(draft.applicable_classes, "5A");

        let payload = draft.to_payload().unwrap();
        assert_eq!(
            payload,
            DrivePayload {
                vaccine_name: "BCG".into(),
                date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                available_doses: 50,
                applicable_classes: vec!["5A".into()],
                completed: false,
            }
        );
    }

    #[test]
    fn drive_draft_rejects_missing_fields() {
        let mut draft = DriveDraft {
            vaccine_name: "BCG".into(),
            date: String::new(),
            available_doses: "50".into(),
            applicable_classes: "5A".into(),
            completed: false,
        };
        assert!(draft.to_payload().is_err());

        draft.date = "2024-01-10".into();
        draft.available_doses = "many".into();
        let err = draft.to_payload().unwrap_err();
        assert_eq!(err.kind, crate::error::ApiErrorKind::Validation);

        draft.available_doses = "5".into();
        draft.applicable_classes = " , ".into();
        assert_eq!(
            draft.to_payload().unwrap_err().message,
            "Please provide at least one applicable class."
        );
    }

    #[test]
    fn auth_form_validation() {
        assert!(AuthRequest::new("", "pw").validate_login().is_err());
        assert!(AuthRequest::new("nurse", "pw").validate_login().is_ok());

        let request = AuthRequest::new("nurse", "pw");
        assert_eq!(
            request.validate_signup("other").unwrap_err().message,
            "Passwords do not match."
        );
        assert!(request.validate_signup("").is_err());
        assert!(request.validate_signup("pw").is_ok());
    }

    #[test]
    fn class_list_is_trimmed() {
        assert_eq!(parse_class_list("5A, 6B,,7C "), vec!["5A", "6B", "7C"]);
        assert!(parse_class_list("").is_empty());
    }

    #[test]
    fn report_rows_flatten_records() {
        let record = |id, name: &str| VaccinationRecord {
            id: Some(id),
            vaccine_name: name.into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10),
            student_id: Some(1),
            drive_id: Some(3),
        };
        let students = vec![
            Student {
                id: Some(1),
                name: "Asha".into(),
                class_grade: "5A".into(),
                student_id: "S-1".into(),
                vaccination_records: vec![record(11, "BCG"), record(12, "Polio")],
            },
            Student {
                name: "Ravi".into(),
                ..Default::default()
            },
        ];
        let page = ReportPage {
            content: students,
            ..Default::default()
        };
        let rows = report_rows(&page);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].vaccine_name, "Polio");
        assert_eq!(rows[1].student_name, "Asha");
        assert_eq!(rows[0].key, "r11");
    }

    #[test]
    fn edited_rows_get_new_keys() {
        use std::collections::HashSet;

        let stored = Student {
            id: Some(9),
            name: "Asha".into(),
            class_grade: "5A".into(),
            student_id: "S009".into(),
            vaccination_records: Vec::new(),
        };
        let renamed = Student {
            name: "Asha K".into(),
            ..stored.clone()
        };
        let keys: HashSet<Student> = [stored.clone(), renamed, stored].into_iter().collect();
        assert_eq!(keys.len(), 2);

        let mut edited = drive(50, false, "2024-01-10");
        edited.applicable_classes.push("6B".into());
        assert_ne!(edited, drive(50, false, "2024-01-10"));
    }

    #[test]
    fn report_rows_without_ids_differ_between_pages() {
        let student = |name: &str| Student {
            name: name.into(),
            vaccination_records: vec![VaccinationRecord {
                id: None,
                vaccine_name: "BCG".into(),
                date: None,
                student_id: None,
                drive_id: None,
            }],
            ..Default::default()
        };
        let first = ReportPage {
            content: vec![student("Asha")],
            number: Some(0),
            ..Default::default()
        };
        let second = ReportPage {
            content: vec![student("Ravi")],
            number: Some(1),
            ..Default::default()
        };

        let first_rows = report_rows(&first);
        let second_rows = report_rows(&second);
        assert_eq!(first_rows[0].key, "p0-s0-0");
        assert_eq!(second_rows[0].key, "p1-s0-0");
        assert_eq!(second_rows[0].date, None);
    }

    #[test]
    fn report_query_paging() {
        let q = ReportQuery::default();
        assert_eq!(q.wire_page(), 0);
        assert_eq!(q.previous().page, 1);
        assert_eq!(q.next().next().wire_page(), 2);

        let page = ReportPage {
            total_pages: Some(2),
            ..Default::default()
        };
        assert!(page.has_next_page(1));
        assert!(!page.has_next_page(2));
    }

    #[test]
    fn report_format_file_names() {
        assert_eq!(ReportFormat::Excel.file_name(), "vaccination_report.xlsx");
        assert_eq!(ReportFormat::Excel.as_query(), "excel");
        assert_eq!(ReportFormat::Pdf.file_name(), "vaccination_report.pdf");
        assert_eq!(ReportFormat::Csv.file_name(), "vaccination_report.csv");
    }

    #[test]
    fn dashboard_rate_label() {
        let data = DashboardData {
            vaccinated_percentage: 66.666,
            ..Default::default()
        };
        assert_eq!(data.vaccinated_rate_label(), "66.67%");
    }
}
