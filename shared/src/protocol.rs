use crate::http::HttpMethod;
use crate::model::{
    AuthRequest, AuthResponse, DashboardData, DrivePayload, ReportPage, ReportQuery, Student,
    StudentPayload, StudentSearch, VaccinationDrive,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The JSON body type; `()` when the request carries no body.
    type Body: Serialize;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The URL path relative to the API base.
    fn path(&self) -> String;

    /// Query parameters, in order.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn body(&self) -> Option<&Self::Body> {
        None
    }
}

/// Accepts any JSON value; non-arrays decode as an empty list.
///
/// Arrays are decoded strictly: one malformed element fails the whole list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LenientList<T>(pub Vec<T>);

impl<'de, T: DeserializeOwned> Deserialize<'de> for LenientList<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<T>, _>>()
                .map(LenientList)
                .map_err(<D::Error as serde::de::Error>::custom),
            _ => Ok(LenientList(Vec::new())),
        }
    }
}

fn push_if_present(query: &mut Vec<(&'static str, String)>, key: &'static str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        query.push((key, value.to_string()));
    }
}

// =========================================================
// Auth
// =========================================================

pub struct LoginRequest(pub AuthRequest);

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    type Body = AuthRequest;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/login".to_string()
    }

    fn body(&self) -> Option<&AuthRequest> {
        Some(&self.0)
    }
}

/// Signup answers with a plain message, so its response is read as text by the service.
pub struct RegisterRequest(pub AuthRequest);

impl ApiRequest for RegisterRequest {
    type Response = String;
    type Body = AuthRequest;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/register".to_string()
    }

    fn body(&self) -> Option<&AuthRequest> {
        Some(&self.0)
    }
}

// =========================================================
// Dashboard
// =========================================================

pub struct DashboardRequest;

impl ApiRequest for DashboardRequest {
    type Response = DashboardData;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/dashboard".to_string()
    }
}

// =========================================================
// Drives
// =========================================================

/// Only upcoming drives; there is no "all drives" request.
pub struct UpcomingDrivesRequest;

impl ApiRequest for UpcomingDrivesRequest {
    type Response = Vec<VaccinationDrive>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/drives/upcoming".to_string()
    }
}

pub struct GetDriveRequest(pub i64);

impl ApiRequest for GetDriveRequest {
    type Response = VaccinationDrive;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/drives/{}", self.0)
    }
}

pub struct CreateDriveRequest(pub DrivePayload);

impl ApiRequest for CreateDriveRequest {
    type Response = VaccinationDrive;
    type Body = DrivePayload;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/drives".to_string()
    }

    fn body(&self) -> Option<&DrivePayload> {
        Some(&self.0)
    }
}

pub struct UpdateDriveRequest {
    pub id: i64,
    pub payload: DrivePayload,
}

impl ApiRequest for UpdateDriveRequest {
    type Response = VaccinationDrive;
    type Body = DrivePayload;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/drives/{}", self.id)
    }

    fn body(&self) -> Option<&DrivePayload> {
        Some(&self.payload)
    }
}

pub struct DeleteDriveRequest(pub i64);

impl ApiRequest for DeleteDriveRequest {
    type Response = ();
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/drives/{}", self.0)
    }
}

// =========================================================
// Students
// =========================================================

pub struct SearchStudentsRequest<'a>(pub &'a StudentSearch);

impl ApiRequest for SearchStudentsRequest<'_> {
    type Response = LenientList<Student>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/students".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push_if_present(&mut query, "name", &self.0.name);
        push_if_present(&mut query, "classGrade", &self.0.class_grade);
        push_if_present(&mut query, "studentId", &self.0.student_id);
        push_if_present(&mut query, "vaccineName", &self.0.vaccine_name);
        query
    }
}

pub struct GetStudentRequest(pub i64);

impl ApiRequest for GetStudentRequest {
    type Response = Student;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/students/{}", self.0)
    }
}

pub struct CreateStudentRequest(pub StudentPayload);

impl ApiRequest for CreateStudentRequest {
    type Response = Student;
    type Body = StudentPayload;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/students".to_string()
    }

    fn body(&self) -> Option<&StudentPayload> {
        Some(&self.0)
    }
}

pub struct UpdateStudentRequest {
    pub id: i64,
    pub payload: StudentPayload,
}

impl ApiRequest for UpdateStudentRequest {
    type Response = Student;
    type Body = StudentPayload;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/students/{}", self.id)
    }

    fn body(&self) -> Option<&StudentPayload> {
        Some(&self.payload)
    }
}

pub struct DeleteStudentRequest(pub i64);

impl ApiRequest for DeleteStudentRequest {
    type Response = ();
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/students/{}", self.0)
    }
}

/// Identifiers travel as query parameters; the request has no body.
pub struct MarkVaccinatedRequest {
    pub student_id: i64,
    pub drive_id: i64,
    pub vaccine_name: String,
}

impl ApiRequest for MarkVaccinatedRequest {
    type Response = Student;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/students/vaccinate".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("studentId", self.student_id.to_string()),
            ("driveId", self.drive_id.to_string()),
            ("vaccineName", self.vaccine_name.clone()),
        ]
    }
}

pub const BULK_IMPORT_PATH: &str = "/students/bulk-import";

// =========================================================
// Reports
// =========================================================

pub struct ReportPageRequest<'a>(pub &'a ReportQuery);

impl ApiRequest for ReportPageRequest<'_> {
    type Response = ReportPage;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/reports".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push_if_present(&mut query, "vaccineName", &self.0.vaccine_name);
        query.push(("page", self.0.wire_page().to_string()));
        query.push(("size", self.0.size.to_string()));
        query
    }
}

pub const REPORT_DOWNLOAD_PATH: &str = "/reports/download";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_omits_blank_filters() {
        let search = StudentSearch {
            name: " Asha ".into(),
            vaccine_name: "BCG".into(),
            ..Default::default()
        };
        assert_eq!(
            SearchStudentsRequest(&search).query(),
            vec![("name", "Asha".to_string()), ("vaccineName", "BCG".to_string())]
        );
        assert!(SearchStudentsRequest(&StudentSearch::default()).query().is_empty());
    }

    #[test]
    fn report_query_is_zero_based() {
        let query = ReportQuery {
            vaccine_name: String::new(),
            page: 3,
            size: 10,
        };
        assert_eq!(
            ReportPageRequest(&query).query(),
            vec![("page", "2".to_string()), ("size", "10".to_string())]
        );
    }

    #[test]
    fn lenient_list_accepts_non_arrays() {
        let list: LenientList<u32> = serde_json::from_str("[1,2]").unwrap();
        assert_eq!(list.0, vec![1, 2]);
        let list: LenientList<u32> = serde_json::from_str(r#"{"message":"none"}"#).unwrap();
        assert!(list.0.is_empty());
        let list: LenientList<u32> = serde_json::from_str("null").unwrap();
        assert!(list.0.is_empty());
    }

    #[test]
    fn lenient_list_rejects_malformed_elements() {
        let err = serde_json::from_str::<LenientList<u32>>(r#"[1, "two", 3]"#).unwrap_err();
        assert!(err.to_string().contains("invalid type"));
    }

    #[test]
    fn paths_carry_ids() {
        assert_eq!(GetDriveRequest(3).path(), "/drives/3");
        assert_eq!(DeleteStudentRequest(7).path(), "/students/7");
        assert_eq!(<DeleteStudentRequest as ApiRequest>::METHOD, HttpMethod::Delete);
    }
}
