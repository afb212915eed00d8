use super::*;
use crate::error::ApiErrorKind;
use crate::http::{HttpMethod, HttpResponse, RequestBody};
use crate::model::{
    DriveDraft, DrivePayload, ReportFormat, ReportQuery, StudentPayload, StudentSearch,
    UploadFile,
};
use crate::testing::{query_pairs, test_client};
use chrono::NaiveDate;
use serde_json::json;

// =========================================================
// 辅助函数
// =========================================================

fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
    list.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn student_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "classGrade": "5A",
        "studentId": format!("S{:03}", id),
        "vaccinationRecords": null
    })
}

// =========================================================
// 认证
// =========================================================

#[tokio::test]
async fn login_success_persists_session() {
    let (api, _, _) = test_client("/login");
    api.transport()
        .mock_json(HttpMethod::Post, "/login", 200, json!({ "success": true }));

    let response = api.auth().login("nurse", "secret").await.unwrap();

    assert!(response.success);
    assert!(api.session().is_authenticated());
    assert_eq!(api.session().username().as_deref(), Some("nurse"));

    let req = api.transport().last_request();
    let RequestBody::Json(body) = &req.body else {
        panic!("login must send JSON");
    };
    let body: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(body, json!({ "username": "nurse", "password": "secret" }));
    assert_eq!(
        req.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
}

#[tokio::test]
async fn login_failure_leaves_session_empty() {
    let (api, _, _) = test_client("/login");
    api.transport()
        .mock_json(HttpMethod::Post, "/login", 200, json!({ "success": false }));

    let response = api.auth().login("nurse", "wrong").await.unwrap();

    assert!(!response.success);
    assert!(!api.session().is_authenticated());
}

#[tokio::test]
async fn logout_clears_session() {
    let (api, _, _) = test_client("/");
    api.session().set("nurse");

    api.auth().logout();

    assert!(!api.session().is_authenticated());
    assert_eq!(api.session().username(), None);
    // 注销不访问后端
    assert_eq!(api.transport().request_count(), 0);
}

#[tokio::test]
async fn signup_returns_backend_message() {
    let (api, _, _) = test_client("/signup");
    api.transport().mock(
        HttpMethod::Post,
        "/register",
        HttpResponse::new(200, "User registered successfully"),
    );

    let message = api.auth().signup("nurse", "secret").await.unwrap();
    assert_eq!(message, "User registered successfully");
    // 注册不会登录
    assert!(!api.session().is_authenticated());
}

#[tokio::test]
async fn signup_rejection_surfaces_plain_message() {
    let (api, _, navigator) = test_client("/signup");
    api.transport().mock(
        HttpMethod::Post,
        "/register",
        HttpResponse::new(400, "Username already exists"),
    );

    let err = api.auth().signup("nurse", "secret").await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Rejected);
    assert_eq!(err.to_string(), "Username already exists");
    assert!(navigator.assigned().is_empty());
}

// =========================================================
// 学生
// =========================================================

#[tokio::test]
async fn search_sends_filters_and_tolerates_non_array() {
    let (api, _, _) = test_client("/students");
    api.transport()
        .mock_json(HttpMethod::Get, "/students", 200, json!({ "unexpected": true }));

    let search = StudentSearch {
        class_grade: "5A".into(),
        vaccine_name: "BCG".into(),
        ..StudentSearch::default()
    };
    let students = api.students().search(&search).await.unwrap();

    assert!(students.is_empty());
    let req = api.transport().last_request();
    assert_eq!(
        query_pairs(&req),
        pairs(&[("classGrade", "5A"), ("vaccineName", "BCG")])
    );
}

#[tokio::test]
async fn search_decodes_students_with_null_records() {
    let (api, _, _) = test_client("/students");
    api.transport().mock_json(
        HttpMethod::Get,
        "/students",
        200,
        json!([student_json(1, "Asha"), student_json(2, "Ravi")]),
    );

    let students = api.students().search(&StudentSearch::default()).await.unwrap();
    assert_eq!(students.len(), 2);
    assert_eq!(students[1].name, "Ravi");
    assert!(!students[0].has_vaccination_records());
}

#[tokio::test]
async fn search_surfaces_malformed_rows() {
    let (api, _, _) = test_client("/students");
    let mut broken = student_json(2, "Ravi");
    broken["classGrade"] = serde_json::Value::Null;
    api.transport().mock_json(
        HttpMethod::Get,
        "/students",
        200,
        json!([student_json(1, "Asha"), broken]),
    );

    let err = api
        .students()
        .search(&StudentSearch::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Decode);
}

#[tokio::test]
async fn get_student_by_id() {
    let (api, _, _) = test_client("/students");
    api.transport()
        .mock_json(HttpMethod::Get, "/students/4", 200, student_json(4, "Meera"));

    let student = api.students().get(4).await.unwrap();
    assert_eq!(student.id, Some(4));
    assert_eq!(student.student_id, "S004");
}

#[tokio::test]
async fn create_and_update_student() {
    let (api, _, _) = test_client("/students");
    api.transport()
        .mock_json(HttpMethod::Post, "/students", 200, student_json(9, "Asha"));
    api.transport()
        .mock_json(HttpMethod::Put, "/students/9", 200, student_json(9, "Asha K"));

    let payload = StudentPayload {
        name: "Asha".into(),
        class_grade: "5A".into(),
        student_id: "S009".into(),
    };
    let created = api.students().create(&payload).await.unwrap();
    assert_eq!(created.id, Some(9));

    let mut edited = StudentPayload::from(&created);
    edited.name = "Asha K".into();
    let updated = api.students().update(9, &edited).await.unwrap();
    assert_eq!(updated.name, "Asha K");

    let req = api.transport().last_request();
    assert_eq!(req.method, HttpMethod::Put);
    let RequestBody::Json(body) = &req.body else {
        panic!("update must send JSON");
    };
    let body: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(
        body,
        json!({ "name": "Asha K", "classGrade": "5A", "studentId": "S009" })
    );
}

#[tokio::test]
async fn delete_student_accepts_empty_body() {
    let (api, _, _) = test_client("/students");
    api.transport()
        .mock(HttpMethod::Delete, "/students/4", HttpResponse::new(200, ""));

    api.students().delete(4).await.unwrap();
    assert_eq!(api.transport().last_request().method, HttpMethod::Delete);
}

#[tokio::test]
async fn mark_vaccinated_uses_query_parameters() {
    let (api, _, _) = test_client("/students");
    let mut vaccinated = student_json(7, "Asha");
    vaccinated["vaccinationRecords"] = json!([{
        "id": 1,
        "vaccineName": "BCG",
        "date": "2024-01-10"
    }]);
    api.transport()
        .mock_json(HttpMethod::Post, "/students/vaccinate", 200, vaccinated);

    let student = api.students().mark_vaccinated(7, 3, "BCG").await.unwrap();

    assert!(student.has_vaccination_records());
    let req = api.transport().last_request();
    assert_eq!(req.method, HttpMethod::Post);
    assert_eq!(req.body, RequestBody::Empty);
    assert_eq!(
        query_pairs(&req),
        pairs(&[("studentId", "7"), ("driveId", "3"), ("vaccineName", "BCG")])
    );
}

#[tokio::test]
async fn vaccination_is_visible_on_next_fetch() {
    let (api, _, _) = test_client("/students");
    let mut vaccinated = student_json(7, "Asha");
    vaccinated["vaccinationRecords"] = json!([{
        "id": 21,
        "vaccineName": "BCG",
        "date": "2024-01-10",
        "studentId": 7,
        "driveId": 3
    }]);
    api.transport()
        .mock_json(HttpMethod::Post, "/students/vaccinate", 200, vaccinated.clone());
    api.transport()
        .mock_json(HttpMethod::Get, "/students/7", 200, vaccinated);

    api.students().mark_vaccinated(7, 3, "BCG").await.unwrap();
    let student = api.students().get(7).await.unwrap();

    assert_eq!(student.vaccination_records.len(), 1);
    let record = &student.vaccination_records[0];
    assert_eq!(record.vaccine_name, "BCG");
    assert_eq!(record.drive_id, Some(3));
    assert_eq!(record.student_id, Some(7));
    assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 10));
    assert_eq!(api.transport().request_count(), 2);
}

#[tokio::test]
async fn bulk_import_surfaces_malformed_rows() {
    let (api, _, _) = test_client("/students");
    api.transport().mock_json(
        HttpMethod::Post,
        "/students/bulk-import",
        200,
        json!([student_json(1, "Asha"), { "id": 2, "name": 42 }]),
    );

    let file = UploadFile {
        file_name: "students.csv".into(),
        content_type: "text/csv".into(),
        bytes: b"name,classGrade,studentId\nAsha,5A,S001\n".to_vec(),
    };
    let err = api.students().bulk_import(file).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Decode);
}

#[tokio::test]
async fn bulk_import_posts_multipart_file() {
    let (api, _, _) = test_client("/students");
    api.transport().mock_json(
        HttpMethod::Post,
        "/students/bulk-import",
        200,
        json!([student_json(1, "Asha")]),
    );

    let file = UploadFile {
        file_name: "students.csv".into(),
        content_type: "text/csv".into(),
        bytes: b"name,classGrade,studentId\nAsha,5A,S001\n".to_vec(),
    };
    let imported = api.students().bulk_import(file.clone()).await.unwrap();

    assert_eq!(imported.len(), 1);
    assert_eq!(import_summary(imported.len()), "1 students imported/updated successfully!");

    let req = api.transport().last_request();
    assert_eq!(
        req.body,
        RequestBody::Multipart {
            field: "file".into(),
            file,
        }
    );
    // multipart 的 Content-Type（含边界）由平台生成
    assert!(!req.headers.contains_key("Content-Type"));
    assert!(req.with_credentials);
}

#[tokio::test]
async fn bulk_import_with_no_rows() {
    let (api, _, _) = test_client("/students");
    api.transport()
        .mock(HttpMethod::Post, "/students/bulk-import", HttpResponse::new(200, ""));

    let file = UploadFile {
        file_name: "empty.csv".into(),
        content_type: "text/csv".into(),
        bytes: Vec::new(),
    };
    let imported = api.students().bulk_import(file).await.unwrap();

    assert!(imported.is_empty());
    assert_eq!(import_summary(imported.len()), "0 students imported/updated successfully!");
}

// =========================================================
// 接种活动
// =========================================================

#[tokio::test]
async fn drive_create_then_list() {
    let (api, _, _) = test_client("/drives");
    let stored = json!({
        "id": 3,
        "vaccineName": "BCG",
        "date": "2024-01-10",
        "availableDoses": 50,
        "applicableClasses": ["5A"],
        "completed": false
    });
    api.transport()
        .mock_json(HttpMethod::Post, "/drives", 200, stored.clone());
    api.transport()
        .mock_json(HttpMethod::Get, "/drives/upcoming", 200, json!([stored]));

    let payload = DrivePayload {
        vaccine_name: "BCG".into(),
        date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        available_doses: 50,
        applicable_classes: vec!["5A".into()],
        completed: false,
    };
    let created = api.drives().create(&payload).await.unwrap();
    assert_eq!(created.id, Some(3));

    let RequestBody::Json(body) = &api.transport().last_request().body else {
        panic!("create must send JSON");
    };
    let body: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(body["date"], "2024-01-10");
    assert_eq!(body["availableDoses"], 50);
    assert_eq!(body["applicableClasses"], json!(["5A"]));

    let drives = api.drives().upcoming().await.unwrap();
    assert_eq!(drives.len(), 1);
    assert_eq!(DriveDraft::from_drive(&drives[0]).to_payload().unwrap(), payload);
}

#[tokio::test]
async fn get_drive_by_id() {
    let (api, _, _) = test_client("/drives");
    api.transport().mock_json(
        HttpMethod::Get,
        "/drives/3",
        200,
        json!({
            "id": 3,
            "vaccineName": "BCG",
            "date": null,
            "availableDoses": 12,
            "applicableClasses": null,
            "completed": false
        }),
    );

    let drive = api.drives().get(3).await.unwrap();
    assert_eq!(drive.id, Some(3));
    assert_eq!(drive.available_doses, 12);
    assert_eq!(drive.date, None);
    assert!(drive.applicable_classes.is_empty());
}

#[tokio::test]
async fn drive_update_and_delete() {
    let (api, _, _) = test_client("/drives");
    api.transport().mock_json(
        HttpMethod::Put,
        "/drives/3",
        200,
        json!({
            "id": 3,
            "vaccineName": "BCG",
            "driveDate": "2024-01-12T00:00:00",
            "availableDoses": 40,
            "applicableClasses": ["5A", "5B"],
            "completed": true
        }),
    );
    api.transport()
        .mock(HttpMethod::Delete, "/drives/3", HttpResponse::new(204, ""));

    let payload = DrivePayload {
        vaccine_name: "BCG".into(),
        date: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
        available_doses: 40,
        applicable_classes: vec!["5A".into(), "5B".into()],
        completed: true,
    };
    let updated = api.drives().update(3, &payload).await.unwrap();
    assert_eq!(updated.date, Some(payload.date));
    assert!(updated.completed);

    api.drives().delete(3).await.unwrap();
}

#[tokio::test]
async fn dashboard_fetch() {
    let (api, _, _) = test_client("/");
    api.transport().mock_json(
        HttpMethod::Get,
        "/dashboard",
        200,
        json!({
            "totalStudents": 120,
            "vaccinatedStudents": 45,
            "vaccinatedPercentage": 37.5,
            "upcomingDrives": []
        }),
    );

    let data = api.dashboard().fetch().await.unwrap();
    assert_eq!(data.total_students, 120);
    assert_eq!(data.vaccinated_rate_label(), "37.50%");
}

// =========================================================
// 报表
// =========================================================

#[tokio::test]
async fn report_page_is_zero_based_on_the_wire() {
    let (api, _, _) = test_client("/reports");
    api.transport().mock_json(
        HttpMethod::Get,
        "/reports",
        200,
        json!({ "content": [], "totalPages": 3, "totalElements": 25, "number": 1 }),
    );

    let query = ReportQuery {
        vaccine_name: "BCG".into(),
        page: 2,
        size: 10,
    };
    let page = api.reports().page(&query).await.unwrap();

    assert_eq!(page.total_pages, Some(3));
    assert!(page.has_next_page(2));
    assert_eq!(
        query_pairs(&api.transport().last_request()),
        pairs(&[("vaccineName", "BCG"), ("page", "1"), ("size", "10")])
    );
}

#[tokio::test]
async fn report_download_names_file_by_format() {
    let (api, _, _) = test_client("/reports");
    let bytes = vec![0x50, 0x4b, 0x03, 0x04];
    api.transport().mock(
        HttpMethod::Get,
        "/reports/download",
        HttpResponse::new(200, bytes.clone()).with_content_type(
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ),
    );

    let file = api
        .reports()
        .download(ReportFormat::Excel, "Hep B")
        .await
        .unwrap();

    assert_eq!(file.file_name, "vaccination_report.xlsx");
    assert_eq!(
        file.content_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(file.bytes, bytes);
    assert_eq!(
        query_pairs(&api.transport().last_request()),
        pairs(&[("format", "excel"), ("vaccineName", "Hep B")])
    );
}

#[tokio::test]
async fn report_download_without_filter_or_content_type() {
    let (api, _, _) = test_client("/reports");
    api.transport().mock(
        HttpMethod::Get,
        "/reports/download",
        HttpResponse::new(200, "a,b\n"),
    );

    let file = api.reports().download(ReportFormat::Csv, "  ").await.unwrap();

    assert_eq!(file.file_name, "vaccination_report.csv");
    assert_eq!(file.content_type, "application/octet-stream");
    assert_eq!(
        query_pairs(&api.transport().last_request()),
        pairs(&[("format", "csv")])
    );
}
