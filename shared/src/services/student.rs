use crate::error::ApiResult;
use crate::gateway::{ApiClient, Navigator};
use crate::http::{HttpMethod, HttpRequest, HttpTransport, RequestBody};
use crate::model::{Student, StudentPayload, StudentSearch, UploadFile};
use crate::protocol::{
    BULK_IMPORT_PATH, CreateStudentRequest, DeleteStudentRequest, GetStudentRequest, LenientList,
    MarkVaccinatedRequest, SearchStudentsRequest, UpdateStudentRequest,
};
use crate::session::KeyValueStore;
use crate::{BULK_IMPORT_FIELD, log_info};

/// 学生服务
pub struct StudentService<'a, T, S, N> {
    pub(super) api: &'a ApiClient<T, S, N>,
}

impl<T, S, N> StudentService<'_, T, S, N>
where
    T: HttpTransport,
    S: KeyValueStore,
    N: Navigator,
{
    /// 按条件检索学生，空白条件不发送
    ///
    /// 后端返回非数组时视为没有结果。
    pub async fn search(&self, filters: &StudentSearch) -> ApiResult<Vec<Student>> {
        let LenientList(students) = self.api.execute(&SearchStudentsRequest(filters)).await?;
        Ok(students)
    }

    pub async fn get(&self, id: i64) -> ApiResult<Student> {
        self.api.execute(&GetStudentRequest(id)).await
    }

    pub async fn create(&self, payload: &StudentPayload) -> ApiResult<Student> {
        self.api.execute(&CreateStudentRequest(payload.clone())).await
    }

    pub async fn update(&self, id: i64, payload: &StudentPayload) -> ApiResult<Student> {
        let request = UpdateStudentRequest {
            id,
            payload: payload.clone(),
        };
        self.api.execute(&request).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.api.send(&DeleteStudentRequest(id)).await.map(|_| ())
    }

    /// 为学生登记一次接种，返回更新后的学生
    pub async fn mark_vaccinated(
        &self,
        student_id: i64,
        drive_id: i64,
        vaccine_name: &str,
    ) -> ApiResult<Student> {
        let request = MarkVaccinatedRequest {
            student_id,
            drive_id,
            vaccine_name: vaccine_name.to_string(),
        };
        let student = self.api.execute(&request).await?;
        log_info!(
            "[Students] Student {} vaccinated in drive {} ({})",
            student_id,
            drive_id,
            vaccine_name
        );
        Ok(student)
    }

    /// 批量导入 CSV
    ///
    /// 以 multipart 表单上传，文件字段名固定为 `file`。
    /// 返回新增或更新的学生；响应体不是数组时按空列表处理。
    pub async fn bulk_import(&self, file: UploadFile) -> ApiResult<Vec<Student>> {
        let file_name = file.file_name.clone();
        let request = HttpRequest::new(&self.api.url(BULK_IMPORT_PATH, &[]), HttpMethod::Post)
            .with_body(RequestBody::Multipart {
                field: BULK_IMPORT_FIELD.to_string(),
                file,
            });
        let response = self.api.dispatch(request).await?;
        let LenientList(students) = response.json::<LenientList<Student>>()?;
        log_info!(
            "[Students] Imported {} rows from {}",
            students.len(),
            file_name
        );
        Ok(students)
    }
}

/// 批量导入完成后的提示
pub fn import_summary(count: usize) -> String {
    format!("{} students imported/updated successfully!", count)
}
