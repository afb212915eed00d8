use crate::error::ApiResult;
use crate::gateway::{ApiClient, Navigator};
use crate::http::HttpTransport;
use crate::model::{DrivePayload, VaccinationDrive};
use crate::protocol::{
    CreateDriveRequest, DeleteDriveRequest, GetDriveRequest, UpcomingDrivesRequest,
    UpdateDriveRequest,
};
use crate::session::KeyValueStore;

/// 接种活动服务
pub struct DriveService<'a, T, S, N> {
    pub(super) api: &'a ApiClient<T, S, N>,
}

impl<T, S, N> DriveService<'_, T, S, N>
where
    T: HttpTransport,
    S: KeyValueStore,
    N: Navigator,
{
    /// 即将进行的活动（不含已结束的活动）
    pub async fn upcoming(&self) -> ApiResult<Vec<VaccinationDrive>> {
        self.api.execute(&UpcomingDrivesRequest).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<VaccinationDrive> {
        self.api.execute(&GetDriveRequest(id)).await
    }

    pub async fn create(&self, payload: &DrivePayload) -> ApiResult<VaccinationDrive> {
        self.api.execute(&CreateDriveRequest(payload.clone())).await
    }

    pub async fn update(&self, id: i64, payload: &DrivePayload) -> ApiResult<VaccinationDrive> {
        let request = UpdateDriveRequest {
            id,
            payload: payload.clone(),
        };
        self.api.execute(&request).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.api.send(&DeleteDriveRequest(id)).await.map(|_| ())
    }
}
