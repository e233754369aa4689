use super::{
    client::ApiClient,
    types::{ApiError, Notification, NotificationsResponse, StatusResponse, SubmitDataRequest},
};

impl ApiClient {
    pub async fn get_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let url = self.endpoint("/pi/notifications").await;
        let response: NotificationsResponse = self.send_json(self.http_client().get(url)).await?;
        Ok(response.data)
    }

    pub async fn submit_data(&self, month: u32, year: i32) -> Result<StatusResponse, ApiError> {
        let url = self.endpoint("/pi/submit-data").await;
        self.send_json(
            self.http_client()
                .post(url)
                .json(&SubmitDataRequest { month, year }),
        )
        .await
    }
}
