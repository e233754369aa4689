use super::{
    client::ApiClient,
    types::{ApiError, FieldTrip, FieldTripsResponse, SaveFieldTripsRequest, StatusResponse},
};

impl ApiClient {
    pub async fn get_field_trips(&self, employee_number: &str) -> Result<Vec<FieldTrip>, ApiError> {
        let url = self
            .endpoint(&format!("/field-trips/{}", employee_number))
            .await;
        let response: FieldTripsResponse = self.send_json(self.http_client().get(url)).await?;
        Ok(response.data.map(|d| d.field_trips).unwrap_or_default())
    }

    /// Replaces the employee's whole trip list.
    pub async fn save_field_trips(
        &self,
        employee_number: &str,
        trips: Vec<FieldTrip>,
    ) -> Result<StatusResponse, ApiError> {
        let url = self.endpoint("/field-trips").await;
        let payload = SaveFieldTripsRequest {
            employee_number: employee_number.to_string(),
            field_trip_dates: trips,
        };
        self.send_json(self.http_client().put(url).json(&payload))
            .await
    }
}
