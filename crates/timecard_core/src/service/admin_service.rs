//! Employee management and attendance summaries.

use crate::error::UiResult;
use crate::form::admin_form::{EmployeeForm, SummaryForm};
use crate::host::api::HostApi;
use crate::model::employee::{Employee, EmployeeId};
use crate::model::summary::AttendanceSummary;
use log::info;
use std::sync::Arc;

pub struct AdminService<H: HostApi> {
    host: Arc<H>,
}

impl<H: HostApi> AdminService<H> {
    pub fn new(host: Arc<H>) -> Self {
        Self { host }
    }

    pub async fn employees(&self) -> UiResult<Vec<Employee>> {
        Ok(self.host.get_all_employees().await.into_result()?)
    }

    /// Validates and registers a new employee.
    pub async fn add_employee(&self, form: &EmployeeForm) -> UiResult<()> {
        let request = form.validate()?;
        self.host.add_employee(&request).await.into_ack()?;
        info!(
            "event=employee_add module=admin status=ok admin={}",
            request.is_admin
        );
        Ok(())
    }

    pub async fn delete_employee(&self, id: EmployeeId) -> UiResult<()> {
        self.host.delete_employee(id).await.into_ack()?;
        info!("event=employee_delete module=admin status=ok employee_id={id}");
        Ok(())
    }

    /// Validates the filter and fetches the host-computed summary.
    pub async fn summary(&self, form: &SummaryForm) -> UiResult<AttendanceSummary> {
        let query = form.validate()?;
        let summary = self
            .host
            .get_attendance_summary(&query)
            .await
            .into_result()?;
        info!(
            "event=summary_load module=admin status=ok employee_id={} days={}",
            query.employee_id,
            summary.labels.len()
        );
        Ok(summary)
    }
}
