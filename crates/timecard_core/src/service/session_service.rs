//! Login, logout and attendance recording.

use crate::error::{UiError, UiResult};
use crate::host::api::HostApi;
use crate::model::attendance::{AttendanceKind, UserStatus};
use crate::model::employee::SessionUser;
use log::{info, warn};
use std::sync::Arc;

pub struct SessionService<H: HostApi> {
    host: Arc<H>,
}

impl<H: HostApi> SessionService<H> {
    pub fn new(host: Arc<H>) -> Self {
        Self { host }
    }

    /// Authenticates against the host.
    ///
    /// The password is passed through untouched and never logged.
    pub async fn login(&self, name: &str, password: &str) -> UiResult<SessionUser> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UiError::MissingSelection("name"));
        }
        if password.is_empty() {
            return Err(UiError::MissingSelection("password"));
        }

        match self.host.login(name, password).await.into_result() {
            Ok(user) => {
                info!(
                    "event=login module=session status=ok user_id={} admin={}",
                    user.id, user.is_admin
                );
                Ok(user)
            }
            Err(err) => {
                warn!("event=login module=session status=rejected");
                Err(err.into())
            }
        }
    }

    pub async fn logout(&self) -> UiResult<()> {
        self.host.logout().await.into_ack()?;
        info!("event=logout module=session status=ok");
        Ok(())
    }

    pub async fn record_attendance(&self, kind: AttendanceKind) -> UiResult<()> {
        self.host.record_attendance(kind).await.into_ack()?;
        info!("event=attendance_recorded module=session status=ok kind={kind}");
        Ok(())
    }

    pub async fn status(&self) -> UiResult<UserStatus> {
        Ok(self.host.get_user_status().await.into_result()?)
    }
}
