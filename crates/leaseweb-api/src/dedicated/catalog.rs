// Catalog endpoints: control panels and operating systems.

use super::client::{DEFAULT_PAGE_LIMIT, LeasewebClient};
use super::types::{ControlPanel, ControlPanelList, OperatingSystem, OperatingSystemList, Page};
use crate::error::Error;

impl LeasewebClient {
    /// `GET /controlPanels?limit&offset[&operatingSystemId]`
    pub async fn list_control_panels(
        &self,
        operating_system_id: Option<&str>,
        offset: i64,
        limit: i32,
    ) -> Result<Page<ControlPanel>, Error> {
        let mut params = vec![("offset", offset.to_string()), ("limit", limit.to_string())];
        if let Some(os) = operating_system_id {
            params.push(("operatingSystemId", os.to_owned()));
        }

        let list: ControlPanelList = self.get_with_params(&["controlPanels"], &params).await?;
        Ok(Page {
            data: list.control_panels,
            total_count: list.metadata.total_count,
        })
    }

    pub async fn list_all_control_panels(
        &self,
        operating_system_id: Option<&str>,
    ) -> Result<Vec<ControlPanel>, Error> {
        self.paginate_all(DEFAULT_PAGE_LIMIT, |offset, limit| {
            self.list_control_panels(operating_system_id, offset, limit)
        })
        .await
    }

    /// `GET /operatingSystems?limit&offset[&controlPanelId]`
    pub async fn list_operating_systems(
        &self,
        control_panel_id: Option<&str>,
        offset: i64,
        limit: i32,
    ) -> Result<Page<OperatingSystem>, Error> {
        let mut params = vec![("offset", offset.to_string()), ("limit", limit.to_string())];
        if let Some(cp) = control_panel_id {
            params.push(("controlPanelId", cp.to_owned()));
        }

        let list: OperatingSystemList = self
            .get_with_params(&["operatingSystems"], &params)
            .await?;
        Ok(Page {
            data: list.operating_systems,
            total_count: list.metadata.total_count,
        })
    }

    pub async fn list_all_operating_systems(
        &self,
        control_panel_id: Option<&str>,
    ) -> Result<Vec<OperatingSystem>, Error> {
        self.paginate_all(DEFAULT_PAGE_LIMIT, |offset, limit| {
            self.list_operating_systems(control_panel_id, offset, limit)
        })
        .await
    }
}
