//! Inventory repository backed by the NetBox REST API.
//!
//! Only read-only `GET` endpoints under `/api/dcim/` are used. List endpoints
//! are paginated; the repository follows `next` links until exhausted.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::domain::config::NetBoxConfig;
use crate::domain::{
    Device, DeviceStatus, DeviceType, DomainError, Interface, InterfaceKind, InterfaceTemplate,
    StatusSet,
};
use crate::ports::{HttpClient, InventoryRepository};

/// One page of a NetBox list endpoint.
#[derive(Debug, Deserialize)]
struct Page<T> {
    #[allow(dead_code)]
    count: Option<u64>,
    next: Option<String>,
    results: Vec<T>,
}

/// `{"value": ..., "label": ...}` choice field.
#[derive(Debug, Deserialize)]
struct Choice<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
struct NestedRef {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct NestedManufacturer {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiDevice {
    id: u64,
    name: Option<String>,
    status: Choice<DeviceStatus>,
    device_type: NestedRef,
}

#[derive(Debug, Deserialize)]
struct ApiDeviceType {
    id: u64,
    display: Option<String>,
    manufacturer: NestedManufacturer,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ApiInterface {
    id: u64,
    device: NestedRef,
    name: String,
    #[serde(rename = "type")]
    kind: Choice<String>,
    /// NetBox < 2.10.
    #[serde(default)]
    connection_status: Option<Choice<bool>>,
    /// NetBox >= 3.0.
    #[serde(default)]
    connected_endpoints_reachable: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ApiInterfaceTemplate {
    id: u64,
    device_type: Option<NestedRef>,
    name: String,
    #[serde(rename = "type")]
    kind: Choice<String>,
}

impl From<ApiDevice> for Device {
    fn from(api: ApiDevice) -> Self {
        Self {
            id: api.id,
            name: api.name,
            status: api.status.value,
            device_type_id: api.device_type.id,
        }
    }
}

impl From<ApiDeviceType> for DeviceType {
    fn from(api: ApiDeviceType) -> Self {
        Self {
            id: api.id,
            manufacturer: api.manufacturer.name,
            model: api.model,
            display: api.display,
        }
    }
}

impl From<ApiInterface> for Interface {
    fn from(api: ApiInterface) -> Self {
        let connected = api.connection_status.map(|c| c.value).unwrap_or(false)
            || api.connected_endpoints_reachable.unwrap_or(false);
        Self {
            id: api.id,
            device_id: api.device.id,
            name: api.name,
            kind: InterfaceKind::new(api.kind.value),
            connected,
        }
    }
}

impl ApiInterfaceTemplate {
    fn into_template(self, device_type_id: u64) -> InterfaceTemplate {
        InterfaceTemplate {
            id: self.id,
            device_type_id: self.device_type.map(|d| d.id).unwrap_or(device_type_id),
            name: self.name,
            kind: InterfaceKind::new(self.kind.value),
        }
    }
}

/// NetBox REST API inventory.
pub struct NetBoxInventory<C> {
    client: C,
    base: Url,
    page_size: u32,
}

impl<C: HttpClient> NetBoxInventory<C> {
    /// Create a repository for the NetBox instance at `config.url`.
    pub fn new(client: C, config: &NetBoxConfig) -> Result<Self, DomainError> {
        let mut base = Url::parse(&config.url)
            .map_err(|e| DomainError::Config(format!("Invalid NetBox URL '{}': {}", config.url, e)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client,
            base,
            page_size: config.page_size.max(1),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, DomainError> {
        self.base
            .join(path)
            .map_err(|e| DomainError::Config(format!("Invalid endpoint '{}': {}", path, e)))
    }

    fn devices_url(&self, statuses: &StatusSet) -> Result<Url, DomainError> {
        let mut url = self.endpoint("api/dcim/devices/")?;
        {
            let mut query = url.query_pairs_mut();
            for status in statuses {
                query.append_pair("status", status.as_str());
            }
            query.append_pair("limit", &self.page_size.to_string());
        }
        Ok(url)
    }

    fn physical_url(&self, path: &str, filter: &str, id: u64) -> Result<Url, DomainError> {
        let mut url = self.endpoint(path)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair(filter, &id.to_string());
            for kind in InterfaceKind::NON_PHYSICAL {
                query.append_pair("type__n", kind);
            }
            query.append_pair("limit", &self.page_size.to_string());
        }
        Ok(url)
    }

    async fn list_all<T>(&self, url: Url) -> Result<Vec<T>, DomainError>
    where
        T: DeserializeOwned + Send,
    {
        let mut items = Vec::new();
        let mut next = Some(url.to_string());

        while let Some(page_url) = next.take() {
            let page: Page<T> = self.client.get_json(&page_url).await?;
            items.extend(page.results);
            next = page.next;
        }

        Ok(items)
    }

    async fn get_detail<T>(&self, path: &str, kind: &'static str, id: u64) -> Result<T, DomainError>
    where
        T: DeserializeOwned + Send,
    {
        let url = self.endpoint(&format!("{}{}/", path, id))?;
        match self.client.get_json(url.as_str()).await {
            Err(DomainError::HttpStatus { status: 404, .. }) => Err(DomainError::NotFound { kind, id }),
            other => other,
        }
    }
}

#[async_trait]
impl<C: HttpClient> InventoryRepository for NetBoxInventory<C> {
    async fn list_devices(&self, statuses: &StatusSet) -> Result<Vec<Device>, DomainError> {
        if statuses.is_empty() {
            return Ok(Vec::new());
        }

        let devices: Vec<ApiDevice> = self.list_all(self.devices_url(statuses)?).await?;
        debug!(count = devices.len(), "Fetched devices");

        // The API treats unknown status values loosely; keep the set authoritative.
        Ok(devices
            .into_iter()
            .map(Device::from)
            .filter(|d| statuses.contains(&d.status))
            .collect())
    }

    async fn list_physical_interfaces(&self, device: &Device) -> Result<Vec<Interface>, DomainError> {
        let url = self.physical_url("api/dcim/interfaces/", "device_id", device.id)?;
        let interfaces: Vec<ApiInterface> = self.list_all(url).await?;

        Ok(interfaces
            .into_iter()
            .map(Interface::from)
            .filter(Interface::is_physical)
            .collect())
    }

    async fn get_device_type(&self, id: u64) -> Result<DeviceType, DomainError> {
        let device_type: ApiDeviceType = self
            .get_detail("api/dcim/device-types/", "device type", id)
            .await?;
        Ok(device_type.into())
    }

    async fn list_physical_templates(
        &self,
        device_type: &DeviceType,
    ) -> Result<Vec<InterfaceTemplate>, DomainError> {
        let url = self.physical_url(
            "api/dcim/interface-templates/",
            "device_type_id",
            device_type.id,
        )?;
        let templates: Vec<ApiInterfaceTemplate> = self.list_all(url).await?;

        Ok(templates
            .into_iter()
            .map(|t| t.into_template(device_type.id))
            .filter(InterfaceTemplate::is_physical)
            .collect())
    }

    async fn get_interface(&self, id: u64) -> Result<Interface, DomainError> {
        let interface: ApiInterface = self.get_detail("api/dcim/interfaces/", "interface", id).await?;
        Ok(interface.into())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use parking_lot::Mutex;
    use serde_json::{json, Value};

    use super::*;

    /// Serves canned JSON bodies keyed by full URL.
    #[derive(Default)]
    struct FakeHttp {
        responses: HashMap<String, Value>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeHttp {
        fn with(mut self, url: &str, body: Value) -> Self {
            self.responses.insert(url.to_string(), body);
            self
        }
    }

    #[async_trait]
    impl HttpClient for FakeHttp {
        async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, DomainError> {
            self.requests.lock().push(url.to_string());
            match self.responses.get(url) {
                Some(body) => Ok(serde_json::from_value(body.clone())?),
                None => Err(DomainError::HttpStatus {
                    status: 404,
                    url: url.to_string(),
                }),
            }
        }
    }

    fn config(page_size: u32) -> NetBoxConfig {
        NetBoxConfig {
            url: "https://netbox.test".to_string(),
            page_size,
            ..NetBoxConfig::default()
        }
    }

    fn api_interface(id: u64, name: &str, kind: &str, reachable: Option<bool>) -> Value {
        json!({
            "id": id,
            "device": {"id": 1, "name": "edge-1"},
            "name": name,
            "type": {"value": kind, "label": kind},
            "connected_endpoints_reachable": reachable,
        })
    }

    #[tokio::test]
    async fn test_list_devices_follows_pagination() {
        let first = "https://netbox.test/api/dcim/devices/?status=active&status=planned&limit=1";
        let second = "https://netbox.test/api/dcim/devices/?status=active&status=planned&limit=1&offset=1";
        let http = FakeHttp::default()
            .with(
                first,
                json!({
                    "count": 2,
                    "next": second,
                    "previous": null,
                    "results": [{
                        "id": 1,
                        "name": "edge-1",
                        "status": {"value": "active", "label": "Active"},
                        "device_type": {"id": 10, "display": "Cisco C9300"},
                    }],
                }),
            )
            .with(
                second,
                json!({
                    "count": 2,
                    "next": null,
                    "previous": first,
                    "results": [{
                        "id": 2,
                        "name": null,
                        "status": {"value": "planned", "label": "Planned"},
                        "device_type": {"id": 11},
                    }],
                }),
            );

        let inventory = NetBoxInventory::new(http, &config(1)).unwrap();
        let devices = inventory
            .list_devices(&crate::domain::default_eligible_statuses())
            .await
            .unwrap();

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].name.as_deref(), Some("edge-1"));
        assert_eq!(devices[0].device_type_id, 10);
        assert_eq!(devices[1].status, DeviceStatus::Planned);
        assert_eq!(devices[1].name, None);
        assert_eq!(inventory.client.requests.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_list_interfaces_excludes_virtual_and_lag() {
        let url = "https://netbox.test/api/dcim/interfaces/?device_id=1&type__n=virtual&type__n=lag&limit=250";
        let http = FakeHttp::default().with(
            url,
            json!({
                "count": 3,
                "next": null,
                "previous": null,
                "results": [
                    api_interface(1, "Gi0/1", "1000base-t", Some(true)),
                    api_interface(2, "Gi0/2", "1000base-t", None),
                    api_interface(3, "Loopback0", "virtual", None),
                ],
            }),
        );

        let inventory = NetBoxInventory::new(http, &config(250)).unwrap();
        let device = Device {
            id: 1,
            name: Some("edge-1".to_string()),
            status: DeviceStatus::Active,
            device_type_id: 10,
        };
        let interfaces = inventory.list_physical_interfaces(&device).await.unwrap();

        assert_eq!(interfaces.len(), 2);
        assert!(interfaces[0].connected);
        assert!(!interfaces[1].connected);
    }

    #[tokio::test]
    async fn test_legacy_connection_status() {
        let http = FakeHttp::default().with(
            "https://netbox.test/api/dcim/interfaces/5/",
            json!({
                "id": 5,
                "device": {"id": 1},
                "name": "Gi0/5",
                "type": {"value": "1000base-t", "label": "1000BASE-T"},
                "connection_status": {"value": true, "label": "Connected"},
            }),
        );

        let inventory = NetBoxInventory::new(http, &config(250)).unwrap();
        let interface = inventory.get_interface(5).await.unwrap();
        assert!(interface.connected);
    }

    #[tokio::test]
    async fn test_device_type_and_templates() {
        let http = FakeHttp::default()
            .with(
                "https://netbox.test/api/dcim/device-types/10/",
                json!({
                    "id": 10,
                    "display": "Cisco C9300-48P",
                    "manufacturer": {"id": 1, "name": "Cisco"},
                    "model": "C9300-48P",
                }),
            )
            .with(
                "https://netbox.test/api/dcim/interface-templates/?device_type_id=10&type__n=virtual&type__n=lag&limit=250",
                json!({
                    "count": 2,
                    "next": null,
                    "previous": null,
                    "results": [
                        {"id": 1, "device_type": {"id": 10}, "name": "Gi0/1", "type": {"value": "1000base-t"}},
                        {"id": 2, "device_type": {"id": 10}, "name": "Po1", "type": {"value": "lag"}},
                    ],
                }),
            );

        let inventory = NetBoxInventory::new(http, &config(250)).unwrap();
        let device_type = inventory.get_device_type(10).await.unwrap();
        assert_eq!(device_type.display_name(), "Cisco C9300-48P");

        let templates = inventory.list_physical_templates(&device_type).await.unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "Gi0/1");
    }

    #[tokio::test]
    async fn test_missing_device_type_is_not_found() {
        let inventory = NetBoxInventory::new(FakeHttp::default(), &config(250)).unwrap();
        let err = inventory.get_device_type(99).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 99, .. }));
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let config = NetBoxConfig {
            url: "https://example.net/netbox".to_string(),
            ..NetBoxConfig::default()
        };
        let inventory = NetBoxInventory::new(FakeHttp::default(), &config).unwrap();
        let url = inventory.endpoint("api/dcim/devices/").unwrap();
        assert_eq!(url.as_str(), "https://example.net/netbox/api/dcim/devices/");
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let config = NetBoxConfig {
            url: "not a url".to_string(),
            ..NetBoxConfig::default()
        };
        assert!(matches!(
            NetBoxInventory::new(FakeHttp::default(), &config),
            Err(DomainError::Config(_))
        ));
    }
}
