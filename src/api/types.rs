// src/api/types.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Provisioning status of a load-balancer entity as reported to the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityStatus {
    Active,
    PendingCreate,
    PendingUpdate,
    PendingDelete,
    Inactive,
    Down,
    Created,
    Error,
}

impl EntityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityStatus::Active => "ACTIVE",
            EntityStatus::PendingCreate => "PENDING_CREATE",
            EntityStatus::PendingUpdate => "PENDING_UPDATE",
            EntityStatus::PendingDelete => "PENDING_DELETE",
            EntityStatus::Inactive => "INACTIVE",
            EntityStatus::Down => "DOWN",
            EntityStatus::Created => "CREATED",
            EntityStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for EntityStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(EntityStatus::Active),
            "PENDING_CREATE" => Ok(EntityStatus::PendingCreate),
            "PENDING_UPDATE" => Ok(EntityStatus::PendingUpdate),
            "PENDING_DELETE" => Ok(EntityStatus::PendingDelete),
            "INACTIVE" => Ok(EntityStatus::Inactive),
            "DOWN" => Ok(EntityStatus::Down),
            "CREATED" => Ok(EntityStatus::Created),
            "ERROR" => Ok(EntityStatus::Error),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Status fields carried by the `update_*_status` operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub status: Option<EntityStatus>,
    pub status_description: Option<String>,
}

impl StatusUpdate {
    pub fn new(status: EntityStatus) -> Self {
        Self {
            status: Some(status),
            status_description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.status_description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedIp {
    pub subnet_id: String,
    pub ip_address: String,
}

/// Network port as returned by the plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub network_id: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub fixed_ips: Vec<FixedIp>,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub device_owner: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub admin_state_up: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Port {
    pub fn ip_addresses(&self) -> impl Iterator<Item = &str> {
        self.fixed_ips.iter().map(|ip| ip.ip_address.as_str())
    }

    pub fn addresses_on_subnet<'a>(&'a self, subnet_id: &'a str) -> impl Iterator<Item = &'a str> {
        self.fixed_ips
            .iter()
            .filter(move |ip| ip.subnet_id == subnet_id)
            .map(|ip| ip.ip_address.as_str())
    }
}

/// Pool, vip, member or health monitor record inside a service description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LbEntity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl LbEntity {
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Parsed `status` attribute; `None` when absent or unrecognised.
    pub fn status(&self) -> Option<EntityStatus> {
        self.attribute("status")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }
}

/// Everything the plugin knows about a pool and the objects attached to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescription {
    #[serde(default)]
    pub pool: Option<LbEntity>,
    #[serde(default)]
    pub vip: Option<LbEntity>,
    #[serde(default)]
    pub members: Vec<LbEntity>,
    #[serde(default)]
    pub health_monitors: Vec<LbEntity>,
    /// Networks, subnets and tunnel endpoints, kept as sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServiceDescription {
    pub fn pool_id(&self) -> Option<&str> {
        self.pool.as_ref().and_then(|p| p.id.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
}

/// Traffic counters pushed with `update_pool_stats`. Unset counters are omitted;
/// driver-specific counters travel in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_out: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_connections: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_connections: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<BTreeMap<String, MemberStats>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePortRequest {
    pub subnet_id: Option<String>,
    pub mac_address: Option<String>,
    pub name: Option<String>,
    pub fixed_address_count: u32,
}

impl Default for CreatePortRequest {
    fn default() -> Self {
        Self {
            subnet_id: None,
            mac_address: None,
            name: None,
            fixed_address_count: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreatePortWithIpRequest {
    pub subnet_id: Option<String>,
    pub mac_address: Option<String>,
    pub name: Option<String>,
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocateAddressRequest {
    pub subnet_id: Option<String>,
    pub port_id: Option<String>,
    pub name: Option<String>,
    pub fixed_address_count: u32,
}

impl Default for AllocateAddressRequest {
    fn default() -> Self {
        Self {
            subnet_id: None,
            port_id: None,
            name: None,
            fixed_address_count: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllocateSpecificAddressRequest {
    pub subnet_id: Option<String>,
    pub port_id: Option<String>,
    pub name: Option<String>,
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeallocateAddressRequest {
    pub fixed_addresses: Option<Vec<String>>,
    pub subnet_id: Option<String>,
    pub auto_delete_port: bool,
}

/// `[mac_address, ip_address]` pair of a forwarding database entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PortFdb(pub String, pub String);

impl PortFdb {
    pub fn new(mac_address: impl Into<String>, ip_address: impl Into<String>) -> Self {
        Self(mac_address.into(), ip_address.into())
    }

    /// Entry telling agents to flood broadcast traffic to the tunnel endpoint.
    pub fn flooding() -> Self {
        Self::new("00:00:00:00:00:00", "0.0.0.0")
    }

    pub fn mac_address(&self) -> &str {
        &self.0
    }

    pub fn ip_address(&self) -> &str {
        &self.1
    }
}

/// Forwarding entries of one network, keyed by tunnel endpoint address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkFdb {
    pub segment_id: Option<u32>,
    pub network_type: String,
    #[serde(default)]
    pub ports: BTreeMap<String, Vec<PortFdb>>,
}

/// Forwarding entries keyed by network id.
pub type FdbEntries = BTreeMap<String, NetworkFdb>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDetails {
    pub device: String,
    #[serde(default)]
    pub network_id: Option<String>,
    #[serde(default)]
    pub port_id: Option<String>,
    #[serde(default)]
    pub admin_state_up: Option<bool>,
    #[serde(default)]
    pub network_type: Option<String>,
    #[serde(default)]
    pub segmentation_id: Option<u32>,
    #[serde(default)]
    pub physical_network: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeviceDetails {
    /// The plugin answers with only the device name when it has no such port.
    pub fn is_known(&self) -> bool {
        self.port_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatus {
    pub device: String,
    pub exists: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tunnel {
    pub ip_address: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TunnelSync {
    #[serde(default)]
    pub tunnels: Vec<Tunnel>,
}
