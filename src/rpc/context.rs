// src/rpc/context.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller identity and correlation data sent with every message.
///
/// Clients never inspect or modify it; it is forwarded to the transport as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcContext {
    pub user_id: Option<String>,
    pub tenant_id: Option<String>,
    pub user_name: Option<String>,
    pub tenant_name: Option<String>,
    pub is_admin: bool,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default = "default_read_deleted")]
    pub read_deleted: String,
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl RpcContext {
    pub fn new(user_id: Option<String>, tenant_id: Option<String>) -> Self {
        Self {
            user_id,
            tenant_id,
            user_name: None,
            tenant_name: None,
            is_admin: false,
            roles: Vec::new(),
            read_deleted: default_read_deleted(),
            request_id: new_request_id(),
            timestamp: Utc::now(),
        }
    }

    /// Context with admin rights and no user or tenant, as used by agents.
    pub fn admin() -> Self {
        let mut context = Self::new(None, None);
        context.is_admin = true;
        context.roles.push("admin".to_string());
        context
    }

    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    pub fn with_names(mut self, user_name: impl Into<String>, tenant_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self.tenant_name = Some(tenant_name.into());
        self
    }
}

fn default_read_deleted() -> String {
    "no".to_string()
}

fn new_request_id() -> String {
    format!("req-{}", uuid::Uuid::new_v4())
}
