use serde::{Deserialize, Serialize};

/// One row of the paginated domain list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DomainListItem {
    pub name: String,
    #[serde(default)]
    pub record_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DomainPage {
    #[serde(default)]
    pub domains: Vec<DomainListItem>,
    #[serde(default)]
    pub total: u64,
}

impl DomainPage {
    /// Number of pages needed to show `total` domains at `page_size` per page
    pub fn page_count(&self, page_size: u32) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(page_size))
    }
}

/// Record as the API returns it (capitalized field names)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DnsRecordApi {
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Type", default)]
    pub record_type: Option<String>,
    #[serde(rename = "Value", default)]
    pub value: Option<String>,
    #[serde(rename = "TTL", default)]
    pub ttl: Option<u32>,
    #[serde(rename = "Priority", default)]
    pub priority: Option<u32>,
}

/// Record as the console works with it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DnsRecord {
    /// Stable key for listing, derived from name, type and value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub value: String,
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

impl From<DnsRecordApi> for DnsRecord {
    fn from(api: DnsRecordApi) -> Self {
        let name = api.name.unwrap_or_default();
        let record_type = api.record_type.unwrap_or_default();
        let value = api.value.unwrap_or_default();
        Self {
            id: Some(format!("{}-{}-{}", name, record_type, value)),
            name,
            record_type,
            value,
            ttl: api.ttl.unwrap_or_default(),
            priority: api.priority,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct RecordPage {
    #[serde(default)]
    pub items: Vec<DnsRecordApi>,
    #[serde(default)]
    pub total: u64,
}

impl RecordPage {
    /// Convert the wire records into console records
    pub fn into_records(self) -> Vec<DnsRecord> {
        self.items.into_iter().map(DnsRecord::from).collect()
    }
}

/// Domain detail
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(default)]
pub struct Domain {
    pub name: String,
    #[serde(rename = "recordCount", skip_serializing_if = "Option::is_none")]
    pub record_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<DnsRecord>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct CreateDomainParams {
    pub name: String,
    pub records: Vec<DnsRecord>,
}

/// Body for both adding and updating a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct RecordParams {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub value: String,
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}
