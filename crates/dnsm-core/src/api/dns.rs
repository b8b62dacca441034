//! DNS domain and record endpoints.

use serde_json::Value;

use super::request::OutboundRequest;
use super::{ApiClient, ApiError};
use crate::models::{
    CreateDomainParams, DnsRecord, Domain, DomainPage, RecordPage, RecordParams,
};

const DNS_BASE_PATH: &str = "/api/v1/dns";

fn domain_path(domain: &str) -> String {
    format!("{}/{}", DNS_BASE_PATH, urlencoding::encode(domain))
}

fn records_path(domain: &str) -> String {
    format!("{}/records", domain_path(domain))
}

fn record_path(domain: &str, record: &str) -> String {
    format!("{}/{}", records_path(domain), urlencoding::encode(record))
}

impl ApiClient {
    // ===== Domains =====

    /// Fetch one page of the domain list (pages start at 1)
    pub async fn page_domains(&self, page: u32, page_size: u32) -> Result<DomainPage, ApiError> {
        let request = OutboundRequest::get(format!("{}/page", DNS_BASE_PATH))
            .query("page", page)
            .query("page_size", page_size);
        self.send_json(request).await
    }

    pub async fn create_domain(&self, params: &CreateDomainParams) -> Result<Value, ApiError> {
        self.send(OutboundRequest::post(DNS_BASE_PATH).json(params)?)
            .await
    }

    pub async fn domain_detail(&self, domain: &str) -> Result<Domain, ApiError> {
        self.send_json(OutboundRequest::get(domain_path(domain)))
            .await
    }

    pub async fn delete_domain(&self, domain: &str) -> Result<Value, ApiError> {
        self.send(OutboundRequest::delete(domain_path(domain)))
            .await
    }

    // ===== Records =====

    pub async fn list_records(&self, domain: &str) -> Result<Vec<DnsRecord>, ApiError> {
        let page: RecordPage = self
            .send_json(OutboundRequest::get(records_path(domain)))
            .await?;
        Ok(page.into_records())
    }

    pub async fn add_record(&self, domain: &str, params: &RecordParams) -> Result<Value, ApiError> {
        self.send(OutboundRequest::post(records_path(domain)).json(params)?)
            .await
    }

    pub async fn update_record(
        &self,
        domain: &str,
        record: &str,
        params: &RecordParams,
    ) -> Result<Value, ApiError> {
        self.send(OutboundRequest::put(record_path(domain, record)).json(params)?)
            .await
    }

    pub async fn delete_record(&self, domain: &str, record: &str) -> Result<Value, ApiError> {
        self.send(OutboundRequest::delete(record_path(domain, record)))
            .await
    }
}
