//! Plain-text tables for command output.

use std::fmt::Write;

use dnsm_core::models::{DnsRecord, Domain, DomainPage};
use dnsm_core::router::RouteDescriptor;
use dnsm_core::utils::truncate;

/// Widest a value column may get before it is cut
const MAX_VALUE_WIDTH: usize = 48;

pub fn domain_page(page: &DomainPage, page_num: u32, page_size: u32) -> String {
    let mut out = String::new();
    if page.domains.is_empty() {
        let _ = writeln!(out, "No domains.");
    } else {
        let width = page
            .domains
            .iter()
            .map(|d| d.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("DOMAIN".len());
        let _ = writeln!(out, "{:<width$}  RECORDS", "DOMAIN", width = width);
        for domain in &page.domains {
            let _ = writeln!(
                out,
                "{:<width$}  {}",
                domain.name,
                domain.record_count,
                width = width
            );
        }
    }
    let _ = writeln!(
        out,
        "Page {} of {} ({} domains)",
        page_num,
        page.page_count(page_size).max(1),
        page.total
    );
    out
}

pub fn records(records: &[DnsRecord]) -> String {
    let mut out = String::new();
    if records.is_empty() {
        let _ = writeln!(out, "No records.");
        return out;
    }

    let name_width = records
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    let _ = writeln!(
        out,
        "{:<name_width$}  {:<6}  {:<7}  {:<8}  VALUE",
        "NAME",
        "TYPE",
        "TTL",
        "PRIORITY",
        name_width = name_width
    );
    for record in records {
        let priority = record.priority.map(|p| p.to_string()).unwrap_or_default();
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<6}  {:<7}  {:<8}  {}",
            record.name,
            record.record_type,
            record.ttl,
            priority,
            truncate(&record.value, MAX_VALUE_WIDTH),
            name_width = name_width
        );
    }
    out
}

pub fn domain(domain: &Domain) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Domain: {}", domain.name);
    if let Some(count) = domain.record_count {
        let _ = writeln!(out, "Records: {}", count);
    }
    if let Some(ref list) = domain.records {
        out.push_str(&records(list));
    }
    out
}

pub fn routes<'a>(routes: impl IntoIterator<Item = &'a RouteDescriptor>) -> String {
    let mut out = String::new();
    for route in routes {
        let access = if route.requires_auth() { "login required" } else { "public" };
        let _ = writeln!(out, "{:<12}  {:<16}  {}", route.path, route.display_title(), access);
    }
    out
}

#[cfg(test)]
mod tests {
    use dnsm_core::models::DomainListItem;

    use super::*;

    #[test]
    fn test_domain_page_table() {
        let page = DomainPage {
            domains: vec![DomainListItem {
                name: "example.com".to_string(),
                record_count: 4,
            }],
            total: 11,
        };
        let out = domain_page(&page, 1, 10);
        assert!(out.starts_with("DOMAIN       RECORDS\n"));
        assert!(out.contains("example.com  4\n"));
        assert!(out.ends_with("Page 1 of 2 (11 domains)\n"));
    }

    #[test]
    fn test_empty_tables() {
        assert!(domain_page(&DomainPage::default(), 1, 10).starts_with("No domains."));
        assert_eq!(records(&[]), "No records.\n");
    }

    #[test]
    fn test_records_table_truncates_values() {
        let record = DnsRecord {
            id: None,
            name: "txt".to_string(),
            record_type: "TXT".to_string(),
            value: "v".repeat(100),
            ttl: 300,
            priority: None,
        };
        let out = records(&[record]);
        let line = out.lines().nth(1).unwrap();
        assert!(line.ends_with("..."));
        assert!(line.starts_with("txt   TXT     300"));
    }

    #[test]
    fn test_routes_listing() {
        let out = routes(dnsm_core::router::ROUTES);
        assert!(out.contains("/admin/dns"));
        assert!(out.contains("login required"));
        assert!(out.contains("public"));
    }

    #[test]
    fn test_menu_listing_skips_hidden() {
        let out = routes(dnsm_core::router::menu());
        assert!(out.contains("/admin/dns"));
        assert!(!out.contains("public"));
        assert_eq!(out.lines().count(), 2);
    }
}
