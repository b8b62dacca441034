//! Data models shared by the API pipeline, the session and the front-end.
//!
//! - `UserInfo`, `LoginRequest`, `LoginData`, `RememberedUser`, `RememberedLogin`: identity and login payloads
//! - `DomainPage`, `DomainListItem`, `Domain`: domain listing and detail
//! - `DnsRecord`, `DnsRecordApi`, `RecordPage`, `RecordParams`: records in app and wire shape

pub mod dns;
pub mod user;

pub use dns::{
    CreateDomainParams, DnsRecord, DnsRecordApi, Domain, DomainListItem, DomainPage, RecordPage,
    RecordParams,
};
pub use user::{LoginData, LoginRequest, RememberedLogin, RememberedUser, UserInfo};
