//! Lookup API endpoints.

use crate::stream::RecordStream;
use crate::DnsdbClient;
use dnsdb_core::{
    LookupResult, RDataFormat, RDataRecord, RRSetRecord, RateLimitResponse, RateLimitStatus,
    Result,
};

/// Lookup API endpoints
pub struct LookupApi<'a> {
    client: &'a DnsdbClient,
}

impl<'a> LookupApi<'a> {
    pub(crate) const fn new(client: &'a DnsdbClient) -> Self {
        Self { client }
    }

    /// Get the quota of the API key in use
    pub async fn rate_limit(&self) -> Result<RateLimitStatus> {
        let url = self.client.endpoint(["lookup", "rate_limit", ""], &[])?;
        let response: RateLimitResponse = self.client.get_json(url).await?;
        Ok(response.rate)
    }

    /// Look up rrsets by owner name
    #[must_use]
    pub fn rrset(&self, name: impl Into<String>) -> RrsetRequestBuilder<'a> {
        RrsetRequestBuilder::new(self.client, name.into())
    }

    /// Look up records by answer data.
    ///
    /// `format` must be `name`, `ip` or `raw`; anything else fails when the
    /// request is sent, before it reaches the network.
    #[must_use]
    pub fn rdata(
        &self,
        value: impl Into<String>,
        format: impl Into<String>,
    ) -> RdataRequestBuilder<'a> {
        RdataRequestBuilder::new(self.client, value.into(), format.into())
    }
}

/// Query parameters shared by both lookups
#[derive(Debug, Clone, Default)]
struct Filters {
    limit: Option<u64>,
    time_first_before: Option<i64>,
    time_first_after: Option<i64>,
    time_last_before: Option<i64>,
    time_last_after: Option<i64>,
}

impl Filters {
    fn params(&self) -> Vec<(&'static str, String)> {
        [
            ("limit", self.limit.map(|v| v.to_string())),
            ("time_first_before", self.time_first_before.map(|v| v.to_string())),
            ("time_first_after", self.time_first_after.map(|v| v.to_string())),
            ("time_last_before", self.time_last_before.map(|v| v.to_string())),
            ("time_last_after", self.time_last_after.map(|v| v.to_string())),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}

/// Builder for rrset lookups
pub struct RrsetRequestBuilder<'a> {
    client: &'a DnsdbClient,
    name: String,
    rrtype: Option<String>,
    bailiwick: Option<String>,
    filters: Filters,
}

impl<'a> RrsetRequestBuilder<'a> {
    fn new(client: &'a DnsdbClient, name: String) -> Self {
        Self {
            client,
            name,
            rrtype: None,
            bailiwick: None,
            filters: Filters::default(),
        }
    }

    /// Only return rrsets of this type (A, NS, MX, ...)
    #[must_use]
    pub fn rrtype(mut self, rrtype: impl Into<String>) -> Self {
        self.rrtype = Some(rrtype.into());
        self
    }

    /// Only return rrsets observed under this zone
    #[must_use]
    pub fn bailiwick(mut self, zone: impl Into<String>) -> Self {
        self.bailiwick = Some(zone.into());
        self
    }

    /// Cap the number of records the server returns
    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.filters.limit = Some(limit);
        self
    }

    /// Only records first seen before this epoch (negative: relative to now)
    #[must_use]
    pub const fn time_first_before(mut self, secs: i64) -> Self {
        self.filters.time_first_before = Some(secs);
        self
    }

    /// Only records first seen after this epoch (negative: relative to now)
    #[must_use]
    pub const fn time_first_after(mut self, secs: i64) -> Self {
        self.filters.time_first_after = Some(secs);
        self
    }

    /// Only records last seen before this epoch (negative: relative to now)
    #[must_use]
    pub const fn time_last_before(mut self, secs: i64) -> Self {
        self.filters.time_last_before = Some(secs);
        self
    }

    /// Only records last seen after this epoch (negative: relative to now)
    #[must_use]
    pub const fn time_last_after(mut self, secs: i64) -> Self {
        self.filters.time_last_after = Some(secs);
        self
    }

    fn segments(&self) -> Vec<&str> {
        let mut segments = vec!["lookup", "rrset", "name", self.name.as_str()];
        match (&self.rrtype, &self.bailiwick) {
            (Some(rrtype), Some(zone)) => segments.extend([rrtype.as_str(), zone.as_str()]),
            (Some(rrtype), None) => segments.push(rrtype),
            (None, Some(zone)) => segments.extend(["ANY", zone.as_str()]),
            (None, None) => {}
        }
        segments
    }

    /// Execute the request and decode records as they arrive
    pub async fn stream(self) -> Result<RecordStream<RRSetRecord>> {
        let url = self.client.endpoint(self.segments(), &self.filters.params())?;
        self.client.get_records(url).await
    }

    /// Execute the request and collect every record
    pub async fn send(self) -> LookupResult<RRSetRecord> {
        self.stream().await?.collect_records().await
    }
}

/// Builder for rdata lookups
pub struct RdataRequestBuilder<'a> {
    client: &'a DnsdbClient,
    value: String,
    format: String,
    rrtype: Option<String>,
    filters: Filters,
}

impl<'a> RdataRequestBuilder<'a> {
    fn new(client: &'a DnsdbClient, value: String, format: String) -> Self {
        Self {
            client,
            value,
            format,
            rrtype: None,
            filters: Filters::default(),
        }
    }

    /// Only return records of this type
    #[must_use]
    pub fn rrtype(mut self, rrtype: impl Into<String>) -> Self {
        self.rrtype = Some(rrtype.into());
        self
    }

    /// Cap the number of records the server returns
    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.filters.limit = Some(limit);
        self
    }

    /// Only records first seen before this epoch (negative: relative to now)
    #[must_use]
    pub const fn time_first_before(mut self, secs: i64) -> Self {
        self.filters.time_first_before = Some(secs);
        self
    }

    /// Only records first seen after this epoch (negative: relative to now)
    #[must_use]
    pub const fn time_first_after(mut self, secs: i64) -> Self {
        self.filters.time_first_after = Some(secs);
        self
    }

    /// Only records last seen before this epoch (negative: relative to now)
    #[must_use]
    pub const fn time_last_before(mut self, secs: i64) -> Self {
        self.filters.time_last_before = Some(secs);
        self
    }

    /// Only records last seen after this epoch (negative: relative to now)
    #[must_use]
    pub const fn time_last_after(mut self, secs: i64) -> Self {
        self.filters.time_last_after = Some(secs);
        self
    }

    /// Execute the request and decode records as they arrive
    pub async fn stream(self) -> Result<RecordStream<RDataRecord>> {
        let format: RDataFormat = self.format.parse()?;

        let mut segments = vec!["lookup", "rdata", format.as_str(), self.value.as_str()];
        if let Some(rrtype) = &self.rrtype {
            segments.push(rrtype);
        }

        let url = self.client.endpoint(segments, &self.filters.params())?;
        self.client.get_records(url).await
    }

    /// Execute the request and collect every record
    pub async fn send(self) -> LookupResult<RDataRecord> {
        self.stream().await?.collect_records().await
    }
}
