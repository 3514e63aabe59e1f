use serde::{Deserialize, Serialize};

use super::timestamp::Timestamp;

/// One rrset observation from `/lookup/rrset`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RRSetRecord {
    /// Number of times the rrset was observed
    pub count: u64,

    /// First time seen by the sensor network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_first: Option<Timestamp>,

    /// Last time seen by the sensor network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_last: Option<Timestamp>,

    /// First time seen in a zone file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_time_first: Option<Timestamp>,

    /// Last time seen in a zone file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_time_last: Option<Timestamp>,

    /// Owner name
    pub rrname: String,

    /// Resource record type (A, NS, MX, ...)
    pub rrtype: String,

    /// Answer data, in the order the server returned it
    pub rdata: Vec<String>,

    /// Zone the observation was made under
    #[serde(default)]
    pub bailiwick: String,
}

impl RRSetRecord {
    /// Earliest time known for this rrset, sensor or zone
    #[must_use]
    pub fn first_seen(&self) -> Option<Timestamp> {
        earliest(self.time_first, self.zone_time_first)
    }

    /// Latest time known for this rrset, sensor or zone
    #[must_use]
    pub fn last_seen(&self) -> Option<Timestamp> {
        self.time_last.max(self.zone_time_last)
    }
}

/// One rdata observation from `/lookup/rdata`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RDataRecord {
    /// Number of times the record was observed
    pub count: u64,

    /// First time seen by the sensor network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_first: Option<Timestamp>,

    /// Last time seen by the sensor network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_last: Option<Timestamp>,

    /// First time seen in a zone file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_time_first: Option<Timestamp>,

    /// Last time seen in a zone file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_time_last: Option<Timestamp>,

    /// Owner name
    pub rrname: String,

    /// Resource record type
    pub rrtype: String,

    /// The matching answer data
    pub rdata: String,
}

impl RDataRecord {
    /// Earliest time known for this record, sensor or zone
    #[must_use]
    pub fn first_seen(&self) -> Option<Timestamp> {
        earliest(self.time_first, self.zone_time_first)
    }

    /// Latest time known for this record, sensor or zone
    #[must_use]
    pub fn last_seen(&self) -> Option<Timestamp> {
        self.time_last.max(self.zone_time_last)
    }
}

// Option's Ord puts None first, so min() alone would discard a known time.
fn earliest(a: Option<Timestamp>, b: Option<Timestamp>) -> Option<Timestamp> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rrset_full_line() {
        let line = r#"{"count":42,"time_first":1300000000,"time_last":1400000000,"rrname":"example.com.","rrtype":"NS","bailiwick":"com.","rdata":["a.iana-servers.net.","b.iana-servers.net."]}"#;
        let rec: RRSetRecord = serde_json::from_str(line).unwrap();
        assert_eq!(rec.count, 42);
        assert_eq!(rec.rrname, "example.com.");
        assert_eq!(rec.bailiwick, "com.");
        assert_eq!(rec.rdata, vec!["a.iana-servers.net.", "b.iana-servers.net."]);
        assert_eq!(rec.time_first.unwrap().unix(), 1_300_000_000);
        assert!(rec.zone_time_first.is_none());
    }

    #[test]
    fn test_omitted_times_are_not_serialized() {
        let line = r#"{"count":5,"rrname":"example.com","rrtype":"A","rdata":"1.2.3.4"}"#;
        let rec: RDataRecord = serde_json::from_str(line).unwrap();
        assert!(rec.time_first.is_none());
        let out = serde_json::to_string(&rec).unwrap();
        assert!(!out.contains("time_first"));
        assert_eq!(serde_json::from_str::<RDataRecord>(&out).unwrap(), rec);
    }

    #[test]
    fn test_null_time_is_absent() {
        let line = r#"{"count":1,"time_first":null,"rrname":"a.","rrtype":"A","rdata":"10.0.0.1"}"#;
        let rec: RDataRecord = serde_json::from_str(line).unwrap();
        assert!(rec.time_first.is_none());
    }

    #[test]
    fn test_rrset_rdata_must_be_list() {
        let line = r#"{"count":1,"rrname":"a.","rrtype":"A","rdata":"10.0.0.1","bailiwick":"a."}"#;
        assert!(serde_json::from_str::<RRSetRecord>(line).is_err());
    }

    #[test]
    fn test_seen_span_mixes_sensor_and_zone() {
        let line = r#"{"count":1,"time_first":200,"time_last":300,"zone_time_first":100,"rrname":"a.","rrtype":"A","rdata":"10.0.0.1"}"#;
        let rec: RDataRecord = serde_json::from_str(line).unwrap();
        assert_eq!(rec.first_seen().unwrap().unix(), 100);
        assert_eq!(rec.last_seen().unwrap().unix(), 300);
    }
}
