//! Static code tables for every categorical field of the API.
//!
//! Each table is an ordered list of `(id, name)` pairs. Lookups are exact
//! string matches and the first match wins, so tables that map several names
//! to one id (chrome versions) resolve ids back to the first listed name.
//! What happens on a miss is up to the caller: some fields fall back to a
//! default entry, others reject the value.

use crate::types::IdName;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {category} '{value}', expected one of: {expected}")]
pub struct UnknownName {
    pub category: &'static str,
    pub value: String,
    pub expected: String,
}

#[derive(Debug)]
pub struct CodeTable {
    category: &'static str,
    entries: &'static [(i32, &'static str)],
}

impl CodeTable {
    pub const fn new(category: &'static str, entries: &'static [(i32, &'static str)]) -> Self {
        CodeTable { category, entries }
    }

    pub fn category(&self) -> &'static str {
        self.category
    }

    pub fn entries(&self) -> &'static [(i32, &'static str)] {
        self.entries
    }

    pub fn id(&self, name: &str) -> Option<i32> {
        self.entries
            .iter()
            .find(|(_, entry)| *entry == name)
            .map(|(id, _)| *id)
    }

    pub fn name(&self, id: i32) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, name)| *name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.id(name).is_some()
    }

    /// Id and canonical name of `name`, both taken from the same entry.
    pub fn pair(&self, name: &str) -> Option<IdName> {
        self.entries
            .iter()
            .find(|(_, entry)| *entry == name)
            .map(|(id, name)| IdName::new(*id, *name))
    }

    pub fn pair_for_id(&self, id: i32) -> Option<IdName> {
        self.name(id).map(|name| IdName::new(id, name))
    }

    /// Like [`CodeTable::pair`], but a miss is an error naming the vocabulary.
    pub fn resolve(&self, name: &str) -> Result<IdName, UnknownName> {
        self.pair(name).ok_or_else(|| self.unknown(name))
    }

    /// The entry for `name`, or the entry for `default_id` when `name` is not
    /// in the table.
    pub fn pair_or(&self, name: &str, default_id: i32) -> IdName {
        self.pair(name)
            .or_else(|| self.pair_for_id(default_id))
            .unwrap_or_else(|| IdName::new(default_id, ""))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(_, name)| *name)
    }

    pub fn unknown(&self, value: &str) -> UnknownName {
        UnknownName {
            category: self.category,
            value: value.to_string(),
            expected: self.names().collect::<Vec<_>>().join(", "),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TestType {
    #[default]
    Web,
    Transaction,
    Dns,
    Ping,
    Api,
    Traceroute,
    Ssl,
    Bgp,
    Playwright,
    Puppeteer,
}

impl TestType {
    pub const ALL: [TestType; 10] = [
        TestType::Web,
        TestType::Transaction,
        TestType::Dns,
        TestType::Ping,
        TestType::Api,
        TestType::Traceroute,
        TestType::Ssl,
        TestType::Bgp,
        TestType::Playwright,
        TestType::Puppeteer,
    ];

    pub const fn id(self) -> i32 {
        match self {
            TestType::Web => 0,
            TestType::Transaction => 1,
            TestType::Dns => 5,
            TestType::Ping => 6,
            TestType::Api => 9,
            TestType::Traceroute => 12,
            TestType::Ssl => 18,
            TestType::Bgp => 20,
            TestType::Playwright => 22,
            TestType::Puppeteer => 23,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TestType::Web => "Web",
            TestType::Transaction => "Transaction",
            TestType::Dns => "DNS",
            TestType::Ping => "Ping",
            TestType::Api => "API",
            TestType::Traceroute => "Traceroute",
            TestType::Ssl => "SSL",
            TestType::Bgp => "BGP",
            TestType::Playwright => "Playwright",
            TestType::Puppeteer => "Puppeteer",
        }
    }

    pub fn from_id(id: i32) -> Option<TestType> {
        TestType::ALL.into_iter().find(|test_type| test_type.id() == id)
    }

    pub fn id_name(self) -> IdName {
        IdName::new(self.id(), self.name())
    }

    /// Types that drive a browser and carry viewport, step runtime and
    /// bandwidth settings.
    pub const fn is_browser(self) -> bool {
        matches!(
            self,
            TestType::Web
                | TestType::Api
                | TestType::Transaction
                | TestType::Playwright
                | TestType::Puppeteer
        )
    }

    /// Types whose document carries `testRequestData`.
    pub const fn has_request_data(self) -> bool {
        matches!(
            self,
            TestType::Api | TestType::Transaction | TestType::Playwright | TestType::Puppeteer
        )
    }

    pub const fn supports_additional_monitor(self) -> bool {
        self.is_browser() || matches!(self, TestType::Ssl | TestType::Dns)
    }
}

pub static SETTING_TYPES: CodeTable = CodeTable::new("setting type", &[(0, "Inherit"), (1, "Override")]);

pub static TEST_STATUSES: CodeTable = CodeTable::new("status", &[(0, "active"), (1, "inactive")]);

pub static MONITORS: CodeTable = CodeTable::new(
    "monitor",
    &[
        (2, "object"),
        (3, "emulated"),
        (18, "chrome"),
        (19, "playback"),
        (20, "mobile playback"),
        (26, "mobile"),
        (25, "api"),
        (8, "ping icmp"),
        (11, "ping tcp"),
        (12, "dns experience"),
        (13, "dns direct"),
        (23, "ping udp"),
        (9, "traceroute icmp"),
        (14, "traceroute udp"),
        (29, "traceroute tcp"),
        (31, "ssl"),
        (34, "bgp"),
        (41, "bgp basic"),
        (43, "puppeteer"),
        (44, "playwright"),
    ],
);

pub static SCRIPT_TYPES: CodeTable = CodeTable::new(
    "script type",
    &[(1, "selenium"), (2, "javascript"), (3, "puppeteer"), (4, "playwright")],
);

pub static USER_AGENTS: CodeTable = CodeTable::new(
    "simulated device",
    &[
        (3, "android"),
        (4, "iphone"),
        (5, "ipad 2"),
        (6, "kindle fire"),
        (7, "galaxy tab"),
        (8, "iphone 5"),
        (9, "ipad mini"),
        (10, "galaxy note"),
        (11, "nexus 7"),
        (12, "nexus 4"),
        (13, "nokia lumia920"),
        (14, "iphone 6"),
        (15, "blackberry z30"),
        (16, "galaxy s4"),
        (17, "htc onex"),
        (18, "lg optimusg"),
        (19, "droid razr hd"),
        (20, "nexus 6"),
        (21, "iphone 6s"),
        (22, "galaxy s6"),
        (23, "iphone 7"),
        (24, "google pixel"),
        (25, "galaxy s8"),
    ],
);

/// Chrome release channel. Every pinned version shares the "specific
/// version" id 3.
pub static CHROME_VERSIONS: CodeTable = CodeTable::new(
    "chrome version",
    &[
        (1, "stable"),
        (2, "preview"),
        (3, "108"),
        (3, "89"),
        (3, "87"),
        (3, "85"),
        (3, "75"),
        (3, "71"),
        (3, "66"),
        (3, "63"),
        (3, "59"),
        (3, "53"),
    ],
);

pub const CHROME_SPECIFIC_VERSION: i32 = 3;

pub static CHROME_APPLICATION_VERSIONS: CodeTable = CodeTable::new(
    "chrome application version",
    &[
        (1, "53"),
        (3, "59"),
        (4, "63"),
        (5, "66"),
        (7, "75"),
        (8, "71"),
        (12, "85"),
        (13, "87"),
        (14, "89"),
        (28558, "108"),
    ],
);

pub static DNS_QUERY_TYPES: CodeTable = CodeTable::new(
    "dns query type",
    &[
        (0, "none"),
        (1, "a"),
        (2, "ns"),
        (5, "cname"),
        (6, "soa"),
        (7, "mb"),
        (8, "mg"),
        (9, "mr"),
        (10, "null"),
        (11, "wks"),
        (12, "ptr"),
        (13, "hinfo"),
        (14, "minfo"),
        (15, "mx"),
        (16, "txt"),
        (17, "rp"),
        (18, "afsdb"),
        (19, "x25"),
        (20, "isdn"),
        (21, "rt"),
        (22, "nsap"),
        (24, "sig"),
        (25, "key"),
        (26, "px"),
        (28, "aaaa"),
        (29, "loc"),
        (31, "eid"),
        (32, "nimloc"),
        (33, "srv"),
        (34, "atma"),
        (35, "naptr"),
        (36, "kx"),
        (37, "cert"),
        (38, "a6"),
        (39, "dname"),
        (40, "sink"),
        (41, "opt"),
        (42, "apl"),
        (43, "ds"),
        (44, "sshfp"),
        (45, "ipseckey"),
        (46, "rrsig"),
        (47, "nsec"),
        (48, "dnskey"),
        (49, "dhcid"),
        (50, "nsec3"),
        (51, "nsec3param"),
        (55, "hip"),
        (99, "spf"),
        (100, "uinfo"),
        (101, "uid"),
        (102, "gid"),
        (103, "unspec"),
        (249, "tkey"),
        (250, "tsig"),
        (251, "ixfr"),
        (252, "axfr"),
        (253, "mailb"),
        (255, "any"),
        (32768, "ta"),
        (32769, "dlv"),
    ],
);

pub static FREQUENCIES: CodeTable = CodeTable::new(
    "frequency",
    &[
        (0, "none"),
        (1, "1 minute"),
        (2, "5 minutes"),
        (3, "10 minutes"),
        (4, "15 minutes"),
        (5, "20 minutes"),
        (6, "30 minutes"),
        (7, "60 minutes"),
        (8, "2 hours"),
        (9, "3 hours"),
        (10, "4 hours"),
        (11, "6 hours"),
        (12, "8 hours"),
        (13, "12 hours"),
        (14, "24 hours"),
        (15, "4 minutes"),
        (16, "2 minutes"),
    ],
);

pub static NODE_DISTRIBUTIONS: CodeTable =
    CodeTable::new("node distribution", &[(0, "random"), (1, "concurrent")]);

pub static NODE_THRESHOLD_TYPES: CodeTable = CodeTable::new(
    "node threshold type",
    &[(0, "runs"), (1, "average across nodes"), (2, "node")],
);

pub const NODE_THRESHOLD_AVERAGE_ACROSS_NODES: i32 = 1;

pub static OPERATION_TYPES: CodeTable = CodeTable::new(
    "operation type",
    &[
        (0, "not equals"),
        (1, "equals"),
        (2, "greater than"),
        (3, "greater than or equals"),
        (4, "less than"),
        (5, "less than or equals"),
    ],
);

pub static TRIGGER_TYPES: CodeTable = CodeTable::new(
    "trigger type",
    &[(1, "specific value"), (2, "trailing value"), (3, "trendshift")],
);

pub const TRIGGER_SPECIFIC_VALUE: i32 = 1;
pub const TRIGGER_TRAILING_VALUE: i32 = 2;
pub const TRIGGER_TRENDSHIFT: i32 = 3;

pub static REMINDERS: CodeTable = CodeTable::new(
    "reminder",
    &[
        (0, "none"),
        (1, "1 minute"),
        (5, "5 minutes"),
        (10, "10 minutes"),
        (15, "15 minutes"),
        (30, "30 minutes"),
        (60, "1 hour"),
        (1440, "daily"),
    ],
);

pub static THRESHOLD_INTERVALS: CodeTable = CodeTable::new(
    "threshold interval",
    &[
        (0, "default"),
        (5, "5 minutes"),
        (10, "10 minutes"),
        (15, "15 minutes"),
        (30, "30 minutes"),
        (60, "1 hour"),
        (120, "2 hours"),
        (360, "6 hours"),
        (720, "12 hours"),
    ],
);

pub static HISTORICAL_INTERVALS: CodeTable = CodeTable::new(
    "historical interval",
    &[
        (5, "5 minutes"),
        (10, "10 minutes"),
        (15, "15 minutes"),
        (30, "30 minutes"),
        (60, "1 hour"),
        (120, "2 hours"),
        (360, "6 hours"),
        (720, "12 hours"),
        (1440, "1 day"),
        (10080, "1 week"),
    ],
);

pub static NOTIFICATION_TYPES: CodeTable =
    CodeTable::new("notification type", &[(0, "default contacts")]);

pub static ALERT_TYPES: CodeTable = CodeTable::new(
    "alert type",
    &[
        (2, "byte length"),
        (3, "content match"),
        (4, "host failure"),
        (9, "test failure"),
        (7, "timing"),
        (12, "ping"),
        (13, "requests"),
        (15, "availability"),
        (20, "path"),
        (23, "asn"),
    ],
);

pub const ALERT_HOST_FAILURE: i32 = 4;
pub const ALERT_TIMING: i32 = 7;
pub const ALERT_TEST_FAILURE: i32 = 9;
pub const ALERT_PING: i32 = 12;
pub const ALERT_AVAILABILITY: i32 = 15;
pub const ALERT_PATH: i32 = 20;

pub static ALERT_SUB_TYPES: CodeTable = CodeTable::new(
    "alert sub type",
    &[
        (1, "byte length"),
        (2, "page"),
        (3, "file size"),
        (10, "regular expression"),
        (14, "response code"),
        (15, "response headers"),
        (50, "dns"),
        (51, "connect"),
        (52, "send"),
        (53, "wait"),
        (54, "load"),
        (55, "ttfb"),
        (57, "content load"),
        (58, "response"),
        (59, "test time"),
        (61, "dom load"),
        (63, "test time with suspect"),
        (64, "server response"),
        (66, "document complete"),
        (67, "redirect"),
        (100, "ping rtt"),
        (101, "ping packet loss"),
        (110, "# requests"),
        (111, "# hosts"),
        (112, "# connections"),
        (113, "# redirects"),
        (114, "# other"),
        (115, "# images"),
        (116, "# scripts"),
        (117, "# html"),
        (118, "# css"),
        (119, "# xml"),
        (120, "# flash"),
        (121, "# media"),
        (140, "test"),
        (141, "content"),
        (142, "% downtime"),
        (190, "# cities"),
        (191, "# asns"),
        (193, "# countries"),
        (194, "# hops"),
        (195, "handshake_time"),
        (196, "days_to_expiration"),
        (210, "origin as"),
        (211, "path as"),
        (212, "origin neighbor"),
        (213, "prefix mismatch"),
    ],
);

pub static STATISTICAL_TYPES: CodeTable = CodeTable::new("statistical type", &[(1, "average")]);

pub static TEST_FLAGS: CodeTable = CodeTable::new(
    "test flag",
    &[
        (2, "verify_test_on_failure"),
        (3, "debug_primary_host_on_failure"),
        (4, "enable_http2"),
        (8, "debug_referenced_hosts_on_failure"),
        (9, "capture_http_headers"),
        (11, "capture_response_content"),
        (13, "capture_filmstrip"),
        (14, "capture_screenshot"),
        (17, "ignore_ssl_failures"),
        (19, "enable_bind_hostname"),
        (20, "enable_tcp_protocol"),
        (21, "enable_nsid"),
        (22, "disable_recursive_resolution"),
        (23, "host_data_collection_enabled"),
        (24, "zone_data_collection_enabled"),
        (25, "stop_test_on_document_complete"),
        (26, "try_next_nameserver_on_failure"),
        (27, "f40x_or_50x_http_mark_successful"),
        (31, "favor_fastest_round_trip_nameserver"),
        (33, "t30x_redirects_do_not_follow"),
        (36, "enable_self_versus_third_party_zones"),
        (37, "allow_test_download_limit_override"),
        (38, "disable_cross_origin_iframe_access"),
        (39, "stop_test_on_dom_content_load"),
        (40, "initiated_from_api"),
        (41, "instant_test_charged"),
        (42, "certificate_revocation_disabled"),
        (43, "enforce_certificate_pinning"),
        (44, "enforce_public_key_pinning"),
        (48, "enable_dnssec"),
        (50, "enable_path_mtu_discovery"),
        (51, "enable_tracing"),
        (52, "is_continuous"),
        (53, "enable_ecn"),
        (54, "enable_dscp"),
        (55, "is_accurate_ecn"),
        (56, "enable_dns_query_limits"),
    ],
);

pub const FLAG_STOP_TEST_ON_DOCUMENT_COMPLETE: &str = "stop_test_on_document_complete";

pub static ADDITIONAL_MONITORS: CodeTable = CodeTable::new(
    "additional monitor",
    &[
        (8, "ping icmp"),
        (11, "ping tcp"),
        (23, "ping udp"),
        (9, "traceroute icmp"),
        (14, "traceroute udp"),
        (29, "traceroute tcp"),
    ],
);

pub static BANDWIDTH_THROTTLING: CodeTable = CodeTable::new(
    "bandwidth throttling",
    &[
        (1, "gprs"),
        (2, "regular 2g"),
        (3, "good 2g"),
        (4, "regular 3g"),
        (5, "good 3g"),
        (6, "regular 4g"),
        (7, "dsl"),
        (8, "wifi"),
    ],
);

pub static REQUEST_HEADER_TYPES: CodeTable = CodeTable::new(
    "request header",
    &[
        (1, "user_agent"),
        (2, "accept"),
        (3, "accept_encoding"),
        (4, "accept_language"),
        (5, "accept_charset"),
        (6, "cookie"),
        (7, "cache_control"),
        (9, "pragma"),
        (10, "referer"),
        (12, "host"),
        (13, "request_override"),
        (14, "dns_override"),
        (15, "request_block"),
        (16, "request_delay"),
    ],
);

pub static AUTHENTICATION_TYPES: CodeTable = CodeTable::new(
    "authentication type",
    &[(1, "basic"), (2, "digest"), (3, "ntlm"), (5, "login")],
);

pub static RECIPIENT_TYPES: CodeTable =
    CodeTable::new("recipient type", &[(1, "ContactGroup"), (2, "Email")]);

pub const RECIPIENT_CONTACT_GROUP: i32 = 1;
pub const RECIPIENT_EMAIL: i32 = 2;

pub static NETWORK_TYPES: CodeTable = CodeTable::new("network type", &[(0, "Backbone")]);
