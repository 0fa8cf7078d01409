//! Building analysis records from scoring results and request metadata.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::scoring::AnalysisResult;

use super::types::{AnalysisLabel, MessageType, NewAnalysis};

/// Placeholder for missing request metadata
pub const UNKNOWN: &str = "Unknown";

/// Replace the last octet of an IPv4 address with `***`.
///
/// Accepts `a.b.c.d:port` and IPv4-mapped IPv6 forms. Anything else is
/// returned unchanged; blank input becomes `Unknown`.
pub fn mask_ip(ip: &str) -> String {
    let ip = ip.trim();
    if ip.is_empty() {
        return UNKNOWN.to_string();
    }

    match parse_ipv4(ip) {
        Some(addr) => {
            let [a, b, c, _] = addr.octets();
            format!("{}.{}.{}.***", a, b, c)
        }
        None => ip.to_string(),
    }
}

fn parse_ipv4(raw: &str) -> Option<Ipv4Addr> {
    let addr = raw
        .parse::<IpAddr>()
        .ok()
        .or_else(|| raw.parse::<SocketAddr>().ok().map(|s| s.ip()))?;

    match addr {
        IpAddr::V4(v4) => Some(v4),
        IpAddr::V6(v6) => v6.to_ipv4_mapped(),
    }
}

impl NewAnalysis {
    pub fn from_result(
        result: &AnalysisResult,
        message_type: MessageType,
        user_agent: Option<&str>,
        ip_address: Option<&str>,
    ) -> Self {
        Self {
            result: AnalysisLabel::from_verdict(result.is_scam),
            confidence: result.confidence,
            risk_level: result.risk_level,
            indicators: result.matched_indicator_names(),
            message_type,
            user_agent: user_agent
                .map(str::trim)
                .filter(|ua| !ua.is_empty())
                .unwrap_or(UNKNOWN)
                .to_string(),
            ip_address: ip_address.map(mask_ip).unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::types::{IndicatorMatch, RiskLevel, Severity};
    use chrono::Utc;

    #[test]
    fn test_mask_ipv4() {
        assert_eq!(mask_ip("192.168.1.42"), "192.168.1.***");
        assert_eq!(mask_ip(" 10.0.0.1 "), "10.0.0.***");
    }

    #[test]
    fn test_mask_ipv4_with_port_or_mapped() {
        assert_eq!(mask_ip("203.0.113.9:4711"), "203.0.113.***");
        assert_eq!(mask_ip("::ffff:203.0.113.9"), "203.0.113.***");
        assert_eq!(mask_ip("[::ffff:203.0.113.9]:443"), "203.0.113.***");
    }

    #[test]
    fn test_mask_non_ipv4() {
        assert_eq!(mask_ip("::1"), "::1");
        assert_eq!(mask_ip("not-an-ip"), "not-an-ip");
        assert_eq!(mask_ip(""), UNKNOWN);
    }

    #[test]
    fn test_from_result() {
        let result = AnalysisResult {
            is_scam: true,
            confidence: 88.5,
            risk_level: RiskLevel::High,
            indicators: vec![
                IndicatorMatch {
                    indicator_type: "Suspicious URLs".into(),
                    description: String::new(),
                    severity: Severity::High,
                    found: true,
                },
                IndicatorMatch {
                    indicator_type: "Spelling Errors".into(),
                    description: String::new(),
                    severity: Severity::Low,
                    found: false,
                },
            ],
            summary: String::new(),
            recommendations: vec![],
            analysis_timestamp: Utc::now(),
        };

        let record = NewAnalysis::from_result(&result, MessageType::Sms, None, Some("203.0.113.9"));
        assert_eq!(record.result, AnalysisLabel::Phishing);
        assert_eq!(record.indicators, vec!["Suspicious URLs"]);
        assert_eq!(record.user_agent, UNKNOWN);
        assert_eq!(record.ip_address, "203.0.113.***");
        assert_eq!(record.message_type, MessageType::Sms);
    }
}
