//! Private-address protection for outbound fetches.
//!
//! Validates that URL hosts are not pointing to private, internal, or
//! reserved addresses.

use super::FetchError;
use reqwest::Url;
use std::net::IpAddr;

/// Reject URLs whose host is a private or reserved address.
///
/// Hostnames that are not IP literals pass; only `localhost` and literal
/// addresses are checked here.
pub fn check_host(url: &Url) -> Result<(), FetchError> {
    let Some(host) = url.host_str() else {
        return Err(FetchError::InvalidUrl(format!("no host in {url}")));
    };

    if host.eq_ignore_ascii_case("localhost") {
        return Err(FetchError::Blocked(format!("{host} is not fetchable")));
    }

    let bare = host.trim_start_matches('[').trim_end_matches(']');
    if let Ok(ip) = bare.parse::<IpAddr>()
        && is_private_or_reserved(ip)
    {
        return Err(FetchError::Blocked(format!("{ip} is private or reserved")));
    }

    Ok(())
}

/// Check if an IP address is private, reserved, or otherwise blocked.
///
/// This covers:
/// - Loopback addresses (127.0.0.0/8, ::1)
/// - RFC 1918 private ranges (10/8, 172.16/12, 192.168/16)
/// - Link-local addresses (169.254/16, fe80::/10)
/// - Multicast addresses (224/4, ff00::/8)
/// - Unspecified addresses (0.0.0.0/8, ::)
/// - IPv6 unique local (fc00::/7)
pub fn is_private_or_reserved(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_multicast()
                || v4.is_broadcast()
                || v4.is_unspecified()
                || v4.octets()[0] == 0
        }
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || v6.is_multicast()
                || v6.is_unspecified()
                || (v6.segments()[0] & 0xfe00) == 0xfc00
                || (v6.segments()[0] & 0xffc0) == 0xfe80
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_is_private_or_reserved_v4() {
        assert!(is_private_or_reserved(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))));
        assert!(is_private_or_reserved(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))));
        assert!(is_private_or_reserved(IpAddr::V4(Ipv4Addr::new(172, 16, 0, 1))));
        assert!(is_private_or_reserved(IpAddr::V4(Ipv4Addr::new(192, 168, 0, 1))));
        assert!(is_private_or_reserved(IpAddr::V4(Ipv4Addr::new(169, 254, 0, 1))));
        assert!(is_private_or_reserved(IpAddr::V4(Ipv4Addr::new(224, 0, 0, 1))));
        assert!(is_private_or_reserved(IpAddr::V4(Ipv4Addr::UNSPECIFIED)));
    }

    #[test]
    fn test_is_private_or_reserved_v6() {
        assert!(is_private_or_reserved(IpAddr::V6(Ipv6Addr::LOCALHOST)));
        assert!(is_private_or_reserved(IpAddr::V6(Ipv6Addr::new(0xfc00, 0, 0, 0, 0, 0, 0, 1))));
        assert!(is_private_or_reserved(IpAddr::V6(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1))));
        assert!(is_private_or_reserved(IpAddr::V6(Ipv6Addr::new(0xff00, 0, 0, 0, 0, 0, 0, 1))));
        assert!(is_private_or_reserved(IpAddr::V6(Ipv6Addr::UNSPECIFIED)));
    }

    #[test]
    fn test_is_private_or_reserved_public() {
        assert!(!is_private_or_reserved(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8))));
        assert!(!is_private_or_reserved(IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34))));
        assert!(!is_private_or_reserved(IpAddr::V6(Ipv6Addr::new(
            0x2001, 0x4860, 0x4860, 0, 0, 0, 0, 1
        ))));
    }

    #[test]
    fn test_check_host_blocks_private() {
        let blocked = ["http://127.0.0.1/", "http://localhost/", "http://10.0.0.1/x", "http://[::1]/"];
        for url in blocked {
            let url = Url::parse(url).unwrap();
            assert!(matches!(check_host(&url), Err(FetchError::Blocked(_))), "{url} should be blocked");
        }
    }

    #[test]
    fn test_check_host_allows_public() {
        let url = Url::parse("https://example.com/page").unwrap();
        assert!(check_host(&url).is_ok());

        let url = Url::parse("http://8.8.8.8/").unwrap();
        assert!(check_host(&url).is_ok());
    }
}
