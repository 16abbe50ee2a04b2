use std::net::IpAddr;

use ipnet::IpNet;

use crate::{
    error::{Error, Result},
    range::AddressRange,
};

/// Parse a bare IP address. Masks, ranges, and zones are rejected.
pub fn parse_addr(text: &str) -> Result<IpAddr> {
    text.parse::<IpAddr>()
        .map_err(|_| Error::InvalidAddress(text.to_owned()))
}

/// Parse a bare IP address that may carry an IPv6 zone (`fe80::1%eth0`).
///
/// The zone must be non-empty and is discarded. IPv4 addresses never take a zone.
pub fn parse_zoned_addr(text: &str) -> Result<IpAddr> {
    match text.split_once('%') {
        Some((addr, zone)) if !zone.is_empty() => match parse_addr(addr) {
            Ok(addr @ IpAddr::V6(_)) => Ok(addr),
            _ => Err(Error::InvalidAddress(text.to_owned())),
        },
        Some(_) => Err(Error::InvalidAddress(text.to_owned())),
        None => parse_addr(text),
    }
}

/// Parse the length part of a CIDR block. Only plain decimal digits are allowed, without leading zeros
fn parse_prefix_len(text: &str) -> Option<u8> {
    let digits_only = !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit());
    if !digits_only || (text.len() > 1 && text.starts_with('0')) {
        return None;
    }
    text.parse().ok()
}

/// Parse an address specification into the inclusive range it describes.
///
/// The following forms are accepted, tried in order:
/// - A single address (`10.0.0.5`, `2001:db8::1`)
/// - A hyphenated range (`10.0.0.1-10.0.0.10`)
/// - A CIDR block (`10.0.0.0/24`). Host bits may be set, the range always spans the whole block.
pub fn parse(spec: &str) -> Result<AddressRange> {
    // Single address
    if let Ok(addr) = spec.parse::<IpAddr>() {
        return Ok(AddressRange::single(addr));
    }

    // Hyphenated range. Neither address family uses `-` so the first one is the separator
    if let Some((from, to)) = spec.split_once('-') {
        return AddressRange::new(parse_addr(from)?, parse_addr(to)?);
    }

    // CIDR block
    if let Some((addr, prefix_len)) = spec.split_once('/') {
        let addr = parse_addr(addr)?;
        let prefix_len =
            parse_prefix_len(prefix_len).ok_or_else(|| Error::InvalidPrefixLength(spec.to_owned()))?;
        let net =
            IpNet::new(addr, prefix_len).map_err(|_| Error::InvalidPrefixLength(spec.to_owned()))?;
        return Ok(AddressRange::from(net));
    }

    Err(Error::Unrecognized(spec.to_owned()))
}

/// Check if `spec` is a valid address specification without keeping the range
#[must_use]
pub fn parses(spec: &str) -> bool {
    parse(spec).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(text: &str) -> IpAddr {
        text.parse().unwrap()
    }

    #[test]
    fn test_parse_single() {
        for text in ["10.0.0.5", "0.0.0.0", "255.255.255.255", "2001:db8::1", "::"] {
            let range = parse(text).unwrap();
            assert_eq!(range.first(), addr(text));
            assert_eq!(range.last(), addr(text));
        }
    }

    #[test]
    fn test_parse_range() {
        let range = parse("10.0.0.1-10.0.0.10").unwrap();
        assert_eq!(range.first(), addr("10.0.0.1"));
        assert_eq!(range.last(), addr("10.0.0.10"));

        let range = parse("2001:db8::1-2001:db8::1:0").unwrap();
        assert_eq!(range.first(), addr("2001:db8::1"));
        assert_eq!(range.last(), addr("2001:db8::1:0"));

        // A range may cover a single address
        assert_eq!(
            parse("10.0.0.1-10.0.0.1").unwrap(),
            AddressRange::single(addr("10.0.0.1"))
        );
    }

    #[test]
    fn test_parse_range_errors() {
        assert_eq!(
            parse("10.0.0.10-10.0.0.1"),
            Err(Error::InvertedRange {
                from: addr("10.0.0.10"),
                to: addr("10.0.0.1")
            })
        );
        assert_eq!(
            parse("10.0.0.1-2001:db8::1"),
            Err(Error::MixedFamilies {
                from: addr("10.0.0.1"),
                to: addr("2001:db8::1")
            })
        );
        assert_eq!(
            parse("10.0.0.1-"),
            Err(Error::InvalidAddress(String::new()))
        );
        assert_eq!(
            parse("10.0.0.1-10.0.0.9-10.0.0.12"),
            Err(Error::InvalidAddress("10.0.0.9-10.0.0.12".to_owned()))
        );
    }

    #[test]
    fn test_parse_cidr() {
        let range = parse("10.0.0.0/24").unwrap();
        assert_eq!(range.first(), addr("10.0.0.0"));
        assert_eq!(range.last(), addr("10.0.0.255"));

        // Host bits are masked off
        let range = parse("10.0.0.77/28").unwrap();
        assert_eq!(range.first(), addr("10.0.0.64"));
        assert_eq!(range.last(), addr("10.0.0.79"));

        let range = parse("0.0.0.0/0").unwrap();
        assert_eq!(range.first(), addr("0.0.0.0"));
        assert_eq!(range.last(), addr("255.255.255.255"));

        let range = parse("2001:db8::/64").unwrap();
        assert_eq!(range.first(), addr("2001:db8::"));
        assert_eq!(range.last(), addr("2001:db8::ffff:ffff:ffff:ffff"));

        assert_eq!(
            parse("2001:db8::5/128").unwrap(),
            AddressRange::single(addr("2001:db8::5"))
        );
    }

    #[test]
    fn test_parse_cidr_errors() {
        assert_eq!(
            parse("10.0.0.0/33"),
            Err(Error::InvalidPrefixLength("10.0.0.0/33".to_owned()))
        );
        assert_eq!(
            parse("2001:db8::/129"),
            Err(Error::InvalidPrefixLength("2001:db8::/129".to_owned()))
        );
        assert_eq!(
            parse("10.0.0.0/abc"),
            Err(Error::InvalidPrefixLength("10.0.0.0/abc".to_owned()))
        );
        assert_eq!(
            parse("10.0.0.0/-1"),
            Err(Error::InvalidAddress("10.0.0.0/".to_owned()))
        );
        for spec in ["10.0.0.0/+24", "10.0.0.0/024", "2001:db8::/0064", "10.0.0.0/", "10.0.0.0/ 8"] {
            assert_eq!(
                parse(spec),
                Err(Error::InvalidPrefixLength(spec.to_owned())),
                "{spec}"
            );
        }
        assert_eq!(
            parse("10.0.0/24"),
            Err(Error::InvalidAddress("10.0.0".to_owned()))
        );
    }

    #[test]
    fn test_parse_unrecognized() {
        assert_eq!(
            parse("not.an.ip"),
            Err(Error::Unrecognized("not.an.ip".to_owned()))
        );
        assert_eq!(parse(""), Err(Error::Unrecognized(String::new())));
        assert!(!parses("not-an-ip"));
        assert!(!parses(" 10.0.0.1"));
    }

    #[test]
    fn test_parse_addr() {
        assert_eq!(parse_addr("10.0.0.1").unwrap(), addr("10.0.0.1"));
        assert_eq!(
            parse_addr("10.0.0.1/24"),
            Err(Error::InvalidAddress("10.0.0.1/24".to_owned()))
        );
        assert_eq!(
            parse_addr("gateway").unwrap_err().to_string(),
            "unable to parse IP address \"gateway\""
        );
    }

    #[test]
    fn test_parse_zoned_addr() {
        assert_eq!(parse_zoned_addr("fe80::1%eth0").unwrap(), addr("fe80::1"));
        assert_eq!(parse_zoned_addr("fe80::1").unwrap(), addr("fe80::1"));
        assert_eq!(parse_zoned_addr("10.0.0.1").unwrap(), addr("10.0.0.1"));
        for text in ["fe80::1%", "10.0.0.1%eth0", "%eth0", "gateway%eth0"] {
            assert_eq!(
                parse_zoned_addr(text),
                Err(Error::InvalidAddress(text.to_owned())),
                "{text}"
            );
        }

        // Zones are only accepted where a bare address is expected
        assert!(parse_addr("fe80::1%eth0").is_err());
        assert!(!parses("fe80::1%eth0"));
    }

    #[test]
    fn test_parses() {
        assert!(parses("10.0.0.1"));
        assert!(parses("10.0.0.1-10.0.0.2"));
        assert!(parses("10.0.0.0/8"));
        assert!(parses("10.0.0.0/0"));
        assert!(parses("fd00::/8"));
        assert!(!parses("10.0.0.2-10.0.0.1"));
        assert!(!parses("10.0.0.0/40"));
    }
}
