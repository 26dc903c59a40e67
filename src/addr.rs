//! Decoding of the packed hex addresses found in `/proc/net/{tcp,udp}[6]`.

use std::net::{Ipv4Addr, Ipv6Addr};

/// Printed in place of an address when the table gave us nothing to decode.
pub const MISSING_ADDR: &str = "-";

/// Decode an 8-digit IPv4 field. The kernel prints the address as a host-order
/// (little-endian) u32, so the low byte is the first octet: `0100007F` is
/// `127.0.0.1`.
pub fn decode_ipv4(hex: &str) -> String {
    if hex.is_empty() {
        return MISSING_ADDR.to_string();
    }
    let value = u32::from_str_radix(hex, 16).unwrap_or(0);
    Ipv4Addr::from(value.to_le_bytes()).to_string()
}

/// Decode a 32-digit IPv6 field as 16 big-endian byte pairs, left to right.
///
/// Short input is left-padded with zeros and anything past 32 digits is
/// ignored. A pair that is not valid hex decodes as zero.
pub fn decode_ipv6(hex: &str) -> String {
    if hex.is_empty() {
        return MISSING_ADDR.to_string();
    }

    let padded = format!("{:0>32}", hex);
    let digits = padded.as_bytes();

    let mut octets = [0u8; 16];
    for (i, octet) in octets.iter_mut().enumerate() {
        *octet = std::str::from_utf8(&digits[i * 2..i * 2 + 2])
            .ok()
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .unwrap_or(0);
    }

    Ipv6Addr::from(octets).to_string()
}

/// Decode the hex port half of a local-address field. Invalid input is 0.
pub fn decode_port(hex: &str) -> u16 {
    u16::from_str_radix(hex, 16).unwrap_or(0)
}
