//! Load balancer IP selection for a Gateway's Service.
//!
//! Only IP-typed addresses are candidates; an address without a type counts
//! as IP. Zero candidates means no IP is requested, exactly one candidate must
//! parse as an IP literal, and more than one is rejected outright.

use std::net::IpAddr;

use crate::domain::{AddressType, GatewayAddress};
use crate::errors::{DeployerError, Result};

/// Outcome of classifying a Gateway's addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressCandidates<'a> {
    None,
    One(&'a GatewayAddress),
    Many(usize),
}

impl<'a> AddressCandidates<'a> {
    pub fn classify(addresses: &'a [GatewayAddress]) -> Self {
        let mut candidates = addresses
            .iter()
            .filter(|addr| addr.resolved_type() == AddressType::IpAddress);

        match (candidates.next(), candidates.count()) {
            (None, _) => AddressCandidates::None,
            (Some(only), 0) => AddressCandidates::One(only),
            (Some(_), rest) => AddressCandidates::Many(rest + 1),
        }
    }
}

/// Pick the load balancer IP to request for a Gateway.
///
/// Returns `Ok(None)` when no IP-typed address is present, which also covers
/// Gateways that only list hostnames.
pub fn resolve_load_balancer_ip(addresses: &[GatewayAddress]) -> Result<Option<String>> {
    match AddressCandidates::classify(addresses) {
        AddressCandidates::None => Ok(None),
        AddressCandidates::One(candidate) => match candidate.value.parse::<IpAddr>() {
            Ok(_) => Ok(Some(candidate.value.clone())),
            Err(_) => Err(DeployerError::NoValidIpAddress {
                value: candidate.value.clone(),
            }),
        },
        AddressCandidates::Many(count) => Err(DeployerError::MultipleAddresses { count }),
    }
}
