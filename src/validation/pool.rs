use addrspec::AddressRange;
use ipnet::IpNet;
use rangeset::{Family, RangeSetBuilder};

use crate::pool::{GenericPool, PoolSpec};

use super::field::{ErrorList, FieldPath, ValidationError};

const ADDRESS_NOT_PARSEABLE: &str = "provided address is not a valid IP, range, nor CIDR";
const ADDRESS_OUTSIDE_SUBNET: &str = "provided address belongs to a different subnet than others";
const PREFIX_NOT_VALID: &str = "provided prefix is not valid";

fn addresses_path() -> FieldPath {
    FieldPath::new("spec").child("addresses")
}

fn prefix_path() -> FieldPath {
    FieldPath::new("spec").child("prefix")
}

fn gateway_path() -> FieldPath {
    FieldPath::new("spec").child("gateway")
}

/// Validate a new or updated pool.
///
/// `old` is the prior version of the pool on updates. It is accepted so that
/// transition rules can be added later, but only the new state is checked.
#[must_use]
pub fn validate(old: Option<&dyn GenericPool>, new: &dyn GenericPool) -> ErrorList {
    log::debug!(
        "Validating {} {:?} ({})",
        new.kind(),
        new.name(),
        match old {
            Some(_) => "update",
            None => "create",
        }
    );
    validate_spec(new.pool_spec())
}

/// Validate a pool specification, collecting every problem found.
///
/// Errors are listed in the order the checks run: required fields, gateway
/// syntax, address syntax, then prefix and subnet membership. The last check
/// only runs if everything before it passed.
#[must_use]
#[profiling::function]
pub fn validate_spec(spec: &PoolSpec) -> ErrorList {
    let mut errors = ErrorList::new();

    // Required fields
    if spec.addresses.is_empty() {
        errors.invalid(
            addresses_path(),
            spec.addresses.as_slice(),
            "addresses is required",
        );
    }
    if spec.prefix == 0 {
        errors.invalid(prefix_path(), spec.prefix, "a valid prefix is required");
    }

    // The gateway must be a bare address. It is allowed to sit outside the pool's subnet
    if !spec.gateway.is_empty() {
        if let Err(error) = addrspec::parse_zoned_addr(&spec.gateway) {
            errors.invalid(gateway_path(), spec.gateway.as_str(), error.to_string());
        }
    }

    // Every address must parse on its own
    for address in &spec.addresses {
        if !addrspec::parses(address) {
            log::trace!("Address {:?} does not parse", address);
            errors.invalid(addresses_path(), address.as_str(), ADDRESS_NOT_PARSEABLE);
        }
    }

    // The subnet is anchored on a valid address, so it can only be checked on an otherwise clean spec
    if errors.is_empty() {
        errors.extend(validate_addresses_are_within_prefix(spec));
    } else {
        log::debug!(
            "Skipping subnet membership checks after {} error(s)",
            errors.len()
        );
    }

    errors
}

/// Derive the pool's subnet by applying its prefix to the lowest declared address.
///
/// IPv4 addresses sort before IPv6 addresses, so a pool mixing both families is anchored on its lowest IPv4 address.
pub fn derive_subnet(spec: &PoolSpec) -> Result<IpNet, ErrorList> {
    let ranges = spec
        .addresses
        .iter()
        .map(|address| addrspec::parse(address))
        .collect::<Result<Vec<AddressRange>, _>>()
        .map_err(|error| {
            // Addresses are validated before the subnet is derived, so this should not occur
            log::warn!("Re-parsing validated addresses failed: {}", error);
            ValidationError::invalid(
                addresses_path(),
                spec.addresses.as_slice(),
                error.to_string(),
            )
        })?;

    // Only the anchor's family takes part in deriving the subnet
    let family = ranges.iter().map(Family::of_range).min();
    let mut builder = RangeSetBuilder::new();
    builder.extend(
        ranges
            .into_iter()
            .filter(|range| Some(Family::of_range(range)) == family),
    );
    let addresses = builder.build().map_err(|error| {
        ValidationError::invalid(
            addresses_path(),
            spec.addresses.as_slice(),
            error.to_string(),
        )
    })?;
    let anchor = addresses.first_address();

    // The prefix must fit the anchor's address family
    let subnet = u8::try_from(spec.prefix)
        .ok()
        .and_then(|prefix_len| IpNet::new(anchor, prefix_len).ok())
        .ok_or_else(|| ValidationError::invalid(prefix_path(), spec.prefix, PREFIX_NOT_VALID))?;

    log::trace!("Derived subnet {} from anchor {}", subnet.trunc(), anchor);
    Ok(subnet.trunc())
}

/// Check that every address of the pool falls inside its subnet
fn validate_addresses_are_within_prefix(spec: &PoolSpec) -> ErrorList {
    let subnet = match derive_subnet(spec) {
        Ok(subnet) => subnet,
        Err(errors) => return errors,
    };
    let subnet = match RangeSetBuilder::new().add_prefix(subnet).build() {
        Ok(set) => set,
        // A single prefix always builds, so this should not occur
        Err(error) => {
            log::warn!("Building a set from subnet {} failed: {}", subnet, error);
            return ValidationError::invalid(prefix_path(), spec.prefix, error.to_string()).into();
        }
    };

    let mut errors = ErrorList::new();
    for address in &spec.addresses {
        match addrspec::parse(address) {
            Ok(range) if subnet.contains(&range) => {}
            Ok(range) => {
                log::trace!("Address range {} lies outside of the pool subnet", range);
                errors.invalid(addresses_path(), address.as_str(), ADDRESS_OUTSIDE_SUBNET);
            }
            // Addresses are validated before the subnet is derived, so this should not occur
            Err(error) => {
                log::warn!("Re-parsing validated address {:?} failed: {}", address, error);
                errors.invalid(addresses_path(), address.as_str(), ADDRESS_NOT_PARSEABLE);
            }
        }
    }
    errors
}
