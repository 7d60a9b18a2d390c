//! Locate and open the X52 Pro on the USB bus.

#![deny(static_mut_refs)]

use crate::error::{UsbError, UsbResult};
use crate::topology::{RusbTopology, find_device};
use crate::transport::UsbControlTransport;
use hid_x52pro_protocol::{DeviceIdentity, X52_PRO};
use rusb::{Context, Device, UsbContext};
use serde::Serialize;
use tracing::{debug, info};

/// Where a device sits on the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceLocation {
    pub bus: u8,
    pub address: u8,
    /// Port path from the root hub, outermost first.
    pub ports: Vec<u8>,
    pub vendor_id: u16,
    pub product_id: u16,
}

impl DeviceLocation {
    pub fn of<C: UsbContext>(device: &Device<C>, identity: DeviceIdentity) -> Self {
        Self {
            bus: device.bus_number(),
            address: device.address(),
            ports: device.port_numbers().unwrap_or_default(),
            vendor_id: identity.vendor_id,
            product_id: identity.product_id,
        }
    }

    pub fn identity(&self) -> DeviceIdentity {
        DeviceIdentity::new(self.vendor_id, self.product_id)
    }

    /// Dotted port path, e.g. `1.4.2`.
    pub fn port_path(&self) -> String {
        self.ports
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl std::fmt::Display for DeviceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bus {:03} address {:03}", self.bus, self.address)?;
        if !self.ports.is_empty() {
            write!(f, " port {}", self.port_path())?;
        }
        write!(f, " ({})", self.identity())
    }
}

/// Create a libusb context.
///
/// # Errors
///
/// Returns [`UsbError::Context`] if libusb cannot be initialised.
pub fn open_context() -> UsbResult<Context> {
    Context::new().map_err(UsbError::Context)
}

/// Find the first device matching `identity` without opening it.
///
/// # Errors
///
/// Returns [`UsbError::Enumeration`] if the device list cannot be read.
pub fn locate_identity<C: UsbContext>(
    context: &C,
    identity: DeviceIdentity,
) -> UsbResult<Option<(Device<C>, DeviceLocation)>> {
    let topology = RusbTopology::snapshot(context).map_err(UsbError::Enumeration)?;
    let found = find_device(&topology, identity).map(|device| {
        let location = DeviceLocation::of(&device, identity);
        (device, location)
    });
    match &found {
        Some((_, location)) => debug!(%location, "located device"),
        None => debug!(%identity, devices = topology.len(), "device not present"),
    }
    Ok(found)
}

/// Where the X52 Pro is attached, if it is.
///
/// # Errors
///
/// Returns [`UsbError::Enumeration`] if the device list cannot be read.
pub fn locate<C: UsbContext>(context: &C) -> UsbResult<Option<DeviceLocation>> {
    Ok(locate_identity(context, X52_PRO)?.map(|(_, location)| location))
}

/// Find and open the X52 Pro.
///
/// `Ok(None)` means no X52 Pro is attached.
///
/// # Errors
///
/// Returns [`UsbError::Enumeration`] if the bus cannot be walked,
/// [`UsbError::PermissionDenied`] if the device node is not accessible, and
/// [`UsbError::Open`] for any other open failure.
pub fn discover<C: UsbContext>(context: &C) -> UsbResult<Option<UsbControlTransport<C>>> {
    let Some((device, location)) = locate_identity(context, X52_PRO)? else {
        return Ok(None);
    };

    let handle = device.open().map_err(|source| match source {
        rusb::Error::Access => UsbError::PermissionDenied {
            location: location.clone(),
        },
        source => UsbError::Open {
            location: location.clone(),
            source,
        },
    })?;
    info!(%location, "opened X52 Pro");
    Ok(Some(UsbControlTransport::new(handle)))
}
